// src/error.rs
//
// Error taxonomy for a run.
//
// - FetchError / ParseError: page-level. The paginator stops on these but keeps
//   whatever it already collected.
// - PublishFailure: one variant per publish stage. Each carries enough paths for
//   the operator to put things back by hand.
// - ConfigError: bad config file or CLI value; nothing has happened yet.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Publish(#[from] PublishFailure),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("next-page link `{href}` on {page} cannot be resolved: {source}")]
    BadNextLink {
        page: String,
        href: String,
        #[source]
        source: url::ParseError,
    },

    #[error("sii line {line}: {msg}")]
    Sii { line: usize, msg: String },
}

#[derive(Debug, Error)]
pub enum PublishFailure {
    /// Step 1. Target untouched.
    #[error("writing temp file {tmp} failed: {source}")]
    Write {
        tmp: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Step 2. Target untouched; the temp file is left in place.
    #[error("backing up {target} to {backup} failed: {source} (new output left at {tmp})")]
    Backup {
        target: PathBuf,
        backup: PathBuf,
        tmp: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Step 3. If `backup` is set the old target was already moved away and
    /// there is currently no file at `target`.
    #[error("{}", publish_msg(.tmp, .target, .backup, .source))]
    Publish {
        tmp: PathBuf,
        target: PathBuf,
        backup: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
}

fn publish_msg(tmp: &Path, target: &Path, backup: &Option<PathBuf>, source: &io::Error) -> String {
    let mut msg = format!(
        "moving {} into place at {} failed: {}",
        tmp.display(),
        target.display(),
        source
    );
    if let Some(b) = backup {
        msg.push_str(&format!(
            "; previous file was already backed up to {} and {} is now missing",
            b.display(),
            target.display()
        ));
    }
    msg
}

impl PublishFailure {
    pub fn stage(&self) -> &'static str {
        match self {
            PublishFailure::Write { .. } => "write",
            PublishFailure::Backup { .. } => "backup",
            PublishFailure::Publish { .. } => "publish",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path} failed: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value for `{key}`: {msg}")]
    Invalid { key: &'static str, msg: String },
}
