// src/file.rs
//
// Publisher: temp file → backup of the current target → rename into place.
// Each step reports its own failure; nothing is retried or rolled back.

use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, TimeZone};

use crate::config::options::ExportOptions;
use crate::error::PublishFailure;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishReport {
    pub target: PathBuf,
    /// Where the previous target went, if there was one.
    pub backup: Option<PathBuf>,
}

/// Install `text` at `export.out_path`, keeping the previous file as a
/// timestamped backup next to it.
pub fn publish<Tz>(
    text: &str,
    export: &ExportOptions,
    now: &DateTime<Tz>,
) -> Result<PublishReport, PublishFailure>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let target = export.out_path.clone();
    let tmp = export.tmp_path();

    // 1) temp file
    let written = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
    .and_then(|_| fs::write(&tmp, text));
    if let Err(source) = written {
        return Err(PublishFailure::Write { tmp, source });
    }
    tracing::debug!(tmp = %tmp.display(), bytes = text.len(), "temp file written");

    // 2) backup
    let backup = if target.exists() {
        let backup = unique_backup_path(&export.backup_path(now));
        if let Err(source) = fs::rename(&target, &backup) {
            return Err(PublishFailure::Backup { target, backup, tmp, source });
        }
        tracing::info!(backup = %backup.display(), "previous file backed up");
        Some(backup)
    } else {
        tracing::info!(target = %target.display(), "no previous file, nothing to back up");
        None
    };

    // 3) swap in
    if let Err(source) = fs::rename(&tmp, &target) {
        return Err(PublishFailure::Publish { tmp, target, backup, source });
    }
    tracing::info!(target = %target.display(), "published");

    Ok(PublishReport { target, backup })
}

/// Two runs within one timestamp tick would otherwise clobber the first backup.
/// First occurrence: `<name>`; subsequent: `<name>_2`, `<name>_3`, ...
fn unique_backup_path(candidate: &Path) -> PathBuf {
    if !candidate.exists() {
        return candidate.to_path_buf();
    }
    let base = candidate.as_os_str().to_string_lossy().into_owned();
    (2usize..)
        .map(|n| PathBuf::from(format!("{base}_{n}")))
        .find(|p| !p.exists())
        .unwrap_or_else(|| candidate.to_path_buf())
}

pub fn ensure_directory(dir: &Path) -> std::io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
