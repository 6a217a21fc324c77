// src/config/options.rs
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Deserialize;
use url::Url;

use super::consts::*;
use crate::error::ConfigError;

/// Everything a run needs. Every section and field is optional in the TOML file;
/// missing values fall back to `config::consts`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
    pub entry: EntryOptions,
}

impl AppOptions {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let opts: AppOptions = toml::from_str(text)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Checks that can't be expressed in the types. Call again after applying CLI overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.export.tmp_suffix.is_empty() {
            return Err(ConfigError::Invalid {
                key: "export.tmp_suffix",
                msg: s!("must not be empty (temp file would overwrite the target)"),
            });
        }
        if self.export.out_path.file_name().is_none() {
            return Err(ConfigError::Invalid {
                key: "export.out_path",
                msg: format!("`{}` has no file name", self.export.out_path.display()),
            });
        }
        if StrftimeItems::new(&self.export.backup_format).any(|i| matches!(i, Item::Error)) {
            return Err(ConfigError::Invalid {
                key: "export.backup_format",
                msg: format!("`{}` is not a valid strftime format", self.export.backup_format),
            });
        }
        // `%D`, `%x` and friends expand to slashes, so check a formatted stamp.
        let sample = NaiveDate::from_ymd_opt(2024, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .map(|dt| dt.and_utc().format(&self.export.backup_format).to_string())
            .unwrap_or_default();
        if sample.contains('/') || sample.contains('\\') {
            return Err(ConfigError::Invalid {
                key: "export.backup_format",
                msg: format!("`{}` produces path separators (`{sample}`)", self.export.backup_format),
            });
        }
        for (key, value) in [
            ("entry.region", &self.entry.region),
            ("entry.bitrate", &self.entry.bitrate),
            ("entry.flag", &self.entry.flag),
        ] {
            if value.contains('|') {
                return Err(ConfigError::Invalid { key, msg: s!("must not contain `|`") });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrapeOptions {
    pub start_url: Url,
    pub max_pages: usize,
    pub user_agent: String,
    /// 0 disables the timeout.
    pub timeout_secs: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            // constant is known-good
            start_url: Url::parse(DEFAULT_START_URL).expect("default start url"),
            max_pages: DEFAULT_MAX_PAGES,
            user_agent: s!(DEFAULT_USER_AGENT),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ScrapeOptions {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// What goes into the `stream_data: <count>` line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountMode {
    /// Number of scraped entries before dedup. Can exceed the number of
    /// `stream_data[i]` lines actually written.
    #[default]
    Total,
    /// Number of written lines.
    Unique,
}

/// Order of `stream_data[i]` lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryOrder {
    /// Order of first appearance while scraping.
    #[default]
    FirstSeen,
    /// Lexicographic by canonical form.
    Sorted,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    pub out_path: PathBuf,
    pub tmp_suffix: String,
    /// strftime pattern appended to the target name for backups.
    pub backup_format: String,
    pub block_id: String,
    pub count_mode: CountMode,
    pub order: EntryOrder,
    /// Render only; never touch the filesystem.
    pub dry_run: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from(DEFAULT_OUT_FILE),
            tmp_suffix: s!(DEFAULT_TMP_SUFFIX),
            backup_format: s!(DEFAULT_BACKUP_FORMAT),
            block_id: s!(DEFAULT_BLOCK_ID),
            count_mode: CountMode::default(),
            order: EntryOrder::default(),
            dry_run: false,
        }
    }
}

impl ExportOptions {
    /// `live_streams.sii` -> `live_streams.sii.tmp`
    pub fn tmp_path(&self) -> PathBuf {
        append_to_name(&self.out_path, &self.tmp_suffix)
    }

    /// `live_streams.sii` -> `live_streams.sii.20240131_235959`
    pub fn backup_path<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> PathBuf
    where
        Tz::Offset: std::fmt::Display,
    {
        let stamp = now.format(&self.backup_format).to_string();
        append_to_name(&self.out_path, &join!(".", &stamp))
    }
}

fn append_to_name(path: &Path, suffix: &str) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

/// Constant trailing fields of every entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntryOptions {
    pub region: String,
    pub bitrate: String,
    pub flag: String,
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            region: s!(DEFAULT_REGION),
            bitrate: s!(DEFAULT_BITRATE),
            flag: s!(DEFAULT_FLAG),
        }
    }
}
