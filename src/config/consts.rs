// src/config/consts.rs

// Scrape
pub const DEFAULT_START_URL: &str = "https://dir.xiph.org/codecs/MP3";
pub const DEFAULT_MAX_PAGES: usize = 6; // the game struggles with very long lists
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Entry constants (not on the page)
pub const DEFAULT_REGION: &str = "EN";
pub const DEFAULT_BITRATE: &str = "128";
pub const DEFAULT_FLAG: &str = "0";
pub const SENTINEL: &str = "N/A";

// Export
pub const DEFAULT_OUT_FILE: &str = "live_streams.sii";
pub const DEFAULT_TMP_SUFFIX: &str = ".tmp";
pub const DEFAULT_BACKUP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const DEFAULT_BLOCK_ID: &str = "_nameless.241.422c.1f60";
