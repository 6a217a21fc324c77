// src/log.rs
//
// Diagnostics go to stderr through tracing; stdout is reserved for the
// document on `--dry-run`/`--print` and for `inspect` output.
// RUST_LOG wins over the verbosity flag when set.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default = if verbose { "sii_scrape=debug" } else { "sii_scrape=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests, embedding) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
