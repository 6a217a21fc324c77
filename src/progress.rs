// src/progress.rs
use url::Url;

/// Lightweight progress reporting for a run.
/// Front-ends implement this to surface status to users; every hook is optional.
pub trait Progress {
    /// Called once with the page limit.
    fn begin(&mut self, _max_pages: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// About to fetch page `n` (1-based).
    fn page_start(&mut self, _n: usize, _url: &Url) {}

    /// Page `n` was extracted and yielded `entries` cards.
    fn page_done(&mut self, _n: usize, _entries: usize) {}

    /// Page `n` failed; pagination stops here.
    fn page_failed(&mut self, _n: usize, _err: &dyn std::error::Error) {}

    /// An entry identical to an earlier one was seen.
    fn duplicate(&mut self, _canonical: &str) {}

    /// Called at the end of scraping, successful or not.
    fn finish(&mut self) {}
}
