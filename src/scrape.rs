// src/scrape.rs
//
// Paginator: fetch → extract → follow "Next" until the directory runs out,
// the page limit is hit, or a page fails. Strictly sequential.

use std::collections::HashSet;

use url::Url;

use crate::{
    config::options::{EntryOptions, ScrapeOptions},
    core::Fetch,
    data::Entry,
    error::Error,
    progress::Progress,
    specs::directory::DirectorySpec,
};

/// Why pagination ended.
#[derive(Debug)]
pub enum StopReason {
    /// Last page had no "Next" link.
    Exhausted,
    /// `max_pages` pages were fetched and more were available.
    PageLimit,
    /// "Next" pointed at a page already fetched in this run.
    /// Fragments are ignored, so `href="#"` stops after the first fetch.
    Cycle(Url),
    /// Fetch or extraction failed. Entries gathered before it are kept.
    Failed(Error),
}

#[derive(Debug)]
pub struct ScrapeOutcome {
    /// Every entry in scrape order, duplicates included.
    pub entries: Vec<Entry>,
    pub pages: usize,
    pub stop: StopReason,
}

impl ScrapeOutcome {
    /// True when pagination was cut short by an error.
    pub fn is_partial(&self) -> bool {
        matches!(self.stop, StopReason::Failed(_))
    }
}

/// Walk the directory starting at `scrape.start_url`.
/// Never fails as a whole: errors end the walk and are reported in `stop`.
pub fn collect_pages(
    fetcher: &mut dyn Fetch,
    spec: &DirectorySpec,
    scrape: &ScrapeOptions,
    consts: &EntryOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> ScrapeOutcome {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(scrape.max_pages);
    }

    let mut entries: Vec<Entry> = Vec::new();
    let mut visited: HashSet<Url> = HashSet::new();
    let mut current = Some(scrape.start_url.clone());
    let mut pages = 0usize;

    let stop = loop {
        let Some(url) = current.take() else {
            break StopReason::Exhausted;
        };
        if pages >= scrape.max_pages {
            break StopReason::PageLimit;
        }
        let mut page_key = url.clone();
        page_key.set_fragment(None);
        if !visited.insert(page_key) {
            tracing::warn!(url = %url, "next link loops back to a visited page");
            break StopReason::Cycle(url);
        }

        let n = pages + 1;
        if let Some(p) = progress.as_deref_mut() {
            p.page_start(n, &url);
        }
        tracing::info!(page = n, url = %url, "fetching");

        let page = fetcher
            .get(&url)
            .map_err(Error::from)
            .and_then(|body| spec.extract_page(&body, &url, consts).map_err(Error::from));

        match page {
            Ok(page) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.page_done(n, page.entries.len());
                }
                entries.extend(page.entries);
                current = page.next;
                pages = n;
            }
            Err(e) => {
                tracing::warn!(page = n, url = %url, error = %e, "page failed, stopping");
                if let Some(p) = progress.as_deref_mut() {
                    p.page_failed(n, &e);
                }
                break StopReason::Failed(e);
            }
        }
    };

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    tracing::info!(pages, entries = entries.len(), stop = ?stop, "pagination finished");

    ScrapeOutcome { entries, pages, stop }
}
