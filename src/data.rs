// src/data.rs
//
// Run-scoped data: entries as scraped, per-page results and the deduplicated set.
// Nothing here outlives a run.

use std::fmt;

use url::Url;

use crate::config::consts::SENTINEL;
use crate::config::options::EntryOptions;
use crate::core::sanitize;

/// Number of `|`-separated fields in a canonical entry.
pub const FIELD_COUNT: usize = 6;

/// One stream card.
///
/// Fields are private so an entry can't change after construction; the
/// canonical form is built once and is the entry's identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entry {
    stream_url: String,
    title: String,
    genre: String,
    canonical: String,
}

impl Entry {
    /// Build an entry from scraped text. `None` fields become the sentinel.
    /// A `|` would shift every later field, so it is replaced with `-` in
    /// text fields and percent-encoded in the url.
    pub fn new(
        stream_url: Option<&str>,
        title: Option<&str>,
        genre: Option<&str>,
        consts: &EntryOptions,
    ) -> Self {
        let stream_url = stream_url.map_or(s!(SENTINEL), |u| u.replace('|', "%7C"));
        let title = title.map_or(s!(SENTINEL), sanitize::field_text);
        let genre = genre.map_or(s!(SENTINEL), sanitize::field_text);
        let canonical = [
            stream_url.as_str(),
            &title,
            &genre,
            &consts.region,
            &consts.bitrate,
            &consts.flag,
        ]
        .join("|");
        Self { stream_url, title, genre, canonical }
    }

    /// `url|title|genre|region|bitrate|flag`
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn into_canonical(self) -> String {
        self.canonical
    }

    pub fn stream_url(&self) -> &str { &self.stream_url }
    pub fn title(&self) -> &str { &self.title }
    pub fn genre(&self) -> &str { &self.genre }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Entries of one page, in page order, plus where to go next.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageResult {
    pub entries: Vec<Entry>,
    pub next: Option<Url>,
}

/// Deduplicated outcome of a scrape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Entries scraped, duplicates included.
    pub total: usize,
    /// Distinct canonical forms, in the order chosen by `EntryOrder`.
    pub unique: Vec<String>,
    /// Entries that were already in the set when seen.
    pub collisions: usize,
}

impl RunResult {
    pub fn unique_count(&self) -> usize {
        self.unique.len()
    }

    pub fn has_duplicates(&self) -> bool {
        self.total != self.unique.len()
    }
}
