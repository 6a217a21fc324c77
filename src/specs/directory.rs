// src/specs/directory.rs
//! Scraping *spec* for the stream directory listing.
//!
//! One listing page holds a column of cards:
//! ```text
//! <div class="card shadow-sm mt-3">
//!   <h5 class="card-title">Station name</h5>
//!   <a class="badge badge-secondary" href="/genres/Rock">Rock</a>
//!   <a class="btn btn-sm btn-primary" href="http://host:8000/stream">Play</a>
//! </div>
//! ...
//! <a href="?cursor=...">Next »</a>
//! ```
//! Each card becomes one `Entry`; the first anchor reading “Next” gives the next page.

use scraper::{Html, Selector};
use url::Url;

use crate::config::options::EntryOptions;
use crate::core::html;
use crate::core::sanitize::is_absolute_http;
use crate::data::{Entry, PageResult};
use crate::error::ParseError;

pub const CARD: &str = "div.card.shadow-sm.mt-3";
pub const TITLE: &str = "h5.card-title";
pub const GENRE: &str = "a.badge.badge-secondary";
pub const PLAY_BUTTON: &str = "a.btn.btn-sm.btn-primary";
pub const PLAY_TEXT: &str = "Play";
pub const ANCHOR: &str = "a";
pub const NEXT_TEXT: &str = "Next";

/// Compiled DOM contract. Build once per run.
pub struct DirectorySpec {
    card: Selector,
    title: Selector,
    genre: Selector,
    play: Selector,
    anchor: Selector,
}

impl DirectorySpec {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            card: html::compile(CARD)?,
            title: html::compile(TITLE)?,
            genre: html::compile(GENRE)?,
            play: html::compile(PLAY_BUTTON)?,
            anchor: html::compile(ANCHOR)?,
        })
    }

    /// Parse one listing page. Missing card fields degrade to the sentinel; the
    /// only failure is a “Next” href that can't be joined onto `page_url`.
    pub fn extract_page(
        &self,
        page: &str,
        page_url: &Url,
        consts: &EntryOptions,
    ) -> Result<PageResult, ParseError> {
        let doc = Html::parse_document(page);
        let root = doc.root_element();

        let mut entries = Vec::new();
        for card in root.select(&self.card) {
            let title = html::first(card, &self.title).map(html::text);
            let genre = html::first_with_attr(card, &self.genre, "href").map(html::text);
            let stream_url = html::first_with_text(card, &self.play, PLAY_TEXT)
                .and_then(|a| html::attr(a, "href"))
                .map(|href| stream_link(page_url, href));

            let entry = Entry::new(stream_url.as_deref(), title.as_deref(), genre.as_deref(), consts);
            tracing::trace!(entry = %entry, "card");
            entries.push(entry);
        }

        let next = match html::first_with_text(root, &self.anchor, NEXT_TEXT)
            .and_then(|a| html::attr(a, "href"))
        {
            Some(href) => Some(html::resolve(page_url, href).map_err(|source| {
                ParseError::BadNextLink {
                    page: page_url.to_string(),
                    href: s!(href),
                    source,
                }
            })?),
            None => None,
        };

        tracing::debug!(page = %page_url, cards = entries.len(), has_next = next.is_some(), "extracted");
        Ok(PageResult { entries, next })
    }
}

/// Absolute links pass through untouched; anything else is joined onto the page URL.
/// A relative link that won't join is kept as written rather than dropped.
fn stream_link(page_url: &Url, href: &str) -> String {
    if is_absolute_http(href) {
        return s!(href);
    }
    match html::resolve(page_url, href) {
        Ok(u) => u.into(),
        Err(e) => {
            tracing::warn!(href, error = %e, "could not resolve stream link, keeping it as-is");
            s!(href)
        }
    }
}
