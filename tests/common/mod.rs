// tests/common/mod.rs
//
// Scripted fetcher and fixture builders shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use sii_scrape::core::Fetch;
use sii_scrape::error::FetchError;
use url::Url;

pub const BASE: &str = "https://dir.example/codecs/MP3";

pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

/// Serves canned pages; unknown URLs answer 404. Records every request.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: HashMap<String, Result<String, u16>>,
    pub requests: Vec<String>,
}

impl ScriptedFetcher {
    pub fn page(mut self, u: &str, body: String) -> Self {
        self.pages.insert(url(u).to_string(), Ok(body));
        self
    }

    pub fn failing(mut self, u: &str, status: u16) -> Self {
        self.pages.insert(url(u).to_string(), Err(status));
        self
    }
}

impl Fetch for ScriptedFetcher {
    fn get(&mut self, u: &Url) -> Result<String, FetchError> {
        self.requests.push(u.to_string());
        match self.pages.get(u.as_str()) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status { url: u.to_string(), status: *status }),
            None => Err(FetchError::Status { url: u.to_string(), status: 404 }),
        }
    }
}

pub fn card(title: &str, genre: &str, href: &str) -> String {
    format!(
        r#"<div class="card shadow-sm mt-3">
             <div class="card-body">
               <h5 class="card-title">{title}</h5>
               <a class="badge badge-secondary" href="/genres/{genre}">{genre}</a>
               <a class="btn btn-sm btn-primary" href="{href}">Play</a>
             </div>
           </div>"#
    )
}

/// A listing page with the given cards and an optional "Next" href.
pub fn listing(cards: &[String], next: Option<&str>) -> String {
    let nav = match next {
        Some(href) => format!(r#"<nav><a class="page-link" href="{href}">Next »</a></nav>"#),
        None => String::from(r#"<nav><span class="page-link">Next »</span></nav>"#),
    };
    format!(
        "<!doctype html><html><body><main>{}</main>{nav}</body></html>",
        cards.concat()
    )
}
