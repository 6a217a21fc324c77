// src/specs/mod.rs
//! # Scraping “specs”
//!
//! Page-specific knowledge of the directory site: **where the data lives in the
//! HTML** and how to pull it out without falling over when markup is missing.
//!
//! ## What lives here
//! - The **DOM contract** as constants (card classes, badge classes, button text).
//! - **Pure extraction**: page text + page URL in, `PageResult` out. No I/O.
//! - **Degradation rules**: a missing title/genre/play button becomes the sentinel,
//!   a missing “Next” anchor ends pagination.
//!
//! ## What does **not** live here
//! - Fetching, looping over pages, dedup or output. See `scrape`, `dedup`, `sii`, `file`.
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::collect_pages → core::net (fetch)
//!                                ↘ specs::directory::extract_page
//! ```
//!
//! ## Testing notes
//! Specs are tested offline against small inline fixtures; keep selectors
//! tolerant of attribute order and extra classes.
pub mod directory;
