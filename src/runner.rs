// src/runner.rs
use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::{
    config::options::AppOptions,
    core::Fetch,
    data::RunResult,
    dedup::dedupe,
    error::Result,
    file::{self, PublishReport},
    progress::Progress,
    scrape::{self, StopReason},
    sii::SiiDocument,
    specs::directory::DirectorySpec,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// Pagination ended normally (no more pages, page limit or a loop).
    Complete,
    /// A page failed; output holds what came before it.
    Partial,
}

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub pages: usize,
    pub stop: StopReason,
    pub result: RunResult,
    pub document: SiiDocument,
    pub rendered: String,
    /// `None` on a dry run.
    pub published: Option<PublishReport>,
}

impl RunSummary {
    pub fn status(&self) -> RunStatus {
        match self.stop {
            StopReason::Failed(_) => RunStatus::Partial,
            _ => RunStatus::Complete,
        }
    }
}

/// Scrape → dedupe → render → publish, with backups stamped in local time.
pub fn run(
    opts: &AppOptions,
    fetcher: &mut dyn Fetch,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    run_at(opts, fetcher, progress, &Local::now())
}

/// `run` with an explicit clock for the backup name.
pub fn run_at<Tz>(
    opts: &AppOptions,
    fetcher: &mut dyn Fetch,
    mut progress: Option<&mut dyn Progress>,
    now: &DateTime<Tz>,
) -> Result<RunSummary>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let spec = DirectorySpec::new()?;
    let outcome = scrape::collect_pages(
        fetcher,
        &spec,
        &opts.scrape,
        &opts.entry,
        progress.as_deref_mut(),
    );

    // Nothing to show for the run: keep the existing file rather than replace it with an empty list.
    if outcome.entries.is_empty() {
        if let StopReason::Failed(e) = outcome.stop {
            return Err(e);
        }
    }

    let pages = outcome.pages;
    let stop = outcome.stop;
    let result = dedupe(outcome.entries, opts.export.order, progress.as_deref_mut());
    tracing::info!(
        total = result.total,
        unique = result.unique_count(),
        collisions = result.collisions,
        "deduplicated"
    );

    let document = SiiDocument::from_run(&result, &opts.export);
    let rendered = document.render();

    let published = if opts.export.dry_run {
        if let Some(p) = progress.as_deref_mut() {
            p.log("Dry run: nothing written");
        }
        None
    } else {
        let report = file::publish(&rendered, &opts.export, now)?;
        if let Some(p) = progress.as_deref_mut() {
            if let Some(b) = &report.backup {
                p.log(&format!("Backed up previous file to {}", b.display()));
            }
            p.log(&format!("Wrote {}", report.target.display()));
        }
        Some(report)
    };

    Ok(RunSummary { pages, stop, result, document, rendered, published })
}
