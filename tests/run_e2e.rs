// tests/run_e2e.rs
//
// Whole pipeline: scripted pages in, live_streams.sii (and backups) out.
mod common;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use common::*;
use sii_scrape::config::options::{AppOptions, CountMode, EntryOrder};
use sii_scrape::error::{Error, FetchError};
use sii_scrape::progress::Progress;
use sii_scrape::runner::{run_at, RunStatus};
use sii_scrape::sii::SiiDocument;

fn opts_for(dir: &Path) -> AppOptions {
    let mut opts = AppOptions::default();
    opts.scrape.start_url = url(BASE);
    opts.export.out_path = dir.join("live_streams.sii");
    opts
}

fn noon() -> chrono::DateTime<chrono::Utc> {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(12, 0, 5).unwrap().and_utc()
}

fn three_cards_one_duplicate() -> ScriptedFetcher {
    ScriptedFetcher::default().page(
        BASE,
        listing(
            &[
                card("Alpha FM", "Rock", "http://alpha.example:8000/live"),
                card("Beta | Radio", "Jazz", "/listen/beta"),
                card("Alpha FM", "Rock", "http://alpha.example:8000/live"),
            ],
            None,
        ),
    )
}

fn backups_in(dir: &Path) -> Vec<PathBuf> {
    let mut v: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            let name = p.file_name().unwrap().to_string_lossy().into_owned();
            name.starts_with("live_streams.sii.") && !name.ends_with(".tmp")
        })
        .collect();
    v.sort();
    v
}

#[test]
fn single_page_with_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let opts = opts_for(dir.path());
    let mut f = three_cards_one_duplicate();

    let summary = run_at(&opts, &mut f, None, &noon()).unwrap();

    assert_eq!(summary.pages, 1);
    assert_eq!(f.requests.len(), 1);
    assert_eq!(summary.result.total, 3);
    assert_eq!(summary.result.unique_count(), 2);
    assert_eq!(summary.result.collisions, 1);
    assert!(summary.result.has_duplicates());
    assert_eq!(summary.status(), RunStatus::Complete);

    let written = fs::read_to_string(dir.path().join("live_streams.sii")).unwrap();
    assert_eq!(written, summary.rendered);
    assert_eq!(
        written,
        "SiiNunit\n{\n  live_stream_def : _nameless.241.422c.1f60 {\n    stream_data: 3\n    \
         stream_data[0]: \"http://alpha.example:8000/live|Alpha FM|Rock|EN|128|0\"\n    \
         stream_data[1]: \"https://dir.example/listen/beta|Beta - Radio|Jazz|EN|128|0\"\n  }\n}\n"
    );
    // no temp file left behind, nothing to back up
    assert!(!dir.path().join("live_streams.sii.tmp").exists());
    assert!(summary.published.unwrap().backup.is_none());
}

#[test]
fn count_line_follows_count_mode() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = opts_for(dir.path());
    opts.export.dry_run = true;

    let total = run_at(&opts, &mut three_cards_one_duplicate(), None, &noon()).unwrap();
    assert_eq!(total.document.count, 3);
    assert_eq!(total.document.entries.len(), 2);

    opts.export.count_mode = CountMode::Unique;
    let unique = run_at(&opts, &mut three_cards_one_duplicate(), None, &noon()).unwrap();
    assert_eq!(unique.document.count, 2);
}

#[test]
fn duplicate_row_across_two_pages() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = opts_for(dir.path());
    opts.export.dry_run = true;
    let shared = card("Shared", "Pop", "http://shared/");
    let mut f = ScriptedFetcher::default()
        .page(BASE, listing(&[card("One", "Pop", "http://one/"), shared.clone()], Some("?page=2")))
        .page(&format!("{BASE}?page=2"), listing(&[shared, card("Two", "Pop", "http://two/")], None));

    let summary = run_at(&opts, &mut f, None, &noon()).unwrap();
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.result.total, 4);
    assert_eq!(summary.result.unique_count(), summary.result.total - 1);
    assert!(summary.result.has_duplicates());
}

#[test]
fn rendered_output_parses_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = opts_for(dir.path());
    opts.export.order = EntryOrder::Sorted;
    let summary = run_at(&opts, &mut three_cards_one_duplicate(), None, &noon()).unwrap();

    let text = fs::read_to_string(&opts.export.out_path).unwrap();
    let doc = SiiDocument::parse(&text).unwrap();
    assert_eq!(doc, summary.document);
    assert_eq!(doc.count, summary.result.total);
    let mut expected = summary.result.unique.clone();
    expected.sort();
    assert_eq!(doc.entries, expected);
    for e in &doc.entries {
        assert_eq!(e.split('|').count(), 6, "{e}");
    }
}

#[test]
fn existing_file_is_backed_up_once() {
    let dir = tempfile::tempdir().unwrap();
    let opts = opts_for(dir.path());
    fs::write(&opts.export.out_path, "old contents").unwrap();

    let summary = run_at(&opts, &mut three_cards_one_duplicate(), None, &noon()).unwrap();

    let backup = dir.path().join("live_streams.sii.20240309_120005");
    assert_eq!(summary.published.as_ref().unwrap().backup.as_deref(), Some(backup.as_path()));
    assert_eq!(backups_in(dir.path()), vec![backup.clone()]);
    assert_eq!(fs::read_to_string(&backup).unwrap(), "old contents");
    assert_eq!(fs::read_to_string(&opts.export.out_path).unwrap(), summary.rendered);
}

#[test]
fn dry_run_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = opts_for(dir.path());
    opts.export.dry_run = true;
    fs::write(&opts.export.out_path, "keep me").unwrap();

    let summary = run_at(&opts, &mut three_cards_one_duplicate(), None, &noon()).unwrap();
    assert!(summary.published.is_none());
    assert!(summary.rendered.starts_with("SiiNunit\n"));
    assert_eq!(fs::read_to_string(&opts.export.out_path).unwrap(), "keep me");
    assert!(backups_in(dir.path()).is_empty());
}

#[test]
fn partial_run_still_publishes() {
    let dir = tempfile::tempdir().unwrap();
    let opts = opts_for(dir.path());
    let mut f = ScriptedFetcher::default()
        .page(BASE, listing(&[card("A", "Pop", "http://a/")], Some("?page=2")))
        .failing(&format!("{BASE}?page=2"), 502);

    let summary = run_at(&opts, &mut f, None, &noon()).unwrap();
    assert_eq!(summary.status(), RunStatus::Partial);
    let doc = SiiDocument::parse(&fs::read_to_string(&opts.export.out_path).unwrap()).unwrap();
    assert_eq!(doc.entries, vec!["http://a/|A|Pop|EN|128|0"]);
}

#[test]
fn failure_before_any_entry_keeps_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let opts = opts_for(dir.path());
    fs::write(&opts.export.out_path, "previous").unwrap();
    let mut f = ScriptedFetcher::default().failing(BASE, 500);

    let err = run_at(&opts, &mut f, None, &noon()).unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::Status { status: 500, .. })));
    assert_eq!(fs::read_to_string(&opts.export.out_path).unwrap(), "previous");
    assert!(backups_in(dir.path()).is_empty());
}

#[test]
fn empty_directory_publishes_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let opts = opts_for(dir.path());
    let mut f = ScriptedFetcher::default().page(BASE, listing(&[], None));

    let summary = run_at(&opts, &mut f, None, &noon()).unwrap();
    assert_eq!(summary.result.total, 0);
    let doc = SiiDocument::parse(&fs::read_to_string(&opts.export.out_path).unwrap()).unwrap();
    assert_eq!(doc.count, 0);
    assert!(doc.entries.is_empty());
}

#[derive(Default)]
struct Transcript {
    lines: Vec<String>,
}

impl Progress for Transcript {
    fn page_done(&mut self, n: usize, entries: usize) {
        self.lines.push(format!("page {n}: {entries}"));
    }
    fn duplicate(&mut self, canonical: &str) {
        self.lines.push(format!("dup {canonical}"));
    }
    fn log(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }
}

#[test]
fn progress_follows_every_stage() {
    let dir = tempfile::tempdir().unwrap();
    let opts = opts_for(dir.path());
    fs::write(&opts.export.out_path, "previous").unwrap();
    let mut t = Transcript::default();

    run_at(&opts, &mut three_cards_one_duplicate(), Some(&mut t), &noon()).unwrap();

    let backup = dir.path().join("live_streams.sii.20240309_120005");
    assert_eq!(
        t.lines,
        vec![
            String::from("page 1: 3"),
            String::from("dup http://alpha.example:8000/live|Alpha FM|Rock|EN|128|0"),
            format!("Backed up previous file to {}", backup.display()),
            format!("Wrote {}", opts.export.out_path.display()),
        ]
    );
}
