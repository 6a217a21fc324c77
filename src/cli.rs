// src/cli.rs
use std::{fs, path::{Path, PathBuf}, process::ExitCode};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use url::Url;

use crate::{
    config::options::{AppOptions, CountMode, EntryOrder},
    core::HttpFetcher,
    error::ConfigError,
    progress::Progress,
    runner::{self, RunStatus, RunSummary},
    scrape::StopReason,
    sii::SiiDocument,
};

/// Exit code when pagination stopped on an error but output was still published.
pub const EXIT_PARTIAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "sii_scrape",
    version,
    about = "Scrape a radio directory into an ETS2/ATS live_streams.sii",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape and publish (default)
    Run(RunArgs),
    /// Print the entries of an existing .sii file
    Inspect {
        path: PathBuf,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// TOML config file; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First directory page
    #[arg(long)]
    pub url: Option<Url>,

    /// Stop after this many pages
    #[arg(short = 'n', long)]
    pub max_pages: Option<usize>,

    /// Output file
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// Request timeout in seconds, 0 = none
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Value of the `stream_data:` count line
    #[arg(long, value_enum)]
    pub count: Option<CountArg>,

    /// Order of the written entries
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Print the document to stdout instead of publishing it
    #[arg(long)]
    pub dry_run: bool,

    /// Also print the document to stdout after publishing
    #[arg(long)]
    pub print: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CountArg {
    /// Entries scraped, duplicates included
    Total,
    /// Entries written
    Unique,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    FirstSeen,
    Sorted,
}

impl RunArgs {
    /// Config file (or defaults) with flags applied on top.
    pub fn options(&self) -> Result<AppOptions, ConfigError> {
        let mut opts = match &self.config {
            Some(path) => AppOptions::load(path)?,
            None => AppOptions::default(),
        };

        if let Some(u) = &self.url { opts.scrape.start_url = u.clone(); }
        if let Some(n) = self.max_pages { opts.scrape.max_pages = n; }
        if let Some(ua) = &self.user_agent { opts.scrape.user_agent = ua.clone(); }
        if let Some(t) = self.timeout { opts.scrape.timeout_secs = t; }
        if let Some(o) = &self.out { opts.export.out_path = o.clone(); }
        if let Some(c) = self.count {
            opts.export.count_mode = match c {
                CountArg::Total => CountMode::Total,
                CountArg::Unique => CountMode::Unique,
            };
        }
        if let Some(o) = self.order {
            opts.export.order = match o {
                OrderArg::FirstSeen => EntryOrder::FirstSeen,
                OrderArg::Sorted => EntryOrder::Sorted,
            };
        }
        if self.dry_run { opts.export.dry_run = true; }

        opts.validate()?;
        Ok(opts)
    }
}

/// Parse args, run, map the outcome to an exit code.
/// 0 = complete, 2 = partial (see `EXIT_PARTIAL`), errors bubble up as 1.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose);

    match cli.command {
        Some(Command::Inspect { path }) => inspect(&path),
        Some(Command::Run(args)) => scrape_and_publish(&args),
        None => scrape_and_publish(&cli.run),
    }
}

fn scrape_and_publish(args: &RunArgs) -> Result<ExitCode> {
    let opts = args.options().wrap_err("invalid configuration")?;
    let mut fetcher = HttpFetcher::new(&opts.scrape)?;
    let mut progress = ConsoleProgress::default();

    let summary = runner::run(&opts, &mut fetcher, Some(&mut progress))?;
    print_summary(&summary);

    if opts.export.dry_run || args.print {
        print!("{}", summary.rendered);
    }

    Ok(match summary.status() {
        RunStatus::Complete => ExitCode::SUCCESS,
        RunStatus::Partial => ExitCode::from(EXIT_PARTIAL),
    })
}

fn inspect(path: &Path) -> Result<ExitCode> {
    let text = fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    let doc = SiiDocument::parse(&text).wrap_err_with(|| format!("parsing {}", path.display()))?;

    println!("block: {}", doc.block_id);
    println!("count: {} (entries written: {})", doc.count, doc.entries.len());
    for (i, e) in doc.entries.iter().enumerate() {
        println!("[{i}] {e}");
    }
    if doc.count != doc.entries.len() {
        eprintln!("Warning: count line does not match the number of entries");
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &RunSummary) {
    let r = &summary.result;
    let rule = "=".repeat(50);
    eprintln!();
    eprintln!("{rule}");
    eprintln!("Scrape finished after {} page(s): {}", summary.pages, describe_stop(&summary.stop));
    eprintln!("Total entries:   {}", r.total);
    eprintln!("Unique entries:  {}", r.unique_count());
    eprintln!("Duplicates:      {}", if r.has_duplicates() { "yes" } else { "no" });
    eprintln!("{rule}");
}

fn describe_stop(stop: &StopReason) -> String {
    match stop {
        StopReason::Exhausted => s!("no more pages"),
        StopReason::PageLimit => s!("page limit reached"),
        StopReason::Cycle(url) => format!("next link loops back to {url}"),
        StopReason::Failed(e) => format!("stopped early: {e}"),
    }
}

/// Human-readable status lines on stderr.
#[derive(Default)]
pub struct ConsoleProgress {
    max_pages: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, max_pages: usize) {
        self.max_pages = max_pages;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn page_start(&mut self, n: usize, url: &Url) {
        eprintln!("Fetching page {n}/{}: {url}", self.max_pages);
    }
    fn page_done(&mut self, _n: usize, entries: usize) {
        eprintln!("  {entries} entries");
    }
    fn page_failed(&mut self, n: usize, err: &dyn std::error::Error) {
        eprintln!("Page {n} failed: {err}");
    }
    fn duplicate(&mut self, canonical: &str) {
        eprintln!("Duplicate entry: {canonical}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sii_scrape").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn bare_invocation_runs_with_defaults() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert_eq!(cli.run.options().unwrap(), AppOptions::default());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&[
            "--url", "https://example.com/a", "-n", "2", "-o", "x/live.sii",
            "--count", "unique", "--order", "sorted", "--timeout", "0", "--dry-run",
        ]);
        let o = cli.run.options().unwrap();
        assert_eq!(o.scrape.start_url.as_str(), "https://example.com/a");
        assert_eq!(o.scrape.max_pages, 2);
        assert_eq!(o.scrape.timeout(), None);
        assert_eq!(o.export.out_path, PathBuf::from("x/live.sii"));
        assert_eq!(o.export.count_mode, CountMode::Unique);
        assert_eq!(o.export.order, EntryOrder::Sorted);
        assert!(o.export.dry_run);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("cfg.toml");
        fs::write(&cfg, "[scrape]\nmax_pages = 9\n[export]\ncount_mode = \"unique\"\n").unwrap();

        let cli = parse(&["--config", cfg.to_str().unwrap(), "--max-pages", "3"]);
        let o = cli.run.options().unwrap();
        assert_eq!(o.scrape.max_pages, 3);
        assert_eq!(o.export.count_mode, CountMode::Unique);
    }

    #[test]
    fn subcommands() {
        let cli = parse(&["inspect", "live_streams.sii"]);
        assert!(matches!(cli.command, Some(Command::Inspect { .. })));
        let cli = parse(&["run", "-n", "1"]);
        match cli.command {
            Some(Command::Run(args)) => assert_eq!(args.max_pages, Some(1)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_url_rejected() {
        assert!(Cli::try_parse_from(["sii_scrape", "--url", "nope"]).is_err());
    }
}
