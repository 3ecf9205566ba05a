// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

use crate::{
    collection::EventCollection,
    config::consts::{DEFAULT_ASSETS_DIR, DEFAULT_CACHE_FILE, DEFAULT_CALENDAR_FILE, WORKERS},
    config::options::{AppOptions, CacheOptions, ScrapeOptions},
    core::net::{Fetcher, HttpFetcher},
    error::{Error, Result},
    ics,
    log::{self, Verbosity},
    progress::{LogProgress, Progress},
    refresh::Refresher,
    time::Moment,
};

/// Scrape Pokémon GO events from leekduck.com into an .ics calendar.
#[derive(Parser, Debug, Clone)]
#[command(name = "pogo_cal", version, about)]
pub struct Args {
    /// Also download event banner images
    #[arg(short = 'd', long = "download-img")]
    pub download_img: bool,

    /// Scrape even if the cache is still fresh
    #[arg(short, long)]
    pub update: bool,

    /// Calendar file to write (.ics is added when there is no extension)
    #[arg(short, long, default_value = DEFAULT_CALENDAR_FILE)]
    pub output: String,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Event cache file
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    pub cache: PathBuf,

    /// Where banner images go
    #[arg(long, default_value = DEFAULT_ASSETS_DIR)]
    pub assets: PathBuf,

    /// Concurrent detail-page fetches
    #[arg(long, default_value_t = WORKERS)]
    pub workers: usize,
}

impl Args {
    pub fn options(&self) -> AppOptions {
        let mut opts = AppOptions {
            scrape: ScrapeOptions {
                force_update: self.update,
                download_images: self.download_img,
                assets_dir: self.assets.clone(),
                workers: self.workers.max(1),
                ..ScrapeOptions::default()
            },
            cache: CacheOptions { path: self.cache.clone() },
            ..AppOptions::default()
        };
        opts.export.set_path(&self.output);
        opts
    }
}

/// Whole run: load or refresh, then write the calendar. Returns its path.
pub fn run(args: &Args) -> Result<PathBuf> {
    log::init(Verbosity::from_flags(args.verbose, args.quiet));
    let opts = args.options();
    let fetcher = HttpFetcher::new()?;
    let mut progress = LogProgress::default();

    let events = load_events(&fetcher, &opts, &mut progress)
        .inspect_err(|e| tracing::error!("run aborted: {e}"))?;
    export(&opts, &events, Moment::now())
}

/// A corrupt cache is not fatal: it is reported and replaced by a scrape.
pub fn load_events(
    fetcher: &dyn Fetcher,
    opts: &AppOptions,
    progress: &mut dyn Progress,
) -> Result<EventCollection> {
    let mut refresher = Refresher::new(fetcher, opts, progress);
    match refresher.load() {
        Err(Error::CorruptCache { path, reason }) => {
            tracing::warn!(path = %path.display(), "ignoring corrupt cache: {reason}");
            refresher.refresh()
        }
        other => other,
    }
}

/// Categorized events only, oldest first.
pub fn export(opts: &AppOptions, events: &EventCollection, now: Moment) -> Result<PathBuf> {
    let selected = events.of_types(&opts.export.types()).sort(false);
    let path = opts.export.out_path();
    ics::export(&path, &selected, now)?;
    tracing::info!(events = selected.len(), path = %path.display(), "export complete");
    Ok(path)
}
