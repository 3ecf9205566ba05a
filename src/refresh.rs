// src/refresh.rs
//! Decides between the cached events and a fresh scrape.
//!
//! ```text
//! Uninitialized ──(no cache / forced)──────────────▶ Refreshing
//! Uninitialized ──(cache, nextUpdate > now)────────▶ LoadedFresh
//! Uninitialized ──(cache, nextUpdate <= now)───────▶ LoadedStale ──▶ Refreshing
//! Refreshing ──(saved)──▶ Persisted ──(re-read)────▶ LoadedFresh
//! Refreshing ──(save failed)───────────────────────▶ LoadedFresh (in memory)
//! ```
//!
//! Whatever the path, ended events are pruned before anything is returned.

use crate::{
    collection::EventCollection,
    config::options::AppOptions,
    core::net::Fetcher,
    error::Result,
    progress::Progress,
    scrape, store,
    time::Moment,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheState {
    Uninitialized,
    LoadedFresh,
    LoadedStale,
    Refreshing,
    Persisted,
}

pub struct Refresher<'a> {
    fetcher: &'a dyn Fetcher,
    opts: &'a AppOptions,
    progress: &'a mut dyn Progress,
    state: CacheState,
    transitions: Vec<CacheState>,
    next_update: Option<Moment>,
}

impl<'a> Refresher<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, opts: &'a AppOptions, progress: &'a mut dyn Progress) -> Self {
        Self {
            fetcher,
            opts,
            progress,
            state: CacheState::Uninitialized,
            transitions: vec![CacheState::Uninitialized],
            next_update: None,
        }
    }

    pub fn state(&self) -> CacheState {
        self.state
    }

    /// Every state visited so far, oldest first.
    pub fn transitions(&self) -> &[CacheState] {
        &self.transitions
    }

    pub fn next_update(&self) -> Option<Moment> {
        self.next_update
    }

    fn enter(&mut self, state: CacheState) {
        tracing::debug!(from = ?self.state, to = ?state, "cache state");
        self.state = state;
        self.transitions.push(state);
    }

    pub fn load(&mut self) -> Result<EventCollection> {
        self.load_at(Moment::now())
    }

    /// Cached events when fresh, a new scrape otherwise. A malformed cache
    /// file is returned as `Error::CorruptCache`; the caller may `refresh`.
    pub fn load_at(&mut self, now: Moment) -> Result<EventCollection> {
        let opts = self.opts;
        let path = &opts.cache.path;

        if opts.scrape.force_update {
            self.progress.log("Update forced");
            return self.refresh_at(now);
        }
        if !store::has_data(path) {
            self.progress.log("No cached events");
            return self.refresh_at(now);
        }

        let (events, next_update) = store::read(path)?;
        self.next_update = Some(next_update);
        if next_update <= now {
            self.enter(CacheState::LoadedStale);
            self.progress.log(&format!("Cache is stale (update was due {next_update})"));
            return self.refresh_at(now);
        }

        self.enter(CacheState::LoadedFresh);
        self.progress.log(&format!("Using cached events until {next_update}"));
        Ok(store::prune_past(&events, now))
    }

    pub fn refresh(&mut self) -> Result<EventCollection> {
        self.refresh_at(Moment::now())
    }

    /// Scrape, prune, persist and read back.
    pub fn refresh_at(&mut self, now: Moment) -> Result<EventCollection> {
        let opts = self.opts;
        self.enter(CacheState::Refreshing);
        let scraped = scrape::collect_events_at(self.fetcher, &opts.scrape, now, &mut *self.progress)?;

        if opts.scrape.download_images {
            scrape::download_images(self.fetcher, &scraped, &opts.scrape.assets_dir, &mut *self.progress);
        }

        let events = store::prune_past(&scraped, now);
        let next_update = store::next_update_due(&events, now);
        self.next_update = Some(next_update);

        let path = &opts.cache.path;
        if let Err(e) = store::save(path, &events, next_update, now) {
            self.progress.log(&format!("Continuing without cache: {e}"));
            self.enter(CacheState::LoadedFresh);
            return Ok(events);
        }
        self.enter(CacheState::Persisted);
        self.progress.log(&format!("Saved {} events, next update {next_update}", events.len()));

        let confirmed = match store::read(path) {
            Ok((saved, _)) => store::prune_past(&saved, now),
            Err(e) => {
                tracing::warn!("could not re-read saved cache: {e}");
                events.sort(true)
            }
        };
        self.enter(CacheState::LoadedFresh);
        Ok(confirmed)
    }
}
