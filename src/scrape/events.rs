// src/scrape/events.rs
use std::{
    thread, time::Duration,
    sync::{ mpsc, atomic::{ AtomicUsize, Ordering }}
};

use scraper::Html;

use crate::{
    collection::EventCollection,
    config::consts::{ EVENTS_URL, JITTER_MS },
    config::options::ScrapeOptions,
    core::net::{ fetch_document, Fetcher },
    error::Result,
    event::{ Content, Event },
    progress::Progress,
    specs::{ self, listing::{ parse_listing, EventStub }},
    time::Moment,
};

/// Scrape the index page and every categorized detail page.
pub fn collect_events(
    fetcher: &dyn Fetcher,
    opts: &ScrapeOptions,
    progress: &mut dyn Progress,
) -> Result<EventCollection> {
    collect_events_at(fetcher, opts, Moment::now(), progress)
}

/// Same as `collect_events`, with "now" pinned (ended events are skipped).
/// A failed index fetch or a changed index layout aborts the run.
pub fn collect_events_at(
    fetcher: &dyn Fetcher,
    opts: &ScrapeOptions,
    now: Moment,
    progress: &mut dyn Progress,
) -> Result<EventCollection> {
    progress.log("Fetching event index…");
    let stubs = {
        let doc = fetch_document(fetcher, EVENTS_URL)?;
        parse_listing(&doc, now)?
    };
    progress.log(&format!("Found {} events", stubs.len()));
    Ok(collect_from_stubs(fetcher, opts, &stubs, progress))
}

/// Turn stubs into events through the worker pool. Output keeps listing
/// order; a stub whose page or dates fail is skipped.
pub fn collect_from_stubs(
    fetcher: &dyn Fetcher,
    opts: &ScrapeOptions,
    stubs: &[EventStub],
    progress: &mut dyn Progress,
) -> EventCollection {
    progress.begin(stubs.len());

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<(usize, std::result::Result<Event, String>)>();
    let workers = opts.workers.min(stubs.len()).max(1);
    let mut slots: Vec<Option<Event>> = vec![None; stubs.len()];

    thread::scope(|scope| {
        for _ in 0..workers {
            let idx = &counter;
            let tx = res_tx.clone();

            scope.spawn(move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= stubs.len() {
                        break;
                    }
                    let stub = &stubs[i];
                    let needs_page = specs::extractor_for(&stub.event_type).is_some();
                    let result = build_event(fetcher, stub).map_err(|e| e.to_string());
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                    if needs_page && opts.request_pause_ms > 0 {
                        let jitter = (i as u64 * 37) % JITTER_MS;
                        thread::sleep(Duration::from_millis(opts.request_pause_ms + jitter)); // be polite
                    }
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, result) in res_rx {
            let name = stubs[i].name.as_str();
            match result {
                Ok(ev) if ev.is_valid() => {
                    progress.item_done(i, name);
                    slots[i] = Some(ev);
                }
                Ok(_) => {
                    tracing::warn!(url = %stubs[i].url, "event without a name; skipping");
                    progress.item_failed(name, "missing name");
                }
                Err(msg) => {
                    tracing::error!(url = %stubs[i].url, "{msg}");
                    progress.item_failed(name, &msg);
                }
            }
        }
    });

    progress.finish();
    slots.into_iter().flatten().collect()
}

/// Uncategorized events have no rule, so their page is not fetched.
fn build_event(fetcher: &dyn Fetcher, stub: &EventStub) -> Result<Event> {
    let content = match specs::extractor_for(&stub.event_type) {
        Some(rule) => {
            let body = fetcher.fetch_text(&stub.url)?;
            let doc = Html::parse_document(&body);
            rule(&doc)
        }
        None => Content::new(),
    };
    tracing::debug!(name = %stub.name, event_type = %stub.event_type, "extracted");
    stub.clone().into_event(content)
}
