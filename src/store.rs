// src/store.rs
//! On-disk cache: the event collection plus the instant after which it should
//! be scraped again.
//!
//! ```text
//! { "nextUpdate": <seconds since epoch>, "events": { "items": [ ... ] } }
//! ```

use std::{fs, path::Path};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::collection::EventCollection;
use crate::config::consts::NEXT_UPDATE_FALLBACK_HOURS;
use crate::error::{Error, Result};
use crate::file;
use crate::time::Moment;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheFile {
    next_update: f64,
    events: EventCollection,
}

/// Present and non-empty.
pub fn has_data(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file() && m.len() > 0).unwrap_or(false)
}

pub fn read(path: &Path) -> Result<(EventCollection, Moment)> {
    let text = fs::read_to_string(path)?;
    let corrupt = |reason: String| Error::CorruptCache { path: path.to_path_buf(), reason };

    let cache: CacheFile = serde_json::from_str(&text).map_err(|e| corrupt(e.to_string()))?;
    let next_update = Moment::from_timestamp(cache.next_update, None).map_err(|e| corrupt(e.to_string()))?;
    Ok((cache.events, next_update))
}

/// Prune, sort newest first and write pretty JSON. Parent directories are
/// created as needed.
pub fn save(path: &Path, events: &EventCollection, next_update: Moment, now: Moment) -> Result<()> {
    let persist = |reason: String| {
        tracing::error!(path = %path.display(), "could not save cache: {reason}");
        Error::Persist { path: path.to_path_buf(), reason }
    };

    let cache = CacheFile {
        next_update: next_update.timestamp(),
        events: prune_past(events, now).sort(true),
    };
    let json = serde_json::to_string_pretty(&cache).map_err(|e| persist(e.to_string()))?;

    file::ensure_parent_dir(path).map_err(|e| persist(e.to_string()))?;
    fs::write(path, json).map_err(|e| persist(e.to_string()))?;

    tracing::info!(path = %path.display(), events = cache.events.len(), next_update = %next_update, "cache saved");
    Ok(())
}

/// Drop events that ended before `now`; one ending exactly at `now` stays.
/// Applying it twice changes nothing.
pub fn prune_past(events: &EventCollection, now: Moment) -> EventCollection {
    events.filter(|ev| ev.end() >= now)
}

/// Earliest upcoming start; with nothing upcoming, a day from `now`.
pub fn next_update_due(events: &EventCollection, now: Moment) -> Moment {
    events
        .upcoming_at(now, None, None)
        .iter()
        .map(|ev| ev.start())
        .min()
        .unwrap_or_else(|| now + TimeDelta::hours(NEXT_UPDATE_FALLBACK_HOURS))
}
