// src/lib.rs
//! Pokémon GO event scraper: leekduck.com listings → typed events → JSON
//! cache → iCalendar.

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod progress;

pub mod time;
pub mod event;
pub mod collection;
pub mod specs;

pub mod file;
pub mod scrape;
pub mod store;
pub mod refresh;
pub mod ics;

#[cfg(feature = "cli")]
pub mod cli;

pub use collection::EventCollection;
pub use error::{Error, Result};
pub use event::{Content, ContentValue, Event, EventType};
pub use refresh::{CacheState, Refresher};
pub use time::Moment;
