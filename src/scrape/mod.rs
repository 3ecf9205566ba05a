// src/scrape/mod.rs
mod events;
mod images;

pub use events::{collect_events, collect_events_at, collect_from_stubs};
pub use images::download_images;
