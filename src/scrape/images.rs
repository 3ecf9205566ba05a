// src/scrape/images.rs
use std::path::Path;

use crate::{
    collection::EventCollection,
    core::net::{ download_image, Fetcher },
    progress::Progress,
};

/// Fetch every event banner into `dir`. Failures are reported and skipped.
/// Returns how many files were written.
pub fn download_images(
    fetcher: &dyn Fetcher,
    events: &EventCollection,
    dir: &Path,
    progress: &mut dyn Progress,
) -> usize {
    progress.log(&format!("Downloading images into {}", dir.display()));
    progress.begin(events.len());

    let mut written = 0;
    for (i, ev) in events.iter().enumerate() {
        if ev.img_url().is_empty() {
            continue;
        }
        match download_image(fetcher, ev.img_url(), dir) {
            Ok(Some(_)) => {
                written += 1;
                progress.item_done(i, ev.name());
            }
            Ok(None) => progress.item_done(i, ev.name()),
            Err(e) => {
                tracing::error!(url = ev.img_url(), "image download failed: {e}");
                progress.item_failed(ev.name(), &e.to_string());
            }
        }
    }

    progress.finish();
    written
}
