// src/core/net.rs
//
// Blocking HTTP. `Fetcher` is the seam the scrape loop and the refresher
// depend on; `HttpFetcher` is the real thing, tests plug in canned pages.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use scraper::Html;

use crate::config::consts::{FETCH_TIMEOUT_SECS, USER_AGENT};
use crate::core::sanitize::file_name_from_url;
use crate::error::{Error, Result};

pub trait Fetcher: Sync {
    fn fetch_text(&self, url: &str) -> Result<String>;
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::fetch("<client>", e))?;
        Ok(Self { client })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response> {
        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() { Error::fetch(url, "timed out") } else { Error::fetch(url, e) }
        })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::fetch(url, format!("HTTP {status}")));
        }
        Ok(resp)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        self.get(url)?.text().map_err(|e| Error::fetch(url, e))
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self.get(url)?.bytes().map_err(|e| Error::fetch(url, e))?;
        Ok(bytes.to_vec())
    }
}

/// Fetch and parse. The returned tree is not `Send`: parse where you use it.
pub fn fetch_document(fetcher: &dyn Fetcher, url: &str) -> Result<Html> {
    let body = fetcher.fetch_text(url)?;
    Ok(Html::parse_document(&body))
}

/// Save the image at `url` into `dir`, named after the URL's last segment.
/// Returns `Ok(None)` when the file already exists or the URL has no usable name.
pub fn download_image(fetcher: &dyn Fetcher, url: &str, dir: &Path) -> Result<Option<PathBuf>> {
    let Some(name) = file_name_from_url(url) else {
        tracing::debug!(url, "no file name in image url; skipping");
        return Ok(None);
    };
    let target = dir.join(name);
    if target.exists() {
        tracing::info!(path = %target.display(), "file already exists, skipping");
        return Ok(None);
    }
    fs::create_dir_all(dir)?;
    let bytes = fetcher.fetch_bytes(url)?;
    fs::write(&target, bytes)?;
    tracing::info!(path = %target.display(), "downloaded image");
    Ok(Some(target))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::Fetcher;
    use crate::error::{Error, Result};

    /// Canned pages keyed by URL; anything else is a fetch failure.
    #[derive(Default)]
    pub struct StubFetcher {
        pages: HashMap<String, String>,
        pub calls: AtomicUsize,
    }

    impl StubFetcher {
        pub fn with(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(s!(url), s!(body));
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::Relaxed)
        }
    }

    impl Fetcher for StubFetcher {
        fn fetch_text(&self, url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.pages.get(url).cloned().ok_or_else(|| Error::fetch(url, "HTTP 404 Not Found"))
        }

        fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
            self.fetch_text(url).map(String::into_bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubFetcher;
    use super::*;

    #[test]
    fn download_skips_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://leekduck.com/assets/img/events/cd.jpg";
        let fetcher = StubFetcher::default().with(url, "jpeg bytes");

        let first = download_image(&fetcher, url, dir.path()).unwrap();
        assert_eq!(first, Some(dir.path().join("cd.jpg")));
        assert_eq!(fs::read(dir.path().join("cd.jpg")).unwrap(), b"jpeg bytes");

        assert_eq!(download_image(&fetcher, url, dir.path()).unwrap(), None);
        assert_eq!(fetcher.calls(), 1);
    }

    #[test]
    fn failed_download_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = download_image(&StubFetcher::default(), "https://x/y.png", dir.path()).unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
        assert!(!dir.path().join("y.png").exists());
    }
}
