// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::event::EventType;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub cache: CacheOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Ignore a fresh cache and scrape anyway.
    pub force_update: bool,
    pub download_images: bool,
    pub assets_dir: PathBuf,
    pub workers: usize,
    /// Pause after each detail request, before jitter.
    pub request_pause_ms: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            force_update: false,
            download_images: false,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            workers: WORKERS,
            request_pause_ms: REQUEST_PAUSE_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheOptions {
    pub path: PathBuf,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_CACHE_FILE) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeSelector {
    /// Every known category (uncategorized listings are left out).
    Categorized,
    Only(Vec<EventType>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    out_path: OutputPath,
    pub types: TypeSelector,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_path: OutputPath::default(),
            types: TypeSelector::Categorized,
        }
    }
}

impl ExportOptions {
    /// Final calendar path. A user-supplied extension wins; otherwise `.ics`.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let name = match &self.out_path.extension {
            Some(ext) => join!(self.out_path.file_stem.to_string_lossy(), ".", &ext.to_string_lossy()),
            None => join!(self.out_path.file_stem.to_string_lossy(), ".ics"),
        };
        path.push(name);
        path
    }

    /// Split user text into dir + stem + optional extension.
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.extension = p.extension().map(|e| e.to_os_string());
    }

    pub fn types(&self) -> Vec<EventType> {
        match &self.types {
            TypeSelector::Categorized => EventType::all().to_vec(),
            TypeSelector::Only(v) => v.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString,
    extension: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        let p = Path::new(DEFAULT_CALENDAR_FILE);
        Self {
            dir: PathBuf::new(),
            file_stem: p.file_stem().map(|s| s.to_os_string()).unwrap_or_else(|| OsString::from("cal")),
            extension: p.extension().map(|e| e.to_os_string()),
        }
    }
}
