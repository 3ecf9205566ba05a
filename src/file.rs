// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::Path,
};

use crate::error::Result;

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        let msg = format!("Path exists but is not a directory: {}", dir.display());
        return Err(io::Error::new(io::ErrorKind::AlreadyExists, msg).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Ensure parent dir exists; a bare file name needs nothing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// Ensure parent dir exists; create/truncate file.
pub fn create_buffered(path: &Path) -> Result<BufWriter<File>> {
    ensure_parent_dir(path)?;
    let file = File::create(path)?; // truncate/overwrite
    Ok(BufWriter::new(file))
}
