use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::QueueConfig;
use crate::Result;

/// List prompt files directly inside `dir`, sorted by path.
///
/// Subdirectories are not descended into. A missing directory is an empty
/// pending set.
pub fn scan_pending(dir: &Path, config: &QueueConfig) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && config.is_prompt_file(&path) {
            files.push(path);
        }
    }
    files.sort();

    tracing::debug!(dir = %dir.display(), count = files.len(), "scanned pending set");
    Ok(files)
}
