use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::entity::ExecutionMetadata;
use crate::Result;

use super::archive::METADATA_FILE;

/// One archive directory as seen by the history reader.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// Archive directory name, e.g. `20240101_120000_note`
    pub archive: String,
    #[serde(flatten)]
    pub metadata: ExecutionMetadata,
}

/// Read every archive under `run_dir`, most recent first.
///
/// Directories without a metadata document are skipped, as are documents
/// that cannot be read or parsed.
pub fn read_history(run_dir: &Path) -> Result<Vec<HistoryEntry>> {
    let entries = match fs::read_dir(run_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    // Names start with a sortable timestamp
    dirs.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

    let mut history = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let metadata_path = dir.join(METADATA_FILE);
        if !metadata_path.is_file() {
            continue;
        }

        let parsed = fs::read_to_string(&metadata_path)
            .map_err(|e| e.to_string())
            .and_then(|raw| {
                serde_json::from_str::<ExecutionMetadata>(&raw).map_err(|e| e.to_string())
            });

        match parsed {
            Ok(metadata) => history.push(HistoryEntry {
                archive: dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                metadata,
            }),
            Err(e) => {
                tracing::warn!(path = %metadata_path.display(), error = %e, "skipping unreadable archive record");
            }
        }
    }

    Ok(history)
}
