//! Moving a processed prompt into its archive directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat};

use crate::artifacts::{DecisionArtifacts, FLOWCHART_FILE, LOGIC_FILE};
use crate::entity::{ArchiveRecord, ExecutionMetadata, QueuedPrompt, Topic};
use crate::error::{QueueError, Result};

/// File name of the metadata document inside an archive directory
pub const METADATA_FILE: &str = "execution_metadata.json";

/// Upper bound on `_N` suffixes tried for one archive name
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// `<YYYYmmdd_HHMMSS>_<stem>`
pub fn archive_dir_name(now: &DateTime<Local>, stem: &str) -> String {
    format!("{}_{}", now.format("%Y%m%d_%H%M%S"), stem)
}

/// Archive `prompt` under `run_dir`.
///
/// Creates a fresh directory, moves the prompt file into it and writes the
/// two artifacts plus the metadata document. On failure the directory is
/// removed and the prompt is returned to where it was found.
///
/// A prompt named like one of the generated files is refused before
/// anything moves.
pub fn archive_prompt(
    prompt: &QueuedPrompt,
    topic: Topic,
    artifacts: &DecisionArtifacts,
    run_dir: &Path,
    now: DateTime<Local>,
) -> Result<ArchiveRecord> {
    archive_with_writer(prompt, topic, artifacts, run_dir, now, write_outputs)
}

fn archive_with_writer<W>(
    prompt: &QueuedPrompt,
    topic: Topic,
    artifacts: &DecisionArtifacts,
    run_dir: &Path,
    now: DateTime<Local>,
    write: W,
) -> Result<ArchiveRecord>
where
    W: FnOnce(&Path, &DecisionArtifacts, &ExecutionMetadata) -> Result<()>,
{
    if is_reserved_name(&prompt.filename) {
        return Err(QueueError::ReservedName(prompt.filename.clone()));
    }

    let dir = create_unique_dir(run_dir, &archive_dir_name(&now, prompt.stem()))?;

    let prompt_file = dir.join(&prompt.filename);
    if let Err(e) = relocate(&prompt.path, &prompt_file) {
        remove_archive_dir(&dir);
        return Err(e);
    }

    let metadata = ExecutionMetadata {
        original_prompt: prompt.filename.clone(),
        processed_at: now.to_rfc3339_opts(SecondsFormat::Micros, false),
        topic,
        files_generated: vec![LOGIC_FILE.to_string(), FLOWCHART_FILE.to_string()],
    };

    match write(&dir, artifacts, &metadata) {
        Ok(()) => Ok(ArchiveRecord {
            logic_file: dir.join(LOGIC_FILE),
            flowchart_file: dir.join(FLOWCHART_FILE),
            metadata_file: dir.join(METADATA_FILE),
            prompt_file,
            dir,
            metadata,
        }),
        Err(e) => {
            if let Err(restore) = relocate(&prompt_file, &prompt.path) {
                tracing::warn!(
                    prompt = %prompt_file.display(),
                    error = %restore,
                    "could not return prompt to the queue"
                );
                return Err(e);
            }
            remove_archive_dir(&dir);
            Err(e)
        }
    }
}

/// Names the archive writes itself. Compared case-insensitively so a
/// case-folding filesystem cannot alias them either.
fn is_reserved_name(filename: &str) -> bool {
    [LOGIC_FILE, FLOWCHART_FILE, METADATA_FILE]
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(filename))
}

fn write_outputs(dir: &Path, artifacts: &DecisionArtifacts, metadata: &ExecutionMetadata) -> Result<()> {
    fs::write(dir.join(LOGIC_FILE), artifacts.logic)?;
    fs::write(dir.join(FLOWCHART_FILE), artifacts.flowchart)?;
    fs::write(dir.join(METADATA_FILE), serde_json::to_string_pretty(metadata)?)?;
    Ok(())
}

/// Create `run_dir/name`, or `name_2`, `name_3`, ... if it is taken.
///
/// Uses `create_dir` so an existing directory is never reused.
fn create_unique_dir(run_dir: &Path, name: &str) -> Result<PathBuf> {
    for attempt in 1..=MAX_NAME_ATTEMPTS {
        let candidate = if attempt == 1 {
            run_dir.join(name)
        } else {
            run_dir.join(format!("{}_{}", name, attempt))
        };

        match fs::create_dir(&candidate) {
            Ok(()) => {
                if attempt > 1 {
                    tracing::warn!(dir = %candidate.display(), "archive name taken, using suffix");
                }
                return Ok(candidate);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Err(QueueError::ArchiveExists(run_dir.join(name)))
}

/// Move a file, falling back to copy + remove when rename is refused
/// (e.g. across filesystems).
fn relocate(from: &Path, to: &Path) -> Result<()> {
    let rename_err = match fs::rename(from, to) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    let relocation_error = |source: io::Error| QueueError::Relocation {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    if !from.is_file() {
        return Err(relocation_error(rename_err));
    }

    if let Err(e) = fs::copy(from, to) {
        let _ = fs::remove_file(to);
        return Err(relocation_error(e));
    }
    if let Err(e) = fs::remove_file(from) {
        // Keep exactly one copy: the original
        let _ = fs::remove_file(to);
        return Err(relocation_error(e));
    }
    Ok(())
}

fn remove_archive_dir(dir: &Path) {
    if let Err(e) = fs::remove_dir_all(dir) {
        tracing::warn!(dir = %dir.display(), error = %e, "could not remove partial archive");
    }
}
