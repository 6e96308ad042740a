//! Prompt queue lifecycle
//!
//! Prompts wait in the intake directory (`queued/`). Processing a batch
//! classifies each one, moves it into a fresh timestamped directory under
//! the archive root (`run/`) and writes the selected artifacts next to it.
//! The archive directories together form the run history.

mod archive;
mod history;
mod samples;
mod scan;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::artifacts::{artifacts_for, DecisionArtifacts};
use crate::config::{QueueConfig, QueueLayout};
use crate::entity::{classify, ArchiveRecord, ExecutionRecord, QueuedPrompt, Topic};
use crate::error::{QueueError, Result};

pub use self::archive::{archive_dir_name, archive_prompt, METADATA_FILE};
pub use self::history::{read_history, HistoryEntry};
pub use self::samples::{seed_samples, SAMPLE_PROMPTS};
pub use self::scan::scan_pending;

/// Topic and artifacts chosen for one prompt
#[derive(Debug, Clone, Copy)]
pub struct ProcessingOutcome {
    pub topic: Topic,
    pub artifacts: DecisionArtifacts,
}

impl ProcessingOutcome {
    pub fn for_prompt(prompt: &QueuedPrompt) -> Self {
        let topic = classify(&prompt.body);
        Self {
            topic,
            artifacts: artifacts_for(topic),
        }
    }
}

/// Read and classify a prompt file anywhere on disk, leaving it in place.
pub fn inspect_prompt(path: &Path, config: &QueueConfig) -> Result<(QueuedPrompt, ProcessingOutcome)> {
    if !config.is_prompt_file(path) {
        return Err(QueueError::NotAPrompt(path.to_path_buf()));
    }
    let prompt = QueuedPrompt::read(path)?;
    let outcome = ProcessingOutcome::for_prompt(&prompt);
    Ok((prompt, outcome))
}

/// A prompt that could not be archived
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub file: PathBuf,
    pub error: String,
}

/// Everything one processing pass did
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub archived: Vec<ExecutionRecord>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Nothing was pending
    pub fn is_empty(&self) -> bool {
        self.archived.is_empty() && self.failures.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Handle on a queue's directories
pub struct PromptQueue {
    layout: QueueLayout,
    config: QueueConfig,
}

impl PromptQueue {
    /// Create the intake and archive directories if needed.
    pub fn init(base: &Path, config: QueueConfig) -> Result<Self> {
        let layout = QueueLayout::new(base, &config);
        fs::create_dir_all(&layout.queued)?;
        fs::create_dir_all(&layout.run)?;
        tracing::debug!(base = %base.display(), "queue layout ready");
        Ok(Self { layout, config })
    }

    /// Open an existing queue without touching the filesystem.
    pub fn open(base: &Path, config: QueueConfig) -> Result<Self> {
        let layout = QueueLayout::new(base, &config);
        if !layout.queued.is_dir() || !layout.run.is_dir() {
            return Err(QueueError::NotInitialized(base.to_path_buf()));
        }
        Ok(Self { layout, config })
    }

    pub fn layout(&self) -> &QueueLayout {
        &self.layout
    }

    /// Prompt files currently waiting, sorted by path
    pub fn pending(&self) -> Result<Vec<PathBuf>> {
        scan_pending(&self.layout.queued, &self.config)
    }

    /// Read and classify a single prompt without moving it.
    pub fn inspect(&self, path: &Path) -> Result<(QueuedPrompt, ProcessingOutcome)> {
        inspect_prompt(path, &self.config)
    }

    /// Archive one prompt, stamping it with `now`.
    pub fn process_one(&self, path: &Path, now: DateTime<Local>) -> Result<ArchiveRecord> {
        let (prompt, outcome) = self.inspect(path)?;
        let record = archive_prompt(
            &prompt,
            outcome.topic,
            &outcome.artifacts,
            &self.layout.run,
            now,
        )?;
        tracing::info!(
            prompt = %prompt.filename,
            topic = %outcome.topic,
            archive = %record.dir.display(),
            "processed prompt"
        );
        Ok(record)
    }

    /// Process every pending prompt once.
    pub fn process_all(&self) -> Result<BatchReport> {
        self.process_all_with(Local::now, |_| {})
    }

    /// Process every pending prompt, taking each timestamp from `clock` and
    /// handing each archived prompt to `on_archived` as soon as it is done.
    ///
    /// A failing prompt is recorded in the report and left for the operator;
    /// the remaining prompts are still processed.
    pub fn process_all_with<C, P>(&self, mut clock: C, mut on_archived: P) -> Result<BatchReport>
    where
        C: FnMut() -> DateTime<Local>,
        P: FnMut(&ExecutionRecord),
    {
        let pending = self.pending()?;
        let mut report = BatchReport::default();

        if pending.is_empty() {
            tracing::info!(dir = %self.layout.queued.display(), "no prompts found in queue");
            return Ok(report);
        }

        tracing::info!(count = pending.len(), "processing queued prompts");
        for path in pending {
            match self.process_one(&path, clock()) {
                Ok(record) => {
                    let execution = ExecutionRecord::from(&record);
                    on_archived(&execution);
                    report.archived.push(execution);
                }
                Err(e) => {
                    tracing::error!(prompt = %path.display(), error = %e, "failed to process prompt");
                    report.failures.push(BatchFailure {
                        file: path,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Run history, most recent first
    pub fn history(&self) -> Result<Vec<HistoryEntry>> {
        read_history(&self.layout.run)
    }

    /// Queue the sample prompts
    pub fn seed_samples(&self) -> Result<Vec<PathBuf>> {
        seed_samples(&self.layout.queued)
    }
}
