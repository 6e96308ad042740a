use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Topic;

/// Contents of `execution_metadata.json` in an archive directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    pub original_prompt: String,
    /// ISO-8601 timestamp of when the prompt was processed
    pub processed_at: String,
    pub topic: Topic,
    /// Generated artifact file names, excluding the relocated prompt
    pub files_generated: Vec<String>,
}

/// An archive directory produced for one processed prompt.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveRecord {
    pub dir: PathBuf,
    pub prompt_file: PathBuf,
    pub logic_file: PathBuf,
    pub flowchart_file: PathBuf,
    pub metadata_file: PathBuf,
    pub metadata: ExecutionMetadata,
}

/// Paths written for one prompt, keyed the way the batch report names them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilesCreated {
    pub prompt_file: PathBuf,
    pub logic_file: PathBuf,
    pub mermaid_file: PathBuf,
    pub metadata_file: PathBuf,
}

impl FilesCreated {
    /// Generated files, leaving out the relocated prompt
    pub fn generated(&self) -> [&PathBuf; 3] {
        [&self.logic_file, &self.mermaid_file, &self.metadata_file]
    }
}

/// Batch report entry for one archived prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionRecord {
    pub original_file: String,
    pub topic: Topic,
    pub files_created: FilesCreated,
    pub processed_at: String,
}

impl From<&ArchiveRecord> for ExecutionRecord {
    fn from(record: &ArchiveRecord) -> Self {
        Self {
            original_file: record.metadata.original_prompt.clone(),
            topic: record.metadata.topic,
            files_created: FilesCreated {
                prompt_file: record.prompt_file.clone(),
                logic_file: record.logic_file.clone(),
                mermaid_file: record.flowchart_file.clone(),
                metadata_file: record.metadata_file.clone(),
            },
            processed_at: record.metadata.processed_at.clone(),
        }
    }
}
