use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Queue not initialized at {0}. Run 'prompt-queue init' first.")]
    NotInitialized(PathBuf),

    #[error("Could not find a free archive directory for {0}")]
    ArchiveExists(PathBuf),

    #[error("Failed to move {from} to {to}: {source}")]
    Relocation {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} prompt(s) failed to process")]
    BatchFailed(usize),

    #[error("Prompt {0} has the same name as a generated artifact")]
    ReservedName(String),

    #[error("Not a prompt file: {0}")]
    NotAPrompt(PathBuf),

    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QueueError>;
