mod prompt;
mod record;
mod topic;

pub use prompt::{parse_content, PromptMetadata, QueuedPrompt};
pub use record::{ArchiveRecord, ExecutionMetadata, ExecutionRecord, FilesCreated};
pub use topic::{classify, Topic};
