pub mod artifacts;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod queue;

pub use config::QueueConfig;
pub use error::{QueueError, Result};
pub use queue::PromptQueue;
