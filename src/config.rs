//! Queue configuration.
//!
//! Loaded from an optional `queue.yaml` in the queue's base directory:
//!
//! ```yaml
//! queued_dir: queued        # intake directory, relative to the base
//! run_dir: run              # archive root, relative to the base
//! extensions: [txt, md]     # recognized prompt extensions
//! seed_samples: false       # seed sample prompts when the queue is empty
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{QueueError, Result};

/// Name of the optional config file inside the base directory.
pub const CONFIG_FILE: &str = "queue.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    pub queued_dir: String,
    pub run_dir: String,
    /// Extensions without the leading dot, matched case-insensitively
    pub extensions: Vec<String>,
    pub seed_samples: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            queued_dir: "queued".to_string(),
            run_dir: "run".to_string(),
            extensions: vec!["txt".to_string(), "md".to_string()],
            seed_samples: false,
        }
    }
}

impl QueueConfig {
    /// Load `queue.yaml` from `base`, falling back to defaults when absent.
    pub fn load(base: &Path) -> Result<Self> {
        let path = base.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;
        // An empty file deserializes to unit, not a mapping
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&raw)
            .map_err(|e| QueueError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded queue config");
        Ok(config)
    }

    /// Whether `path` carries one of the configured extensions.
    pub fn is_prompt_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

/// Concrete directories of a queue rooted at a base directory.
#[derive(Debug, Clone)]
pub struct QueueLayout {
    pub queued: PathBuf,
    pub run: PathBuf,
}

impl QueueLayout {
    pub fn new(base: &Path, config: &QueueConfig) -> Self {
        Self {
            queued: base.join(&config.queued_dir),
            run: base.join(&config.run_dir),
        }
    }
}
