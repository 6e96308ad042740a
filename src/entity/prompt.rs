use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{QueueError, Result};

/// Leading `# key: value` lines of a prompt, in first-seen order.
///
/// A repeated key overwrites the earlier value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptMetadata {
    entries: Vec<(String, String)>,
}

impl PromptMetadata {
    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PromptMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A prompt file found in the pending set.
#[derive(Debug, Clone, Serialize)]
pub struct QueuedPrompt {
    #[serde(skip)]
    pub path: PathBuf,
    pub filename: String,
    pub body: String,
    pub metadata: PromptMetadata,
    pub discovered_at: DateTime<Local>,
}

impl QueuedPrompt {
    /// Read and parse a prompt file. The file is left in place.
    pub fn read(path: &Path) -> Result<Self> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| QueueError::NotAPrompt(path.to_path_buf()))?
            .to_string();

        let content = fs::read_to_string(path)?;
        let (metadata, body) = parse_content(&content);

        Ok(Self {
            path: path.to_path_buf(),
            filename,
            body,
            metadata,
            discovered_at: Local::now(),
        })
    }

    /// File name without its extension
    pub fn stem(&self) -> &str {
        Path::new(&self.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.filename)
    }
}

/// Split raw prompt text into metadata and body.
///
/// - `#key: value` lines become metadata (key and value trimmed)
/// - lines made only of dashes (`---`) are dropped
/// - everything else, blank lines included, forms the body
pub fn parse_content(content: &str) -> (PromptMetadata, String) {
    let mut metadata = PromptMetadata::default();
    let mut body_lines = Vec::new();

    for line in content.trim().lines() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix('#') {
            if let Some((key, value)) = rest.split_once(':') {
                metadata.insert(key.trim().to_string(), value.trim().to_string());
                continue;
            }
        }

        if is_horizontal_rule(line) {
            continue;
        }

        body_lines.push(line);
    }

    (metadata, body_lines.join("\n").trim().to_string())
}

fn is_horizontal_rule(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}
