use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::artifacts;
use crate::config::QueueConfig;
use crate::entity::{ExecutionRecord, PromptMetadata, Topic};
use crate::error::{QueueError, Result};
use crate::queue::{inspect_prompt, BatchReport, PromptQueue};

const RULE_WIDTH: usize = 50;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn open_queue(base: &Path) -> Result<PromptQueue> {
    let config = QueueConfig::load(base)?;
    PromptQueue::open(base, config)
}

pub fn handle_init(base: PathBuf) -> Result<()> {
    let config = QueueConfig::load(&base)?;
    let queue = PromptQueue::init(&base, config)?;

    println!("Initialized prompt queue in {}", base.display());
    println!("  queued: {}", queue.layout().queued.display());
    println!("  run:    {}", queue.layout().run.display());

    Ok(())
}

pub fn handle_run(base: PathBuf, seed: bool, json: bool) -> Result<()> {
    let config = QueueConfig::load(&base)?;
    let seed = seed || config.seed_samples;
    let queue = PromptQueue::init(&base, config)?;

    if seed && queue.pending()?.is_empty() {
        if !json {
            println!("Queue is empty. Creating sample prompts...");
        }
        for path in queue.seed_samples()? {
            if !json {
                println!("Created sample prompt: {}", file_name(&path));
            }
        }
    }

    let report = if json {
        queue.process_all()?
    } else {
        let pending = queue.pending()?.len();
        if pending > 0 {
            println!("Processing {} prompts...", pending);
        }
        queue.process_all_with(chrono::Local::now, print_progress)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_empty() {
        println!("No prompts found in queue.");
    } else {
        print_summary(&report);
    }

    if report.has_failures() {
        for failure in &report.failures {
            eprintln!("Failed: {} ({})", failure.file.display(), failure.error);
        }
        return Err(QueueError::BatchFailed(report.failures.len()));
    }

    Ok(())
}

fn print_progress(record: &ExecutionRecord) {
    println!("Processing: {}", record.original_file);
    println!("  ✓ Generated: {}", file_name(&record.files_created.logic_file));
    println!("  ✓ Generated: {}", file_name(&record.files_created.mermaid_file));
    println!();
}

fn print_summary(report: &BatchReport) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("PROCESSING SUMMARY");
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Prompts processed: {}", report.archived.len());

    for record in &report.archived {
        println!("\n{} -> {}", record.original_file, record.topic);
        println!("  Files created:");
        for path in record.files_created.generated() {
            println!("    - {}", path.display());
        }
    }

    if report.has_failures() {
        println!("\nPrompts failed: {}", report.failures.len());
    }
}

pub fn handle_pending(base: PathBuf, json: bool) -> Result<()> {
    let queue = open_queue(&base)?;
    let pending = queue.pending()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pending)?);
        return Ok(());
    }

    if pending.is_empty() {
        println!("No prompts found in queue.");
        return Ok(());
    }

    println!("{} queued prompt(s):", pending.len());
    for path in &pending {
        println!("  {}", file_name(path));
    }

    Ok(())
}

pub fn handle_history(base: PathBuf, topic: Option<String>, json: bool) -> Result<()> {
    let topic = topic.map(|t| t.parse::<Topic>()).transpose()?;
    let queue = open_queue(&base)?;
    let mut history = queue.history()?;
    if let Some(topic) = topic {
        history.retain(|entry| entry.metadata.topic == topic);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No processed prompts.");
        return Ok(());
    }

    for entry in &history {
        println!(
            "{}  {} -> {}  ({})",
            entry.archive,
            entry.metadata.original_prompt,
            entry.metadata.topic,
            entry.metadata.processed_at
        );
    }

    Ok(())
}

pub fn handle_seed(base: PathBuf) -> Result<()> {
    let config = QueueConfig::load(&base)?;
    let queue = PromptQueue::init(&base, config)?;

    let written = queue.seed_samples()?;
    if written.is_empty() {
        println!("Sample prompts already queued.");
    }
    for path in &written {
        println!("Created sample prompt: {}", file_name(path));
    }

    Ok(())
}

pub fn handle_export(out: PathBuf) -> Result<()> {
    let written = artifacts::export_all(&out)?;

    println!("Generated {} files in {}:", written.len(), out.display());
    for path in &written {
        println!("  - {}", path.display());
    }

    Ok(())
}

#[derive(Serialize)]
struct Classification<'a> {
    filename: &'a str,
    topic: Topic,
    metadata: &'a PromptMetadata,
}

pub fn handle_classify(base: PathBuf, file: PathBuf, json: bool) -> Result<()> {
    let config = QueueConfig::load(&base)?;
    let (prompt, outcome) = inspect_prompt(&file, &config)?;

    if json {
        let classification = Classification {
            filename: &prompt.filename,
            topic: outcome.topic,
            metadata: &prompt.metadata,
        };
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    println!("{} -> {}", prompt.filename, outcome.topic);
    for (key, value) in prompt.metadata.iter() {
        println!("  {}: {}", key, value);
    }

    Ok(())
}
