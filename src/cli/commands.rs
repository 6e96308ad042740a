use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "prompt-queue")]
#[command(version, about = "Archive queued decision prompts with their logic and flowchart")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Queue base directory (holds queued/, run/ and queue.yaml)
    #[arg(long, global = true, env = "PROMPT_QUEUE_DIR", default_value = "./prompts")]
    pub base: PathBuf,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the queued/ and run/ directories
    Init,

    /// Process every queued prompt and archive it under run/
    Run {
        /// Queue the sample prompts first if nothing is pending
        #[arg(long)]
        seed: bool,

        /// Output the batch report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List prompts waiting in the queue
    Pending {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show processed prompts, most recent first
    History {
        /// Only show prompts classified under this topic (e.g. emergency_room)
        #[arg(long)]
        topic: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Queue the sample prompts
    Seed,

    /// Write the logic and flowchart templates of every topic to a directory
    Export {
        /// Output directory
        #[arg(long, default_value = "./decision_outputs")]
        out: PathBuf,
    },

    /// Show how a prompt file would be classified, without moving it
    Classify {
        /// Prompt file (.txt or .md)
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
