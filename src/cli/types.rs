//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "redline")]
#[command(about = "Redline - reviewed documentation edit engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Path to a config file (defaults to .redline/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize Redline configuration and storage
    Init {
        /// Force reinitialization even if already initialized
        #[arg(short, long)]
        force: bool,
    },

    /// Submit generator suggestions for review
    Submit {
        /// The change request that produced the suggestions
        #[arg(short, long)]
        query: String,

        /// User recorded on the batch
        #[arg(short, long)]
        user: Option<String>,

        /// JSON file holding the raw suggestions array
        #[arg(long)]
        suggestions: PathBuf,

        /// JSON manifest of candidate sections (overrides config)
        #[arg(long)]
        sections: Option<PathBuf>,
    },

    /// List batches awaiting review
    Pending {
        /// Only show this batch
        #[arg(short, long)]
        batch: Option<String>,
    },

    /// Approve suggestions in a batch and apply them to their files
    Approve {
        /// Batch ID
        batch_id: String,

        /// Suggestion IDs to approve (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
    },

    /// Reject suggestions in a batch
    Reject {
        /// Batch ID
        batch_id: String,

        /// Suggestion IDs to reject (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
    },

    /// List applied updates
    Applied,

    /// Show update statistics
    Stats,

    /// Revert one applied suggestion from its backup
    Revert {
        /// Suggestion ID
        suggestion_id: String,
    },

    /// Revert every applied suggestion and clear the applied store
    RevertAll,
}
