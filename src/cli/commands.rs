use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "breadcrumb")]
#[command(version, about = "A local-first decision log")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the decision log (overrides config and BREADCRUMB_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a new decision
    Add {
        /// What did you decide?
        decision: String,

        /// Why? The rationale behind the decision
        #[arg(long, short = 'c', default_value = "")]
        context: String,

        /// Read the context from stdin
        #[arg(long, conflicts_with = "context")]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List decisions, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search decisions and their context (case-insensitive)
    Search {
        /// Text to look for
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a decision
    Delete {
        /// Decision ID (full id or unique prefix like "a1b2c")
        id: String,
    },

    /// Export all decisions to a file
    Export {
        /// Export format (json, markdown)
        #[arg(long, short = 'f', default_value = "json")]
        format: String,

        /// Output directory (defaults to the configured export_dir)
        #[arg(long, short = 'o', value_name = "DIR")]
        out: Option<PathBuf>,
    },
}
