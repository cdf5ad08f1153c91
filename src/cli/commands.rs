//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default engine address
pub const DEFAULT_URL: &str = "http://localhost:9200";

/// Scan-and-scroll client for Elasticsearch
#[derive(Parser, Debug)]
#[command(name = "es-scroll")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Engine base URL (overrides the config file)
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Client configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(short, long, global = true)]
    pub timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream every matching hit as one JSON line
    Scan {
        #[command(flatten)]
        scroll: ScrollArgs,

        /// Print only each hit's _source
        #[arg(long)]
        source_only: bool,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Drain a scroll and report the number of hits received
    Count {
        #[command(flatten)]
        scroll: ScrollArgs,
    },
}

/// Arguments shared by every scroll command
#[derive(Args, Debug, Clone)]
pub struct ScrollArgs {
    /// Index to scan
    #[arg(short, long)]
    pub index: String,

    /// Document type within the index
    #[arg(short, long)]
    pub doc_type: String,

    /// Scroll context expiry in seconds
    #[arg(short, long, default_value = "60")]
    pub expiry: u64,

    /// Inline query JSON
    #[arg(short, long, conflicts_with = "query_file")]
    pub query: Option<String>,

    /// File containing the query JSON
    #[arg(long)]
    pub query_file: Option<PathBuf>,
}
