//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// TROCCO API client
#[derive(Parser, Debug)]
#[command(name = "trocco-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// TROCCO API key
    #[arg(long, global = true, env = "TROCCO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the API base URL from the config
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single resource (one request, no pagination)
    Get {
        /// API path, e.g. /api/jobs/123
        path: String,

        /// Query parameter (repeatable)
        #[arg(short, long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,
    },

    /// Fetch items from a paginated list endpoint
    List(ListArgs),

    /// Show the effective configuration
    Config,
}

/// Arguments for `list`
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// API path, e.g. /api/teams
    pub path: String,

    /// Query parameter (repeatable)
    #[arg(short, long = "query", value_name = "KEY=VALUE")]
    pub query: Vec<String>,

    /// Fetch every page
    #[arg(long, conflicts_with = "count")]
    pub fetch_all: bool,

    /// Fetch at least this many items
    #[arg(long)]
    pub count: Option<usize>,

    /// Largest page size the endpoint accepts (defaults to the config value)
    #[arg(long)]
    pub page_size_ceiling: Option<u32>,

    /// Start from this cursor instead of the first page
    #[arg(long)]
    pub cursor: Option<String>,

    /// Abort after this many pages (defaults to the config value)
    #[arg(long)]
    pub max_pages: Option<usize>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}
