//! CLI module
//!
//! Command-line interface for calling the TROCCO API.
//!
//! # Commands
//!
//! - `get` - Fetch one resource
//! - `list` - Fetch items from a paginated endpoint
//! - `config` - Show the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, ListArgs, OutputFormat};
pub use runner::Runner;
