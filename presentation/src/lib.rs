//! Presentation layer for atlassian-tools
//!
//! This crate contains the CLI definition and the JSON responses it prints.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{CategoryArg, Cli, Operation};
pub use output::json::{ListResponse, SchemaResponse, SearchResponse, invalid_input, render, succeeded};
