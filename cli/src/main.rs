//! CLI entrypoint for atlassian-tools
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use atlassian_application::{ExecuteToolUseCase, ToolRegistry, list_tools, search_tools};
use atlassian_infrastructure::{AtlassianModuleResolver, ConfigLoader};
use atlassian_presentation::{
    Cli, ListResponse, Operation, SchemaResponse, SearchResponse, invalid_input, render, succeeded,
};
use clap::{CommandFactory, Parser};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Exit code for an interrupted run (128 + SIGINT)
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG takes precedence.
    // Logs go to stderr so stdout stays pure JSON.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tokio::select! {
        outcome = run(cli) => match outcome {
            Ok(code) => code,
            Err(e) => {
                let report = json!({"success": false, "error": format!("Unexpected error: {e:#}")});
                eprintln!("{}", render(&report));
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted by user");
            ExitCode::from(EXIT_INTERRUPTED)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let operation = cli.operation();
    if operation == Operation::Help {
        Cli::command().print_help().context("Failed to print help")?;
        return Ok(ExitCode::FAILURE);
    }

    // === Dependency Injection ===
    // Configuration problems surface inside tool output, not here
    let resolver = Arc::new(AtlassianModuleResolver::from_config(ConfigLoader::load(
        cli.config.as_deref(),
    )));
    let registry = Arc::new(ToolRegistry::new(resolver));
    let engine = ExecuteToolUseCase::new(Arc::clone(&registry));

    let code = match operation {
        Operation::ListTools { category } => {
            print_response(&ListResponse::new(list_tools(&registry, category), category))
        }
        Operation::Search { query } => {
            print_response(&SearchResponse::new(search_tools(&registry, &query), &query))
        }
        Operation::Schema { tool } => {
            print_response(&SchemaResponse::new(&tool, registry.get_metadata(&tool)))
        }
        Operation::Execute { tool, input } => {
            info!(tool = %tool, "Executing tool from command line");
            print_response(&engine.execute(&tool, input).await)
        }
        Operation::InvalidInput { tool, message } => {
            eprintln!("{}", render(&invalid_input(&tool, &message)));
            ExitCode::FAILURE
        }
        Operation::Help => ExitCode::FAILURE,
    };

    Ok(code)
}

/// Print a response to stdout; exit status follows its `success` flag
fn print_response<T: Serialize>(response: &T) -> ExitCode {
    println!("{}", render(response));
    if succeeded(response) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
