//! Wordscope CLI - command-line client for the document analysis service.
//!
//! # Usage
//!
//! ```bash
//! # Analyze a document
//! ws upload notes.txt
//!
//! # List and reopen previous analyses
//! ws history -n 5
//! ws show 3f2a9c1e
//!
//! # Machine-readable output, custom service
//! ws --api-url http://analysis.internal:8000 history --json
//! ```

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wordscope_core::config::{API_URL_ENV, DEFAULT_HISTORY_LIMIT};

/// Wordscope document analysis client.
///
/// Uploads text documents to the analysis service and shows word counts,
/// sentence statistics and readability scores. Shares its history with the
/// Wordscope web app.
#[derive(Parser)]
#[command(name = "ws", version, about)]
struct Cli {
    /// Base URL of the analysis service
    #[arg(long, global = true, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a .txt file and print its metrics
    Upload {
        /// Path to the document
        path: PathBuf,
    },
    /// List previously analyzed documents, most recent first
    History {
        /// Maximum number of entries
        #[arg(short = 'n', long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },
    /// Show the stored metrics for a document
    Show {
        /// Identifier printed by `upload` or `history`
        file_id: String,
    },
    /// Check that the service is reachable
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = config::build_config(cli.api_url.as_deref());
    let client = commands::client(config);

    let rendered = match cli.command {
        Command::Upload { path } => {
            let report = commands::upload(&client, &path).await?;
            output::render_analysis(&report, cli.json)
        }
        Command::History { limit } => {
            let entries = commands::history(&client, limit).await?;
            output::render_history(&entries, cli.json)
        }
        Command::Show { file_id } => {
            let report = commands::show(&client, &file_id).await?;
            output::render_analysis(&report, cli.json)
        }
        Command::Health => {
            commands::health(&client).await?;
            output::render_health(client.config().base_url(), cli.json)
        }
    };

    println!("{}", rendered);
    Ok(())
}
