//! LilyPad - word-ladder puzzles
//!
//! Play in the terminal, look up a ladder, or serve sessions over HTTP.

use anyhow::Result;
use clap::Parser;
use lilypad::{Cli, Command, Shell, solve_words};
use lilypad_oracle::{HttpOracle, LilypadConfig};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,lilypad=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let oracle = Arc::new(HttpOracle::new(config.oracle())?);

    match cli.command {
        Command::Play { start, end } => run_play(oracle, start.zip(end)).await,
        Command::Solve { start, end } => run_solve(oracle, &start, &end).await,
        Command::Serve { .. } => run_serve(&config, oracle).await,
    }
}

/// Run the terminal shell
#[instrument(skip(oracle))]
async fn run_play(oracle: Arc<HttpOracle>, words: Option<(String, String)>) -> Result<()> {
    let shell = Shell::new(oracle);
    let opening = match words {
        Some((start, end)) => shell.start_with_words(&start, &end).await,
        None => shell.start(None).await,
    };
    println!("{}\nType 'help' for commands.", opening);

    shell
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(())
}

/// Print a shortest ladder
#[instrument(skip(oracle))]
async fn run_solve(oracle: Arc<HttpOracle>, start: &str, end: &str) -> Result<()> {
    let report = solve_words(oracle.as_ref(), start, end).await?;
    println!("{}", report);
    Ok(())
}

/// Run the REST session service
#[instrument(skip_all)]
async fn run_serve(config: &LilypadConfig, oracle: Arc<HttpOracle>) -> Result<()> {
    let addr = config.server().bind_addr();
    info!(addr = %addr, oracle = %oracle.base_url(), "Starting session service");
    lilypad_server::serve(&addr, oracle).await?;
    Ok(())
}
