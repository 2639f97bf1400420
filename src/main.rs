//! Chat Batch CLI
//!
//! Sends every message batch of a JSON config to every configured endpoint
//! concurrently, prints replies as they arrive, and reports timing

use anyhow::{Context, Result};
use chatbatch::cli::{outcome_lines, summary_lines, Cli};
use chatbatch::utils::logging::init_logging;
use chatbatch::{BatchConfig, BatchDispatcher, ChatClient, EnvCredentials, Settings};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load runtime settings from environment (logging, client timeout)
    let settings = Settings::new()
        .context("Failed to load runtime settings")?
        .with_timeout(cli.timeout)
        .context("Invalid --timeout")?;

    init_logging(&settings.logging)?;
    info!("{}", chatbatch::version_info());

    let config = match &cli.config {
        Some(path) => BatchConfig::load(path),
        None => BatchConfig::load_default(),
    }
    .context("Failed to load batch configuration")?;

    let client = ChatClient::new(&settings.client)?;
    let dispatcher = BatchDispatcher::new(client, Arc::new(EnvCredentials));

    let quiet = cli.quiet;
    let report = dispatcher
        .run_with(&config, |outcome| {
            for line in outcome_lines(outcome, quiet) {
                println!("{}", line);
            }
        })
        .await
        .context("Failed to plan batch")?;

    for line in summary_lines(&report) {
        println!("{}", line);
    }

    Ok(())
}
