use crate::services::{BatchReport, UnitOutcome};
use crate::utils::error::DispatchError;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chatbatch")]
#[command(author, version, about = "Send chat completion batches to many endpoints at once", long_about = None)]
pub struct Cli {
    /// Path to the JSON batch file (default: ./config.json, then ~/.config/chatbatch/config.json)
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds (overrides REQUEST_TIMEOUT; default: none)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Do not print per-unit timing lines
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Stdout lines for one finished unit
///
/// Successful units print their reply. Any unit that got an HTTP response,
/// successful or not, also prints its elapsed time unless `quiet` is set.
pub fn outcome_lines(outcome: &UnitOutcome, quiet: bool) -> Vec<String> {
    let mut lines = Vec::new();

    let answered = match &outcome.result {
        Ok(reply) => {
            lines.push(reply.clone());
            true
        }
        Err(failure) => matches!(
            failure.error,
            DispatchError::RequestFailed { .. } | DispatchError::Decode(_) | DispatchError::MissingField(_)
        ),
    };

    if answered && !quiet {
        lines.push(format!("API call took {:?}", outcome.elapsed));
    }
    lines
}

/// Closing stdout lines for a finished batch
pub fn summary_lines(report: &BatchReport) -> Vec<String> {
    vec![
        format!(
            "Completed {} units: {} succeeded, {} failed",
            report.launched(),
            report.succeeded(),
            report.failed()
        ),
        format!("Total execution time: {:?}", report.total_elapsed),
    ]
}
