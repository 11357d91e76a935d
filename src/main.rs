//! # gdelt_rank
//!
//! Fetches news articles matching a keyword, time window, and optional
//! country from the GDELT DOC 2.0 API, cleans and ranks them by relevance to
//! the keyword, and prints the ranked set as a JSON array.
//!
//! ## Usage
//!
//! ```sh
//! gdelt_rank "earthquake damage" 3d Chile
//! ```
//!
//! ## Architecture
//!
//! A single pass, once per process:
//! 1. **Query**: build a validated filter from the positional arguments
//! 2. **Fetch**: one request to GDELT
//! 3. **Normalize**: drop duplicate URLs and titles, order by date, fill blanks
//! 4. **Score**: keyword matches in title, content, or excerpt (0 to 10)
//! 5. **Rank**: by score, then recency
//! 6. **Output**: JSON array on stdout, or a JSON error object on stderr
//!
//! Logs go to stderr; stdout carries nothing but the result.

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod error;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod query;
mod rank;
mod score;
mod sources;
mod utils;

use cli::Cli;
use config::Config;
use models::ArticleRecord;
use outputs::json::{self, ErrorReport};
use query::QueryFilter;
use sources::gdelt::GdeltClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // --- Tracing init (stderr: stdout is the payload) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let outcome = run(args).await;
    let code = finish(outcome, io::stdout().lock(), io::stderr().lock());
    debug!(elapsed = ?start_time.elapsed(), "Process exiting");
    code
}

/// Emit the result of a run and pick the process exit status.
///
/// Success writes the JSON array to `out` and exits 0. Any error, including a
/// failure to write `out`, writes one error object to `err` and exits 1.
/// Nothing is written to `out` on the error path.
fn finish(
    outcome: anyhow::Result<Vec<ArticleRecord>>,
    out: impl Write,
    mut err: impl Write,
) -> ExitCode {
    let outcome = outcome.and_then(|articles| {
        json::write_articles(out, &articles)
            .context("failed to write results to stdout")
            .map(|()| articles.len())
    });

    match outcome {
        Ok(count) => {
            info!(count, "Execution complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Execution failed");
            let report = ErrorReport::from_error(&e);
            if let Err(write_err) = json::write_error(&mut err, &report) {
                error!(error = %write_err, "Failed to write error report");
            }
            ExitCode::FAILURE
        }
    }
}

/// Everything between argument parsing and output. Any error ends the run.
async fn run(args: Cli) -> anyhow::Result<Vec<ArticleRecord>> {
    let config = Config::load(args.config.as_deref(), args.api_url.as_deref())
        .context("failed to load configuration")?;

    let filter = QueryFilter::build(
        args.keyword.as_deref(),
        args.timespan.as_deref(),
        args.country.as_deref(),
    );
    info!(
        keyword = %filter.keyword,
        timespan = %filter.timespan,
        country = ?filter.country,
        "Searching GDELT"
    );

    let client = GdeltClient::new(&config).context("failed to build GDELT client")?;
    let articles = pipeline::run(&client, &filter)
        .await
        .context("article search failed")?;
    Ok(articles)
}
