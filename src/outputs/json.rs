//! JSON output for ranked articles and for failures.
//!
//! # Success
//!
//! One array on stdout, one element per article:
//!
//! ```text
//! [{"url":"...","title":"...","seenDate":"20250506T143000Z","relevanceScore":7.0}]
//! ```
//!
//! # Failure
//!
//! One object on stderr:
//!
//! ```text
//! {"message":"...","trace":"...","timestamp":"2025-05-06T16:30:00.123+02:00"}
//! ```

use crate::models::ArticleRecord;
use chrono::Local;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, instrument};

/// Serialize `articles` as a single JSON array and write it to `out`.
///
/// The array is fully rendered before the first byte is written, so a
/// serialization error leaves `out` untouched.
///
/// # Arguments
///
/// * `out` - Destination, normally locked stdout
/// * `articles` - Ranked articles; an empty slice writes `[]`
///
/// # Returns
///
/// `Ok(())` once the array and its trailing newline are written.
#[instrument(level = "debug", skip_all, fields(count = articles.len()))]
pub fn write_articles<W: Write>(mut out: W, articles: &[ArticleRecord]) -> std::io::Result<()> {
    let mut buf = serde_json::to_vec(articles)?;
    buf.push(b'\n');
    out.write_all(&buf)?;
    out.flush()?;
    debug!(bytes = buf.len(), "Wrote article array");
    Ok(())
}

/// Structured description of an unrecoverable failure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    /// Top-level error message.
    pub message: String,
    /// Full cause chain, plus a backtrace when `RUST_BACKTRACE` enables one.
    pub trace: String,
    /// Local time of the failure, RFC 3339.
    pub timestamp: String,
}

impl ErrorReport {
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self {
            message: err.to_string(),
            trace: format!("{err:?}"),
            timestamp: Local::now().to_rfc3339(),
        }
    }
}

/// Write `report` as a single JSON object line to `out`.
pub fn write_error<W: Write>(mut out: W, report: &ErrorReport) -> std::io::Result<()> {
    let mut buf = serde_json::to_vec(report)?;
    buf.push(b'\n');
    out.write_all(&buf)?;
    out.flush()
}
