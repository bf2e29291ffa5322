//! Error types for scan report ingestion.
//!
//! Policy evaluation itself is infallible: malformed or empty CSP strings
//! degrade into empty or partial results rather than errors.

/// Failure to ingest the external scanner's JSON report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("empty scan report")]
    Empty,

    #[error("malformed scan report: {0}")]
    Json(#[from] serde_json::Error),
}
