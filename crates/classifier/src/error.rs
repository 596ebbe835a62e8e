//! Classifier errors

use thiserror::Error;

/// Errors from building classification tables.
///
/// These only occur at table-build time; classification itself has no
/// failure modes. Every variant here is fatal for the run - a lookup table
/// that cannot be loaded means the traffic accounting would silently
/// misattribute everything.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// HTTP fetch of a lookup source failed
    #[error("lookup fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Lookup source body was not valid JSON
    #[error("lookup JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Lookup source file could not be read
    #[error("failed to read lookup file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Source format could not be determined or is not supported
    #[error("unsupported lookup format: {0}")]
    UnsupportedFormat(String),

    /// A delimiter-separated row did not carry the configured fields
    #[error("malformed lookup row {line}: {reason}")]
    BadRow { line: usize, reason: String },
}
