//! Typed error types for par-launch-update.
//!
//! This module provides structured error types so callers at the crate
//! boundary can match on specific failure categories instead of relying on
//! opaque `anyhow` strings. Every variant carries the path or URL it failed
//! on; none of them is retried, since the first error aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the install/update reconciliation.
///
/// Covers the failure categories a caller may want to distinguish:
/// - Configuration (missing/invalid config document)
/// - Network (transport failures and HTTP error statuses)
/// - Filesystem (directory setup, removal, file read/write)
/// - Archive (corrupt or unreadable package archive)
/// - Launch (executable missing or not runnable)
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The configuration document could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] par_launch_config::ConfigError),

    /// A URL was rejected before any request was made.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An HTTP request failed: DNS, connection, TLS, timeout, or a non-2xx
    /// response status.
    #[error("request to '{url}' failed: {source}")]
    Network {
        /// URL of the failed request.
        url: String,
        /// Underlying transport error. Boxed because `ureq::Error` is large.
        #[source]
        source: Box<ureq::Error>,
    },

    /// Reading the response body failed or exceeded the size limit.
    #[error("failed to read response from '{url}': {source}")]
    Transfer {
        /// URL the body was being read from.
        url: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A filesystem operation failed.
    #[error("filesystem operation failed for '{}': {source}", .path.display())]
    Filesystem {
        /// Path the operation was performed on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The downloaded package archive is corrupt or could not be extracted.
    #[error("failed to extract archive '{}': {source}", .path.display())]
    Archive {
        /// Path of the archive being extracted.
        path: PathBuf,
        /// Underlying ZIP error.
        #[source]
        source: zip::result::ZipError,
    },

    /// The installed executable could not be started.
    #[error("failed to launch '{}': {source}", .path.display())]
    Launch {
        /// Path of the executable.
        path: PathBuf,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },
}

impl UpdateError {
    /// Shorthand for a [`UpdateError::Filesystem`] variant.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UpdateError::Filesystem {
            path: path.into(),
            source,
        }
    }
}
