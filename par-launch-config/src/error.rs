//! Typed error variants for the par-launch-config crate.
//!
//! Structured error types for config I/O and validation so callers can match
//! on specific failure modes instead of opaque strings.

use std::fmt;

/// Errors that can occur when loading or validating the launcher
/// configuration.
///
/// Produced by [`crate::config::LauncherConfig::load`] and the validation
/// helpers it calls. The binary crate propagates these through `anyhow`,
/// which coerces them via the blanket `From` impl for `std::error::Error`.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred reading the config file.
    Io(std::io::Error),

    /// The config file contained invalid JSON or was missing required fields.
    Parse(serde_json::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the field and describes why it is invalid.
    Validation(String),

    /// A configured relative path resolved outside its base directory,
    /// indicating a potential directory traversal attempt.
    ///
    /// The inner string includes the offending field and path.
    PathTraversal(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error reading config: {e}"),
            ConfigError::Parse(e) => write!(f, "JSON parse error in config: {e}"),
            ConfigError::Validation(msg) => write!(f, "Config validation error: {msg}"),
            ConfigError::PathTraversal(msg) => write!(f, "Path traversal detected: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) | ConfigError::PathTraversal(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
