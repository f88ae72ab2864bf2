//! Configuration system for the par-launch self-updating launcher.
//!
//! This crate provides loading and validation for the launcher's JSON
//! configuration document:
//!
//! - Remote locations of the package archive and version marker
//! - Local layout of the managed installation (install dir, executable,
//!   cached version marker)
//! - Presentation strings used in log output

pub mod config;
pub mod error;

// Re-export main types for convenience
pub use config::{ARCHIVE_FILE_NAME, CONFIG_FILE_NAME, LauncherConfig};
pub use error::ConfigError;
