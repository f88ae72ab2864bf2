//! Install/update reconciliation for the par-launch launcher.
//!
//! Provides:
//! - `reconciler`: the state machine deciding install / reinstall / skip
//! - `http`: blocking HTTP collaborator (version oracle + archive download)
//! - `archive`: ZIP extraction into the install directory
//! - `launch`: detached start of the installed executable
//! - `error`: the error taxonomy shared by all of the above

pub mod archive;
pub mod error;
pub mod http;
pub mod launch;
pub mod reconciler;

// Re-export the public API so callers can use `par_launch_update::*`.
pub use error::UpdateError;
pub use http::HttpSource;
pub use launch::{AppLauncher, SystemLauncher};
pub use reconciler::{InstallState, PackageSource, Reconciler};
