//! Process launch collaborator: start the installed executable and return
//! without waiting for it to exit.

use crate::error::UpdateError;
use std::path::Path;
use std::process::Command;

/// Seam for starting the installed application.
///
/// The production implementation spawns a real process; tests substitute a
/// recording fake so the reconciliation flow can run without side effects.
pub trait AppLauncher {
    /// Start the executable detached (fire-and-forget, no wait).
    fn start_detached(&self, executable: &Path) -> Result<(), UpdateError>;
}

/// Production [`AppLauncher`] backed by [`std::process::Command`].
///
/// The child's working directory is set to the executable's own directory,
/// since packaged applications commonly resolve assets relative to it. The
/// spawned child is dropped immediately; it keeps running independently of
/// the launcher process.
pub struct SystemLauncher;

impl AppLauncher for SystemLauncher {
    fn start_detached(&self, executable: &Path) -> Result<(), UpdateError> {
        let mut command = Command::new(executable);
        if let Some(dir) = executable.parent() {
            command.current_dir(dir);
        }

        command.spawn().map_err(|e| UpdateError::Launch {
            path: executable.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}
