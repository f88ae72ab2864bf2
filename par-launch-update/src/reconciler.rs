//! Install/update reconciliation for the managed application.
//!
//! This module is the heart of the launcher: it classifies the local
//! installation against the remote version oracle and converges it by
//! installing, reinstalling, or doing nothing, before the executable is
//! started. Control flow is strictly linear and blocking; the first error at
//! any step aborts the whole run.

use crate::archive;
use crate::error::UpdateError;
use crate::launch::AppLauncher;
use par_launch_config::LauncherConfig;
use std::path::{Path, PathBuf};

/// Seam for the remote side of reconciliation: the package archive download
/// and the plain-text version oracle.
///
/// The production implementation is [`crate::http::HttpSource`]; tests
/// substitute an in-memory fake.
pub trait PackageSource {
    /// Fetch a small plain-text resource (the remote version marker).
    fn fetch_text(&self, url: &str) -> Result<String, UpdateError>;

    /// Download a resource to a local file, overwriting any existing file at
    /// the destination.
    fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<(), UpdateError>;
}

/// Classification of the local installation, computed fresh on every run
/// from the filesystem and the version oracle. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallState {
    /// The executable does not exist; nothing is installed.
    Absent,
    /// The executable exists but the local version marker is missing, so the
    /// installed version is unknown and a reinstall is forced.
    MarkerMissing,
    /// The local version marker differs from the remote version.
    Stale {
        /// Version recorded by the local marker.
        local: String,
        /// Version reported by the remote oracle.
        remote: String,
    },
    /// The local version marker equals the remote version.
    Current {
        /// The shared version string.
        version: String,
    },
}

/// Drives the install/update/launch sequence for one managed application.
///
/// Holds the immutable configuration, the data directory all relative paths
/// resolve against, and the two injected collaborators.
pub struct Reconciler<'a, S: PackageSource, L: AppLauncher> {
    config: &'a LauncherConfig,
    data_root: &'a Path,
    source: S,
    launcher: L,
}

impl<'a, S: PackageSource, L: AppLauncher> Reconciler<'a, S, L> {
    pub fn new(config: &'a LauncherConfig, data_root: &'a Path, source: S, launcher: L) -> Self {
        Self {
            config,
            data_root,
            source,
            launcher,
        }
    }

    /// Perform the full sequence: converge the installation, then launch.
    pub fn run(&self) -> Result<InstallState, UpdateError> {
        let state = self.reconcile()?;
        self.launch()?;
        Ok(state)
    }

    /// Converge the local installation to the remote state without
    /// launching. Returns the classification observed before converging.
    pub fn reconcile(&self) -> Result<InstallState, UpdateError> {
        self.setup_directories()?;

        let state = self.classify()?;
        match &state {
            InstallState::Absent => {
                log::info!(
                    "Install required: {} was not found",
                    self.executable_path().display()
                );
                self.install()?;
            }
            InstallState::MarkerMissing => {
                log::warn!(
                    "The {} seems to be installed, but its version marker was not found; \
                     a reinstall will be performed",
                    self.config.prefix
                );
                self.reinstall()?;
            }
            InstallState::Stale { local, remote } => {
                log::info!(
                    "Update found for {}: '{}' -> '{}'",
                    self.config.display_name,
                    local,
                    remote
                );
                self.reinstall()?;
            }
            InstallState::Current { version } => {
                log::info!(
                    "{} is up to date ('{}')",
                    self.config.display_name,
                    version
                );
            }
        }

        Ok(state)
    }

    /// Create the install directory if it does not exist yet. Idempotent.
    fn setup_directories(&self) -> Result<(), UpdateError> {
        let install_dir = self.install_dir();
        if !install_dir.exists() {
            log::info!("Setting up directories for {}", self.config.display_name);
            std::fs::create_dir_all(&install_dir)
                .map_err(|e| UpdateError::filesystem(&install_dir, e))?;
        }
        Ok(())
    }

    /// Classify the local installation.
    ///
    /// The executable and marker checks are purely local; the version oracle
    /// is only consulted once both exist. A missing marker classifies
    /// without touching the network, so the forced reinstall happens even
    /// when the oracle would be unreachable.
    pub fn classify(&self) -> Result<InstallState, UpdateError> {
        if !self.executable_path().exists() {
            return Ok(InstallState::Absent);
        }

        let marker_path = self.version_marker_path();
        if !marker_path.exists() {
            return Ok(InstallState::MarkerMissing);
        }

        let local_raw = std::fs::read_to_string(&marker_path)
            .map_err(|e| UpdateError::filesystem(&marker_path, e))?;

        log::info!("Checking whether the {} is up to date...", self.config.prefix);
        let remote_raw = self.source.fetch_text(&self.config.version_url)?;

        // Exact string comparison after stripping trailing line endings, so
        // a text-file newline never reads as a stale install.
        let local = local_raw.trim_end();
        let remote = remote_raw.trim_end();

        if local == remote {
            Ok(InstallState::Current {
                version: local.to_string(),
            })
        } else {
            Ok(InstallState::Stale {
                local: local.to_string(),
                remote: remote.to_string(),
            })
        }
    }

    /// Download the package archive, extract it into the install directory,
    /// then cache the remote version marker locally.
    ///
    /// The marker is written only after extraction succeeds, so its presence
    /// is a reliable proxy for a completed extraction.
    fn install(&self) -> Result<(), UpdateError> {
        let archive_path = self.archive_path();
        let install_dir = self.install_dir();

        log::info!(
            "Downloading {} from {}",
            self.config.prefix,
            self.config.package_url
        );
        self.source
            .fetch_to_file(&self.config.package_url, &archive_path)?;

        std::fs::create_dir_all(&install_dir)
            .map_err(|e| UpdateError::filesystem(&install_dir, e))?;
        archive::extract_all(&archive_path, &install_dir)?;

        let marker_path = self.version_marker_path();
        self.source
            .fetch_to_file(&self.config.version_url, &marker_path)?;

        Ok(())
    }

    /// Delete the entire install directory, then install from scratch.
    ///
    /// There is no atomic swap: an interruption between the delete and the
    /// new extraction leaves the installation absent, which the next run
    /// repairs by installing from scratch.
    fn reinstall(&self) -> Result<(), UpdateError> {
        let install_dir = self.install_dir();

        log::info!("Uninstalling {}...", self.config.prefix);
        if install_dir.exists() {
            std::fs::remove_dir_all(&install_dir)
                .map_err(|e| UpdateError::filesystem(&install_dir, e))?;
        }

        self.install()
    }

    /// Start the installed executable without waiting for it to exit.
    pub fn launch(&self) -> Result<(), UpdateError> {
        let executable = self.executable_path();
        log::info!("Launching {}", executable.display());
        self.launcher.start_detached(&executable)
    }

    fn install_dir(&self) -> PathBuf {
        self.config.install_dir(self.data_root)
    }

    fn executable_path(&self) -> PathBuf {
        self.config.executable_path(self.data_root)
    }

    fn version_marker_path(&self) -> PathBuf {
        self.config.version_marker_path(self.data_root)
    }

    fn archive_path(&self) -> PathBuf {
        self.config.archive_path(self.data_root)
    }
}
