//! End-to-end launcher flow: config document on disk, reconciliation against
//! an in-memory package source, detached launch recorded by a fake.

use par_launch_config::LauncherConfig;
use par_launch_update::{AppLauncher, InstallState, PackageSource, Reconciler, UpdateError};
use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const PACKAGE_URL: &str = "https://example.com/releases/game.zip";
const VERSION_URL: &str = "https://example.com/releases/version.txt";

struct StubSource {
    package: Vec<u8>,
    remote_version: String,
}

impl PackageSource for StubSource {
    fn fetch_text(&self, _url: &str) -> Result<String, UpdateError> {
        Ok(self.remote_version.clone())
    }

    fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<(), UpdateError> {
        let bytes = if url == PACKAGE_URL {
            self.package.clone()
        } else {
            self.remote_version.clone().into_bytes()
        };
        std::fs::write(dest, bytes).map_err(|e| UpdateError::filesystem(dest, e))
    }
}

struct RecordingLauncher {
    launched: Rc<RefCell<Vec<PathBuf>>>,
}

impl RecordingLauncher {
    fn new() -> (Self, Rc<RefCell<Vec<PathBuf>>>) {
        let launched = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                launched: Rc::clone(&launched),
            },
            launched,
        )
    }
}

impl AppLauncher for RecordingLauncher {
    fn start_detached(&self, executable: &Path) -> Result<(), UpdateError> {
        self.launched.borrow_mut().push(executable.to_path_buf());
        Ok(())
    }
}

fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    let mut writer = zip::ZipWriter::new(&mut buf);
    for (name, contents) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    buf.into_inner()
}

fn write_config(data_root: &Path) -> LauncherConfig {
    let document = format!(
        r#"{{
            "package_url": "{PACKAGE_URL}",
            "version_url": "{VERSION_URL}",
            "install_dir": "game",
            "executable": "bin/game",
            "version_file": "installed-version.txt",
            "display_name": "Example Game",
            "prefix": "game"
        }}"#
    );
    let path = LauncherConfig::config_path(data_root);
    std::fs::write(&path, document).unwrap();
    LauncherConfig::load(&path).unwrap()
}

#[test]
fn test_first_run_installs_and_launches() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    let source = StubSource {
        package: build_zip(&[("bin/game", "game v1"), ("assets/intro.txt", "hi")]),
        remote_version: "1.0".to_string(),
    };
    let (launcher, launched) = RecordingLauncher::new();
    let reconciler = Reconciler::new(&config, temp.path(), source, launcher);

    let state = reconciler.run().unwrap();

    assert_eq!(state, InstallState::Absent);
    assert!(temp.path().join("game/bin/game").is_file());
    assert!(temp.path().join("game/assets/intro.txt").is_file());
    assert_eq!(
        std::fs::read_to_string(temp.path().join("installed-version.txt")).unwrap(),
        "1.0"
    );
    assert_eq!(
        launched.borrow().as_slice(),
        &[temp.path().join("game/bin/game")]
    );
}

#[test]
fn test_version_bump_reinstalls_then_launches_new_binary() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    // First run installs 1.0.
    let (launcher, _) = RecordingLauncher::new();
    let reconciler = Reconciler::new(
        &config,
        temp.path(),
        StubSource {
            package: build_zip(&[("bin/game", "game v1")]),
            remote_version: "1.0".to_string(),
        },
        launcher,
    );
    reconciler.run().unwrap();

    // Remote moves to 1.1; the next run replaces the installation.
    let (launcher, launched) = RecordingLauncher::new();
    let reconciler = Reconciler::new(
        &config,
        temp.path(),
        StubSource {
            package: build_zip(&[("bin/game", "game v2")]),
            remote_version: "1.1".to_string(),
        },
        launcher,
    );
    let state = reconciler.run().unwrap();

    assert_eq!(
        state,
        InstallState::Stale {
            local: "1.0".to_string(),
            remote: "1.1".to_string()
        }
    );
    assert_eq!(
        std::fs::read_to_string(temp.path().join("game/bin/game")).unwrap(),
        "game v2"
    );
    assert_eq!(
        std::fs::read_to_string(temp.path().join("installed-version.txt")).unwrap(),
        "1.1"
    );
    assert_eq!(launched.borrow().len(), 1);
}
