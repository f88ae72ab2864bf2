//! Launcher configuration: the single JSON document describing the managed
//! application.
//!
//! The config lives at `config.json` inside the data directory and is read
//! once at startup. It is immutable for the lifetime of the process; every
//! path field is resolved relative to the data directory (or, for the
//! executable, relative to the install directory).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// File name of the configuration document inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// File name the downloaded package archive is staged under inside the data
/// directory. Overwritten on every install, so a stale copy from an aborted
/// run is harmless.
pub const ARCHIVE_FILE_NAME: &str = "package.zip";

/// Configuration for a managed application.
///
/// All fields are required and must be non-empty. `install_dir`,
/// `executable`, and `version_file` must be relative paths that stay inside
/// their base directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// URL of the downloadable package archive (ZIP).
    pub package_url: String,

    /// URL of a plain-text version marker, fetched fresh on every run.
    pub version_url: String,

    /// Install directory, relative to the data directory.
    pub install_dir: String,

    /// Entry-point executable, relative to the install directory.
    pub executable: String,

    /// Local version marker file, relative to the data directory.
    pub version_file: String,

    /// Human-readable application name. Presentation only.
    pub display_name: String,

    /// Short noun used in log messages (e.g. "game", "app"). Presentation
    /// only.
    pub prefix: String,
}

impl LauncherConfig {
    /// Path of the config document inside a data directory.
    pub fn config_path(data_root: &Path) -> PathBuf {
        data_root.join(CONFIG_FILE_NAME)
    }

    /// Load and validate the configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading launcher config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: LauncherConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every field: non-empty, URLs well-formed, paths relative and
    /// free of traversal components.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_url("package_url", &self.package_url)?;
        require_url("version_url", &self.version_url)?;
        require_contained_path("install_dir", &self.install_dir)?;
        require_contained_path("executable", &self.executable)?;
        require_contained_path("version_file", &self.version_file)?;
        require_non_empty("display_name", &self.display_name)?;
        require_non_empty("prefix", &self.prefix)?;
        Ok(())
    }

    /// Install directory resolved against the data directory.
    pub fn install_dir(&self, data_root: &Path) -> PathBuf {
        data_root.join(&self.install_dir)
    }

    /// Entry-point executable resolved against the install directory.
    pub fn executable_path(&self, data_root: &Path) -> PathBuf {
        self.install_dir(data_root).join(&self.executable)
    }

    /// Local version marker resolved against the data directory.
    pub fn version_marker_path(&self, data_root: &Path) -> PathBuf {
        data_root.join(&self.version_file)
    }

    /// Staging path the package archive is downloaded to.
    pub fn archive_path(&self, data_root: &Path) -> PathBuf {
        data_root.join(ARCHIVE_FILE_NAME)
    }

    /// A filled-in sample document, shown when the config file is missing.
    pub fn sample() -> String {
        let sample = LauncherConfig {
            package_url: "https://example.com/releases/app.zip".to_string(),
            version_url: "https://example.com/releases/version.txt".to_string(),
            install_dir: "app".to_string(),
            executable: "app.exe".to_string(),
            version_file: "version.txt".to_string(),
            display_name: "My Application".to_string(),
            prefix: "app".to_string(),
        };
        // Serializing a plain struct of strings cannot fail.
        serde_json::to_string_pretty(&sample).unwrap_or_default()
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "field '{field}' must not be empty"
        )));
    }
    Ok(())
}

fn require_url(field: &str, value: &str) -> Result<(), ConfigError> {
    require_non_empty(field, value)?;
    let parsed = url::Url::parse(value).map_err(|e| {
        ConfigError::Validation(format!("field '{field}' is not a valid URL ('{value}'): {e}"))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::Validation(format!(
            "field '{field}' uses unsupported URL scheme '{scheme}' ('{value}'); \
             only http and https are allowed"
        ))),
    }
}

/// Reject absolute paths and any `..` component so the resolved path cannot
/// escape its base directory.
fn require_contained_path(field: &str, value: &str) -> Result<(), ConfigError> {
    require_non_empty(field, value)?;
    let path = Path::new(value);
    if path.is_absolute() {
        return Err(ConfigError::PathTraversal(format!(
            "field '{field}' must be a relative path, got absolute path '{value}'"
        )));
    }
    for component in path.components() {
        match component {
            Component::ParentDir => {
                return Err(ConfigError::PathTraversal(format!(
                    "field '{field}' must not contain '..' components ('{value}')"
                )));
            }
            Component::Prefix(_) | Component::RootDir => {
                return Err(ConfigError::PathTraversal(format!(
                    "field '{field}' must stay inside the data directory ('{value}')"
                )));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> LauncherConfig {
        LauncherConfig {
            package_url: "https://example.com/app.zip".to_string(),
            version_url: "https://example.com/version.txt".to_string(),
            install_dir: "app".to_string(),
            executable: "bin/app.exe".to_string(),
            version_file: "version.txt".to_string(),
            display_name: "Test App".to_string(),
            prefix: "app".to_string(),
        }
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_field_rejected() {
        let mut config = valid_config();
        config.display_name = String::new();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("display_name"));
    }

    #[test]
    fn test_whitespace_only_field_rejected() {
        let mut config = valid_config();
        config.prefix = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_url_rejected() {
        let mut config = valid_config();
        config.package_url = "not a url".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("package_url"));
    }

    #[test]
    fn test_file_scheme_rejected() {
        let mut config = valid_config();
        config.version_url = "file:///etc/passwd".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scheme"));
    }

    #[test]
    fn test_absolute_install_dir_rejected() {
        let mut config = valid_config();
        config.install_dir = "/usr/local/app".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::PathTraversal(_)));
    }

    #[test]
    fn test_parent_traversal_rejected() {
        let mut config = valid_config();
        config.version_file = "../outside.txt".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::PathTraversal(_)));
    }

    #[test]
    fn test_nested_relative_executable_allowed() {
        let mut config = valid_config();
        config.executable = "bin/nested/app".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_path_resolution() {
        let config = valid_config();
        let root = Path::new("/data");
        assert_eq!(config.install_dir(root), Path::new("/data/app"));
        assert_eq!(
            config.executable_path(root),
            Path::new("/data/app/bin/app.exe")
        );
        assert_eq!(
            config.version_marker_path(root),
            Path::new("/data/version.txt")
        );
        assert_eq!(config.archive_path(root), Path::new("/data/package.zip"));
        assert_eq!(
            LauncherConfig::config_path(root),
            Path::new("/data/config.json")
        );
    }

    #[test]
    fn test_json_round_trip() {
        let config = valid_config();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: LauncherConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.package_url, config.package_url);
        assert_eq!(parsed.executable, config.executable);
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let json = r#"{"package_url":"https://example.com/app.zip"}"#;
        let result: Result<LauncherConfig, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_sample_parses_and_validates() {
        let sample = LauncherConfig::sample();
        let parsed: LauncherConfig = serde_json::from_str(&sample).unwrap();
        assert!(parsed.validate().is_ok());
    }
}
