//! HTTP collaborator with native-tls support.
//!
//! All network access in the launcher goes through [`HttpSource`]: a plain
//! blocking client that fetches the remote version marker as text and
//! streams the package archive to disk. No caching, no retries.

use crate::error::UpdateError;
use crate::reconciler::PackageSource;
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// Global timeout for all HTTP operations (30 seconds).
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum response body size for the version marker fetch (64 KB).
///
/// The marker is a short plain-text string; anything larger is a server
/// misconfiguration, not a version.
pub const MAX_VERSION_RESPONSE_SIZE: u64 = 64 * 1024;

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!("par-launch/", env!("CARGO_PKG_VERSION"));

/// Validate that a URL is usable for launcher network requests.
///
/// Enforces a parseable URL with an http or https scheme. `file://` and
/// other local schemes are rejected so a malicious config cannot read
/// arbitrary local paths through the downloader.
pub fn validate_url(url: &str) -> Result<(), UpdateError> {
    let parsed = url::Url::parse(url).map_err(|e| UpdateError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(UpdateError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{scheme}'; only http and https are allowed"),
        }),
    }
}

/// Create a new HTTP agent configured with native-tls and a global timeout.
pub fn agent() -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(Some(HTTP_TIMEOUT))
        .build()
        .into()
}

/// Production [`PackageSource`] backed by a blocking HTTP client.
pub struct HttpSource {
    agent: Agent,
}

impl HttpSource {
    pub fn new() -> Self {
        Self { agent: agent() }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageSource for HttpSource {
    /// Fetch a small plain-text resource (the remote version marker).
    ///
    /// Response body is limited to [`MAX_VERSION_RESPONSE_SIZE`].
    fn fetch_text(&self, url: &str) -> Result<String, UpdateError> {
        validate_url(url)?;

        let text = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| UpdateError::Network {
                url: url.to_string(),
                source: Box::new(e),
            })?
            .into_body()
            .with_config()
            .limit(MAX_VERSION_RESPONSE_SIZE)
            .read_to_string()
            .map_err(|e| UpdateError::Transfer {
                url: url.to_string(),
                source: e.into_io(),
            })?;

        Ok(text)
    }

    /// Download a resource to a local file, overwriting any existing file at
    /// the destination.
    ///
    /// The body is streamed straight to disk so package archives never have
    /// to fit in memory.
    fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<(), UpdateError> {
        validate_url(url)?;

        let mut body = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| UpdateError::Network {
                url: url.to_string(),
                source: Box::new(e),
            })?
            .into_body();

        // File::create truncates, so a stale file from an earlier run is
        // overwritten rather than appended to.
        let mut file = File::create(dest).map_err(|e| UpdateError::filesystem(dest, e))?;

        std::io::copy(&mut body.as_reader(), &mut file).map_err(|e| UpdateError::Transfer {
            url: url.to_string(),
            source: e,
        })?;

        Ok(())
    }
}
