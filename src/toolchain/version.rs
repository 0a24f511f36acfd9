//! Installed and desired toolchain versions.
//!
//! The desired version comes from the release feed (a JSON array of release
//! records, newest first) unless the configuration pins one. The installed
//! version comes from running `go version`. Neither is cached: both are
//! looked up fresh on every run.

use crate::config::ToolchainConfig;
use crate::error::{Result, ToolstrapError};
use crate::shell::{self, CommandOptions};
use regex::Regex;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

static GO_VERSION_OUTPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"go version go(\d+)\.(\d+)(?:\.(\d+))?").unwrap());

/// A `major.minor.patch` toolchain version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToolchainVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ToolchainVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `go1.22`, `go1.22.0` or `1.22.0`. A missing patch is `0`.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for pre-releases (`go1.23rc1`) and anything else
    /// that isn't two or three dot-separated numbers.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix("go").unwrap_or(trimmed);
        let invalid = || ToolstrapError::Parse {
            message: format!("invalid toolchain version '{}'", s),
        };

        let parts: Vec<u32> = bare
            .split('.')
            .map(|p| p.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<_>>()?;

        match parts.as_slice() {
            [major, minor] => Ok(Self::new(*major, *minor, 0)),
            [major, minor, patch] => Ok(Self::new(*major, *minor, *patch)),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for ToolchainVersion {
    type Err = ToolstrapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// One downloadable file of a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseFile {
    pub filename: String,
    pub os: String,
    pub arch: String,
    pub sha256: String,
    pub kind: String,
}

#[derive(Debug, Deserialize)]
struct FeedRecord {
    version: Option<String>,
    #[serde(default)]
    files: Vec<ReleaseFile>,
}

/// A release the installer can target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Release tag as published, e.g. `go1.22.0`. Archive names are built
    /// from this rather than from `version`, since older releases were
    /// published without a patch component (`go1.20`).
    pub tag: String,
    pub version: ToolchainVersion,
    /// Files published for this release (empty for pinned versions).
    pub files: Vec<ReleaseFile>,
}

impl Release {
    /// A release for a version named in configuration.
    pub fn pinned(version: &str) -> Result<Self> {
        let trimmed = version.trim();
        let parsed = ToolchainVersion::parse(trimmed)?;
        let tag = if trimmed.starts_with("go") {
            trimmed.to_string()
        } else {
            format!("go{}", trimmed)
        };
        Ok(Self {
            tag,
            version: parsed,
            files: Vec::new(),
        })
    }

    /// Published SHA-256 for a file of this release, if any.
    pub fn checksum_for(&self, filename: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.filename == filename)
            .map(|f| f.sha256.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// Installed and desired versions, computed together for one run.
#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub installed: Option<ToolchainVersion>,
    pub desired: Release,
}

/// Parse the release feed body and return its first (latest) record.
pub fn parse_feed(body: &str) -> Result<Release> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ToolstrapError::Parse {
            message: format!("release feed is not valid JSON: {}", e),
        })?;

    let records = value.as_array().ok_or_else(|| ToolstrapError::Parse {
        message: "release feed is not a JSON array".to_string(),
    })?;

    let first = records.first().ok_or_else(|| ToolstrapError::Parse {
        message: "release feed is empty".to_string(),
    })?;

    let record: FeedRecord =
        serde_json::from_value(first.clone()).map_err(|e| ToolstrapError::Parse {
            message: format!("malformed release record: {}", e),
        })?;

    let tag = record.version.ok_or_else(|| ToolstrapError::Parse {
        message: "latest release record has no version".to_string(),
    })?;

    Ok(Release {
        version: ToolchainVersion::parse(&tag)?,
        tag,
        files: record.files,
    })
}

/// Extract the version from `go version` output.
pub fn parse_version_output(output: &str) -> Option<ToolchainVersion> {
    let caps = GO_VERSION_OUTPUT.captures(output)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    let patch = caps
        .get(3)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    Some(ToolchainVersion::new(major, minor, patch))
}

/// Looks up the desired and installed toolchain versions.
pub struct VersionOracle {
    client: Client,
    feed_url: String,
    pinned: Option<String>,
    install_root: PathBuf,
    search_path: bool,
}

impl VersionOracle {
    /// Create an oracle from toolchain settings.
    pub fn new(config: &ToolchainConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("toolstrap/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ToolstrapError::Network {
                url: config.feed_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            feed_url: config.feed_url.clone(),
            pinned: config.pinned_version().map(String::from),
            install_root: config.install_root.clone(),
            search_path: true,
        })
    }

    /// Only consider the binary under the install root when detecting.
    pub fn without_path_fallback(mut self) -> Self {
        self.search_path = false;
        self
    }

    /// HTTP client shared with archive downloads.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Path of the toolchain binary under the install root.
    pub fn toolchain_binary(&self) -> PathBuf {
        toolchain_binary(&self.install_root)
    }

    /// The version to install: the pinned one, or the feed's latest.
    pub fn fetch_desired(&self) -> Result<Release> {
        match &self.pinned {
            Some(version) => {
                tracing::debug!("Using pinned toolchain version {}", version);
                Release::pinned(version)
            }
            None => self.fetch_latest(),
        }
    }

    /// Query the release feed for the latest published release.
    pub fn fetch_latest(&self) -> Result<Release> {
        tracing::debug!("Fetching release feed {}", self.feed_url);
        let network = |message: String| ToolstrapError::Network {
            url: self.feed_url.clone(),
            message,
        };

        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .map_err(|e| network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(network(format!("HTTP {}", response.status())));
        }

        let body = response.text().map_err(|e| network(e.to_string()))?;
        let release = parse_feed(&body)?;
        tracing::debug!("Latest release is {}", release.tag);
        Ok(release)
    }

    /// Version of the installed toolchain, if any.
    ///
    /// Checks the binary under the install root first, then `go` on PATH.
    pub fn detect_installed(&self) -> Option<ToolchainVersion> {
        let fallback = if self.search_path {
            shell::which("go")
        } else {
            None
        };
        let candidates = [Some(self.toolchain_binary()), fallback];
        candidates
            .into_iter()
            .flatten()
            .find_map(|binary| probe_binary(&binary))
    }

    /// Installed and desired versions together.
    pub fn version_info(&self) -> Result<VersionInfo> {
        let installed = self.detect_installed();
        let desired = self.fetch_desired()?;
        Ok(VersionInfo { installed, desired })
    }
}

/// `<install_root>/go/bin/go`
pub fn toolchain_binary(install_root: &Path) -> PathBuf {
    install_root.join("go").join("bin").join("go")
}

/// Run `<binary> version` and parse its output.
pub fn probe_binary(binary: &Path) -> Option<ToolchainVersion> {
    if !binary.is_file() {
        return None;
    }
    let result = shell::execute(binary, &["version"], &CommandOptions::captured()).ok()?;
    if !result.success {
        tracing::debug!("{} version exited with {:?}", binary.display(), result.exit_code);
        return None;
    }
    let version = parse_version_output(&result.stdout);
    tracing::debug!("{} reports {:?}", binary.display(), version);
    version
}
