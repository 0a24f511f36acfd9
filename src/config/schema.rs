//! Configuration schema definitions for toolstrap.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format:
//!
//! ```yaml
//! toolchain:
//!   version: latest          # or a pinned version such as "1.22.0"
//!   install_root: /usr/local
//!   gopath: ~/go
//! profile: ~/.zshrc
//! tools:
//!   - name: Subfinder
//!     executable: subfinder
//!     source: github.com/projectdiscovery/subfinder/v2/cmd/subfinder
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::ToolDescriptor;

/// Default version feed (JSON list of stable releases, newest first).
pub const DEFAULT_FEED_URL: &str = "https://go.dev/dl/?mode=json";

/// Default base URL release archives are downloaded from.
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://go.dev/dl/";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolstrapConfig {
    /// Toolchain bootstrap settings
    pub toolchain: ToolchainConfig,

    /// Shell profile to write environment lines to (defaults to the
    /// current shell's rc file)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<PathBuf>,

    /// Tool catalog; the built-in catalog is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDescriptor>>,
}

/// Toolchain bootstrap settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// `latest` to follow the feed, or a pinned version
    pub version: String,

    /// Version feed URL
    pub feed_url: String,

    /// Base URL for release archives (archive file name is appended)
    pub download_base: String,

    /// Directory the `go/` tree is extracted into
    pub install_root: PathBuf,

    /// Go workspace; `go install` puts binaries in `<gopath>/bin`
    pub gopath: PathBuf,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            version: "latest".to_string(),
            feed_url: DEFAULT_FEED_URL.to_string(),
            download_base: DEFAULT_DOWNLOAD_BASE.to_string(),
            install_root: PathBuf::from("/usr/local"),
            gopath: PathBuf::from("~/go"),
            timeout_secs: 30,
        }
    }
}

impl ToolchainConfig {
    /// The pinned version, or `None` when following the feed.
    pub fn pinned_version(&self) -> Option<&str> {
        let v = self.version.trim();
        if v.is_empty() || v.eq_ignore_ascii_case("latest") {
            None
        } else {
            Some(v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_latest_release() {
        let config = ToolstrapConfig::default();
        assert_eq!(config.toolchain.version, "latest");
        assert!(config.toolchain.pinned_version().is_none());
        assert_eq!(config.toolchain.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.toolchain.install_root, PathBuf::from("/usr/local"));
        assert!(config.tools.is_none());
    }

    #[test]
    fn partial_toolchain_section_keeps_defaults() {
        let yaml = "toolchain:\n  version: \"1.22.0\"\n";
        let config: ToolstrapConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.toolchain.pinned_version(), Some("1.22.0"));
        assert_eq!(config.toolchain.download_base, DEFAULT_DOWNLOAD_BASE);
        assert_eq!(config.toolchain.timeout_secs, 30);
    }

    #[test]
    fn latest_is_case_insensitive() {
        let toolchain = ToolchainConfig {
            version: "LATEST".to_string(),
            ..Default::default()
        };
        assert!(toolchain.pinned_version().is_none());
    }

    #[test]
    fn parses_tools_list() {
        let yaml = r#"
tools:
  - name: Nuclei
    executable: nuclei
    source: github.com/projectdiscovery/nuclei/v3/cmd/nuclei
    inject: nuclei -update-templates
"#;
        let config: ToolstrapConfig = serde_yaml::from_str(yaml).unwrap();
        let tools = config.tools.unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].inject.as_deref(), Some("nuclei -update-templates"));
    }

    #[test]
    fn profile_is_optional() {
        let config: ToolstrapConfig = serde_yaml::from_str("profile: ~/.zshrc").unwrap();
        assert_eq!(config.profile, Some(PathBuf::from("~/.zshrc")));
    }
}
