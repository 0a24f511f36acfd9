//! Configuration file discovery and loading.
//!
//! This module handles finding and loading the configuration file and
//! resolving the effective catalog.

use crate::catalog::{self, Catalog};
use crate::config::schema::ToolstrapConfig;
use crate::error::{Result, ToolstrapError};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicit `--config` path.
    Explicit(PathBuf),
    /// User config discovered under the config directory.
    User(PathBuf),
    /// No file; built-in defaults.
    Builtin,
}

/// A loaded configuration plus its origin.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Parsed configuration with `~` expanded.
    pub config: ToolstrapConfig,
    /// Origin of the configuration.
    pub source: ConfigSource,
}

/// Locate the user's config file at `<config_dir>/toolstrap/config.yml`.
pub fn user_config_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("toolstrap").join("config.yml");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ToolstrapConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ToolstrapError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ToolstrapError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a config.
///
/// An empty document is the default configuration.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ToolstrapConfig> {
    if content.trim().is_empty() {
        return Ok(ToolstrapConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ToolstrapError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit path must exist. Without one, the user config is used when
/// present, otherwise built-in defaults.
pub fn load_config(config_override: Option<&Path>) -> Result<LoadedConfig> {
    let (config, source) = if let Some(path) = config_override {
        (
            load_config_file(path)?,
            ConfigSource::Explicit(path.to_path_buf()),
        )
    } else if let Some(path) = user_config_path() {
        (load_config_file(&path)?, ConfigSource::User(path))
    } else {
        (ToolstrapConfig::default(), ConfigSource::Builtin)
    };

    tracing::debug!("Loaded configuration from {:?}", source);

    let config = expand_paths(config);
    validate_paths(&config)?;

    Ok(LoadedConfig { config, source })
}

/// Build the effective catalog: the configured tools, or the built-in one.
pub fn resolve_catalog(config: &ToolstrapConfig) -> Result<Catalog> {
    match &config.tools {
        Some(tools) => Catalog::new(tools.clone()),
        None => catalog::load_builtin(),
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn expand_paths(mut config: ToolstrapConfig) -> ToolstrapConfig {
    config.toolchain.install_root = expand_home(&config.toolchain.install_root);
    config.toolchain.gopath = expand_home(&config.toolchain.gopath);
    config.profile = config.profile.as_deref().map(expand_home);
    config
}

/// `GOPATH` and `GOBIN` must be absolute for `go install` to accept them.
fn validate_paths(config: &ToolstrapConfig) -> Result<()> {
    let toolchain = &config.toolchain;
    for (field, path) in [
        ("toolchain.install_root", &toolchain.install_root),
        ("toolchain.gopath", &toolchain.gopath),
    ] {
        if !path.is_absolute() {
            return Err(ToolstrapError::ConfigValidationError {
                message: format!("{} must be an absolute path, got '{}'", field, path.display()),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "toolchain:\n  version: \"1.21.6\"\n").unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.source, ConfigSource::Explicit(path));
        assert_eq!(loaded.config.toolchain.pinned_version(), Some("1.21.6"));
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_config(Some(&temp.path().join("missing.yml")));
        assert!(matches!(result, Err(ToolstrapError::ConfigNotFound { .. })));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "toolchain: [unterminated").unwrap();

        let result = load_config_file(&path);
        assert!(matches!(
            result,
            Err(ToolstrapError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn empty_file_is_default_config() {
        let config = parse_config("   \n", Path::new("config.yml")).unwrap();
        assert_eq!(config.toolchain.version, "latest");
    }

    #[test]
    fn expand_home_replaces_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/go")), home.join("go"));
            assert_eq!(expand_home(Path::new("~")), home);
        }
    }

    #[test]
    fn expand_home_leaves_absolute_paths() {
        assert_eq!(
            expand_home(Path::new("/usr/local")),
            PathBuf::from("/usr/local")
        );
    }

    #[test]
    fn loaded_gopath_is_expanded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "toolchain:\n  gopath: ~/work/go\n").unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert!(!loaded.config.toolchain.gopath.starts_with("~"));
    }

    #[test]
    fn relative_toolchain_paths_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");

        for yaml in ["toolchain:\n  gopath: work/go\n", "toolchain:\n  install_root: opt\n"] {
            fs::write(&path, yaml).unwrap();
            let err = load_config(Some(&path)).unwrap_err();
            assert!(
                matches!(&err, ToolstrapError::ConfigValidationError { message } if message.contains("absolute")),
                "unexpected error: {err:?}"
            );
        }
    }

    #[test]
    fn resolve_catalog_falls_back_to_builtin() {
        let catalog = resolve_catalog(&ToolstrapConfig::default()).unwrap();
        assert!(catalog.get("subfinder").is_some());
    }

    #[test]
    fn resolve_catalog_uses_configured_tools() {
        let yaml = r#"
tools:
  - name: Alpha
    executable: alpha
    source: example.com/alpha
"#;
        let config = parse_config(yaml, Path::new("config.yml")).unwrap();
        let catalog = resolve_catalog(&config).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("subfinder").is_none());
    }

    #[test]
    fn resolve_catalog_rejects_duplicates() {
        let yaml = r#"
tools:
  - name: Httpx
    executable: httpx
    source: github.com/projectdiscovery/httpx/cmd/httpx
  - name: Httpx Fork
    executable: httpx
    source: example.com/httpx
"#;
        let config = parse_config(yaml, Path::new("config.yml")).unwrap();
        let result = resolve_catalog(&config);
        assert!(matches!(
            result,
            Err(ToolstrapError::DuplicateExecutable { .. })
        ));
    }
}
