//! Configuration and profile resolution shared by commands.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::config::{expand_home, load_config, resolve_catalog, ConfigSource, LoadedConfig};
use crate::config::{ToolchainConfig, ToolstrapConfig};
use crate::error::Result;
use crate::shell::{detect_shell, reload_command};

/// Values taken from global CLI flags.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// `--config` / `TOOLSTRAP_CONFIG`.
    pub config: Option<PathBuf>,
    /// `--profile`.
    pub profile: Option<PathBuf>,
}

/// Loaded configuration plus the profile file commands write to.
#[derive(Debug, Clone)]
pub struct CommandContext {
    loaded: LoadedConfig,
    profile: PathBuf,
}

impl CommandContext {
    /// Load configuration and resolve the profile path.
    pub fn load(options: &GlobalOptions) -> Result<Self> {
        let loaded = load_config(options.config.as_deref())?;
        let profile = resolve_profile(options.profile.as_deref(), loaded.config.profile.as_deref());
        tracing::debug!("Using profile {}", profile.display());
        Ok(Self { loaded, profile })
    }

    pub fn config(&self) -> &ToolstrapConfig {
        &self.loaded.config
    }

    pub fn toolchain(&self) -> &ToolchainConfig {
        &self.loaded.config.toolchain
    }

    pub fn source(&self) -> &ConfigSource {
        &self.loaded.source
    }

    /// Profile file environment lines are written to.
    pub fn profile(&self) -> &Path {
        &self.profile
    }

    /// The effective catalog, restricted to `only` when non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` for names not in the catalog.
    pub fn catalog(&self, only: &[String]) -> Result<Catalog> {
        resolve_catalog(self.config())?.select(only)
    }

    /// Hint telling the user how to pick up profile changes.
    pub fn reload_hint(&self) -> String {
        format!(
            "Run `{}` or open a new shell to pick up the new PATH.",
            reload_command(&self.profile)
        )
    }
}

/// Pick the profile file: the flag, then the config file, then the
/// current shell's rc file.
pub fn resolve_profile(flag: Option<&Path>, configured: Option<&Path>) -> PathBuf {
    flag.or(configured)
        .map(expand_home)
        .unwrap_or_else(|| detect_shell().profile)
}

/// Describe a configuration source for display.
pub fn describe_source(source: &ConfigSource) -> String {
    match source {
        ConfigSource::Explicit(path) | ConfigSource::User(path) => path.display().to_string(),
        ConfigSource::Builtin => "built-in defaults".to_string(),
    }
}
