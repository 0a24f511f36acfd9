//! Configuration loading and parsing for toolstrap.
//!
//! This module handles:
//! - Schema definitions in [`schema`]
//! - File discovery, loading and catalog resolution in [`loader`]
//!
//! # Example
//!
//! ```
//! use toolstrap::config::{load_config, resolve_catalog};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "toolchain:\n  version: \"1.22.0\"\n").unwrap();
//!
//! let loaded = load_config(Some(&path)).unwrap();
//! assert_eq!(loaded.config.toolchain.pinned_version(), Some("1.22.0"));
//!
//! // No `tools:` section, so the built-in catalog applies
//! let catalog = resolve_catalog(&loaded.config).unwrap();
//! assert!(!catalog.is_empty());
//! ```
//!
//! # Configuration File Locations
//!
//! 1. `--config <path>` (or `TOOLSTRAP_CONFIG`)
//! 2. `<config_dir>/toolstrap/config.yml` (e.g. `~/.config/toolstrap/config.yml`)
//! 3. Built-in defaults

pub mod loader;
pub mod schema;

pub use loader::{
    expand_home, load_config, load_config_file, parse_config, resolve_catalog, user_config_path,
    ConfigSource, LoadedConfig,
};
pub use schema::{ToolchainConfig, ToolstrapConfig, DEFAULT_DOWNLOAD_BASE, DEFAULT_FEED_URL};
