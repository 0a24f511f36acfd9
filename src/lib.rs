//! toolstrap - Go toolchain bootstrap and recon tool installer.
//!
//! toolstrap makes sure a Go toolchain at the desired version is installed
//! and on PATH, then installs a catalog of Go-based command-line tools with
//! `go install`, tolerating per-tool failures.
//!
//! # Modules
//!
//! - [`catalog`] - Tool descriptors and the built-in catalog
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and catalog resolution
//! - [`error`] - Error types and result aliases
//! - [`reconcile`] - Catalog reconciliation against PATH
//! - [`shell`] - Command execution, PATH probing and profile editing
//! - [`toolchain`] - Version feed, archive download and installation
//! - [`ui`] - Spinners, summaries and terminal output
//!
//! # Example
//!
//! ```
//! use toolstrap::catalog::{Catalog, ToolDescriptor};
//!
//! let catalog = Catalog::new(vec![
//!     ToolDescriptor::new("Httpx", "httpx", "github.com/projectdiscovery/httpx/cmd/httpx"),
//! ])
//! .unwrap();
//!
//! let httpx = catalog.get("httpx").unwrap();
//! assert_eq!(
//!     httpx.install_target(),
//!     "github.com/projectdiscovery/httpx/cmd/httpx@latest"
//! );
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod shell;
pub mod toolchain;
pub mod ui;

pub use error::{Result, ToolstrapError};
