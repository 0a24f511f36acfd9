//! Go toolchain bootstrap.
//!
//! - [`version`] looks up the desired release and the installed version
//! - [`archive`] names, downloads and unpacks release archives
//! - [`installer`] drives the `NotInstalled`/`Stale` → `UpToDate` transition
//!   and wires the shell profile

pub mod archive;
pub mod installer;
pub mod version;

pub use archive::Platform;
pub use installer::{profile_entries, BootstrapReport, ToolchainInstaller, ToolchainState};
pub use version::{Release, ReleaseFile, ToolchainVersion, VersionInfo, VersionOracle};
