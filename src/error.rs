//! Error types for toolstrap operations.
//!
//! This module defines [`ToolstrapError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Toolchain bootstrap errors (`Network`, `Parse`, `Download`, `Extract`,
//!   `Verification`) are fatal for the run
//! - Per-tool errors (`Fetch`, `Inject`) are recovered by the reconciler and
//!   recorded as outcomes
//! - Use `anyhow::Error` (via `ToolstrapError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for toolstrap operations.
#[derive(Debug, Error)]
pub enum ToolstrapError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Two catalog entries claim the same executable.
    #[error("Duplicate executable '{executable}' declared by '{first}' and '{second}'")]
    DuplicateExecutable {
        executable: String,
        first: String,
        second: String,
    },

    /// The version feed or a release archive could not be reached.
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    /// The version feed or a version string had an unexpected shape.
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// The release archive could not be downloaded or failed its checksum.
    #[error("Download of {url} failed: {message}")]
    Download { url: String, message: String },

    /// The release archive could not be unpacked.
    #[error("Failed to extract {archive} into {destination}: {message}")]
    Extract {
        archive: String,
        destination: PathBuf,
        message: String,
    },

    /// The toolchain reported a different version after installation.
    #[error("Toolchain verification failed: expected {expected}, found {found}")]
    Verification { expected: String, found: String },

    /// No release archive exists for the running platform.
    #[error("Unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// The package fetch for a single tool failed.
    #[error("Failed to fetch '{tool}' from {source_locator}: {message}")]
    Fetch {
        tool: String,
        source_locator: String,
        message: String,
    },

    /// A tool's post-install command failed.
    #[error("Post-install command for '{tool}' failed: {command}")]
    Inject { tool: String, command: String },

    /// Shell command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToolstrapError {
    /// Whether this error aborts the toolchain bootstrap.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Fetch { .. } | Self::Inject { .. })
    }
}

/// Result type alias for toolstrap operations.
pub type Result<T> = std::result::Result<T, ToolstrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = ToolstrapError::ConfigNotFound {
            path: PathBuf::from("/foo/config.yml"),
        };
        assert!(err.to_string().contains("/foo/config.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = ToolstrapError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn duplicate_executable_names_both_entries() {
        let err = ToolstrapError::DuplicateExecutable {
            executable: "httpx".into(),
            first: "Httpx".into(),
            second: "httpx-dup".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("httpx"));
        assert!(msg.contains("Httpx"));
        assert!(msg.contains("httpx-dup"));
    }

    #[test]
    fn network_error_displays_url() {
        let err = ToolstrapError::Network {
            url: "https://go.dev/dl/?mode=json".into(),
            message: "connection refused".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("go.dev"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn verification_displays_both_versions() {
        let err = ToolstrapError::Verification {
            expected: "1.22.0".into(),
            found: "1.21.5".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("1.22.0"));
        assert!(msg.contains("1.21.5"));
    }

    #[test]
    fn fetch_and_inject_are_not_fatal() {
        let fetch = ToolstrapError::Fetch {
            tool: "nuclei".into(),
            source_locator: "github.com/projectdiscovery/nuclei/v3/cmd/nuclei".into(),
            message: "exit status 1".into(),
        };
        let inject = ToolstrapError::Inject {
            tool: "nuclei".into(),
            command: "nuclei -update-templates".into(),
        };
        assert!(!fetch.is_fatal());
        assert!(!inject.is_fatal());
    }

    #[test]
    fn bootstrap_errors_are_fatal() {
        let err = ToolstrapError::Parse {
            message: "feed is empty".into(),
        };
        assert!(err.is_fatal());
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = ToolstrapError::CommandFailed {
            command: "go install".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("go install"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ToolstrapError = io_err.into();
        assert!(matches!(err, ToolstrapError::Io(_)));
    }
}
