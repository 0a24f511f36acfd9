//! Executable lookup on PATH.
//!
//! A tool counts as present when a file with its name exists in some PATH
//! directory and has an executable permission bit set.
//!
//! # Example
//!
//! ```no_run
//! use toolstrap::shell::probe::which;
//!
//! if let Some(go) = which("go") {
//!     println!("go found at {}", go.display());
//! }
//! ```

use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command, whose behavior varies across systems.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Parse the process PATH into a list of directories.
///
/// Read fresh on every call so entries added during the run are seen.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve `tool` against the current process PATH.
pub fn which(tool: &str) -> Option<PathBuf> {
    let found = resolve_tool_path(tool, &parse_system_path());
    tracing::debug!("Lookup '{}': {:?}", tool, found);
    found
}
