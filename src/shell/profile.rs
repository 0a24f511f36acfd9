//! Idempotent shell profile editing.
//!
//! Profile files are only ever read and appended to. A line that already
//! appears in the file (trailing whitespace ignored) is never written again,
//! so repeated runs leave at most one copy of each line.

use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One environment setting destined for a shell profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEntry {
    /// `export NAME="value"`
    Export { name: String, value: String },
    /// `export PATH="$PATH:dir"`
    PathAppend(PathBuf),
}

impl ProfileEntry {
    /// Create an export entry.
    pub fn export(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Export {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a PATH entry.
    pub fn path_append(dir: impl Into<PathBuf>) -> Self {
        Self::PathAppend(dir.into())
    }

    /// The exact line written to the profile.
    pub fn line(&self) -> String {
        match self {
            Self::Export { name, value } => format!("export {}=\"{}\"", name, value),
            Self::PathAppend(dir) => format!("export PATH=\"$PATH:{}\"", dir.display()),
        }
    }

    /// Apply this entry to the current process environment.
    pub fn apply(&self) {
        match self {
            Self::Export { name, value } => {
                tracing::debug!("Setting {}={}", name, value);
                std::env::set_var(name, value);
            }
            Self::PathAppend(dir) => {
                let current = std::env::var_os("PATH").unwrap_or_default();
                if std::env::split_paths(&current).any(|p| p == *dir) {
                    return;
                }
                let mut paths: Vec<PathBuf> = std::env::split_paths(&current).collect();
                paths.push(dir.clone());
                match std::env::join_paths(paths) {
                    Ok(joined) => {
                        tracing::debug!("Appending {} to PATH", dir.display());
                        std::env::set_var("PATH", joined);
                    }
                    Err(e) => tracing::warn!("Cannot add {} to PATH: {}", dir.display(), e),
                }
            }
        }
    }
}

impl std::fmt::Display for ProfileEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.line())
    }
}

/// Ensure `line` appears in `file`, appending it if absent.
///
/// A missing file counts as empty and is created along with its parent
/// directories. Existing content is compared as bytes, so a profile that
/// isn't valid UTF-8 is still accepted. Returns `true` if the line was
/// appended.
pub fn ensure_line(file: &Path, line: &str) -> Result<bool> {
    let wanted = line.trim_end();
    let existing = match fs::read(file) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    if contains_line(&existing, wanted.as_bytes()) {
        tracing::debug!("{} already contains: {}", file.display(), wanted);
        return Ok(false);
    }

    if let Some(parent) = file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut out = OpenOptions::new().create(true).append(true).open(file)?;
    if existing.last().is_some_and(|&b| b != b'\n') {
        out.write_all(b"\n")?;
    }
    writeln!(out, "{}", wanted)?;

    tracing::info!("Added to {}: {}", file.display(), wanted);
    Ok(true)
}

fn contains_line(content: &[u8], wanted: &[u8]) -> bool {
    content
        .split(|&b| b == b'\n')
        .any(|l| l.trim_ascii_end() == wanted)
}

/// Ensure every entry in order. Returns how many lines were appended.
pub fn ensure_entries(file: &Path, entries: &[ProfileEntry]) -> Result<usize> {
    let mut appended = 0;
    for entry in entries {
        if ensure_line(file, &entry.line())? {
            appended += 1;
        }
    }
    Ok(appended)
}

/// Export entries into the running process so later steps see them.
pub fn apply_to_current_session(entries: &[ProfileEntry]) {
    for entry in entries {
        entry.apply();
    }
}
