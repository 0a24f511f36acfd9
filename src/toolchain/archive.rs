//! Release archive naming, download and extraction.

use crate::error::{Result, ToolstrapError};
use anyhow::Context;
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::Path;

/// Operating system and architecture as they appear in archive names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: &'static str,
    pub arch: &'static str,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Result<Self> {
        Self::from_target(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Map Rust target names to release archive names.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedPlatform` for anything but linux/darwin on
    /// amd64, arm64 or 386.
    pub fn from_target(os: &str, arch: &str) -> Result<Self> {
        let unsupported = || ToolstrapError::UnsupportedPlatform {
            os: os.to_string(),
            arch: arch.to_string(),
        };

        let go_os = match os {
            "linux" => "linux",
            "macos" => "darwin",
            _ => return Err(unsupported()),
        };
        let go_arch = match arch {
            "x86_64" => "amd64",
            "aarch64" => "arm64",
            "x86" => "386",
            _ => return Err(unsupported()),
        };

        Ok(Self {
            os: go_os,
            arch: go_arch,
        })
    }

    /// `<tag>.<os>-<arch>.tar.gz`, e.g. `go1.22.0.linux-amd64.tar.gz`.
    pub fn archive_name(&self, tag: &str) -> String {
        format!("{}.{}-{}.tar.gz", tag, self.os, self.arch)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// Join a download base and an archive name.
pub fn archive_url(base: &str, archive: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), archive)
}

/// Hex-encoded SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Download an archive into memory, checking it against `expected_sha256`
/// when one is given.
pub fn download(client: &Client, url: &str, expected_sha256: Option<&str>) -> Result<Vec<u8>> {
    let failed = |message: String| ToolstrapError::Download {
        url: url.to_string(),
        message,
    };

    tracing::info!("Downloading {}", url);
    let response = client.get(url).send().map_err(|e| failed(e.to_string()))?;
    if !response.status().is_success() {
        return Err(failed(format!("HTTP {}", response.status())));
    }
    let bytes = response.bytes().map_err(|e| failed(e.to_string()))?.to_vec();
    tracing::debug!("Downloaded {} bytes from {}", bytes.len(), url);

    match expected_sha256 {
        Some(expected) => {
            let actual = sha256_hex(&bytes);
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(failed(format!(
                    "checksum mismatch: expected {}, got {}",
                    expected, actual
                )));
            }
            tracing::debug!("Checksum verified for {}", url);
        }
        None => tracing::debug!("No published checksum for {}; skipping verification", url),
    }

    Ok(bytes)
}

/// Unpack a gzip-compressed tarball into `destination`.
pub fn extract(bytes: &[u8], archive: &str, destination: &Path) -> Result<()> {
    unpack(bytes, destination).map_err(|e| ToolstrapError::Extract {
        archive: archive.to_string(),
        destination: destination.to_path_buf(),
        message: format!("{:#}", e),
    })?;
    tracing::info!("Extracted {} into {}", archive, destination.display());
    Ok(())
}

fn unpack(bytes: &[u8], destination: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(destination)
        .with_context(|| format!("creating {}", destination.display()))?;
    let mut tarball = tar::Archive::new(GzDecoder::new(Cursor::new(bytes)));
    tarball.set_overwrite(true);
    tarball.unpack(destination).context("unpacking archive")?;
    Ok(())
}
