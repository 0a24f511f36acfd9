//! Toolchain installation.
//!
//! The installer moves the toolchain from `NotInstalled` or `Stale` to
//! `UpToDate`: download the release archive for this platform, replace
//! `<install_root>/go` with its contents, then check that the binary reports
//! the desired version. In every state the profile entries are ensured and
//! exported to the running process.

use crate::config::ToolchainConfig;
use crate::error::{Result, ToolstrapError};
use crate::shell::profile::{self, ProfileEntry};
use crate::toolchain::archive::{self, Platform};
use crate::toolchain::version::{Release, ToolchainVersion, VersionInfo, VersionOracle};
use std::fs;
use std::path::{Path, PathBuf};

/// Toolchain state relative to the desired version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainState {
    NotInstalled,
    /// Installed, but not the desired version (older or newer).
    Stale,
    UpToDate,
}

impl ToolchainState {
    /// Derive the state from installed and desired versions.
    pub fn from_info(info: &VersionInfo) -> Self {
        match info.installed {
            None => Self::NotInstalled,
            Some(installed) if installed == info.desired.version => Self::UpToDate,
            Some(_) => Self::Stale,
        }
    }

    /// Whether reaching `UpToDate` requires a download.
    pub fn needs_install(&self) -> bool {
        !matches!(self, Self::UpToDate)
    }

    /// Human-readable label for status output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotInstalled => "not installed",
            Self::Stale => "stale",
            Self::UpToDate => "up to date",
        }
    }
}

impl std::fmt::Display for ToolchainState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The profile entries for a toolchain configuration.
///
/// `<install_root>/go/bin` on PATH, `GOPATH`, and `<gopath>/bin` on PATH,
/// in that order.
pub fn profile_entries(config: &ToolchainConfig) -> Vec<ProfileEntry> {
    vec![
        ProfileEntry::path_append(config.install_root.join("go").join("bin")),
        ProfileEntry::export("GOPATH", config.gopath.display().to_string()),
        ProfileEntry::path_append(config.gopath.join("bin")),
    ]
}

/// What a bootstrap did (or, in dry-run, would do).
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// State before any action.
    pub initial: ToolchainState,
    /// Version found before any action.
    pub previous: Option<ToolchainVersion>,
    /// Desired release.
    pub desired: Release,
    /// Profile lines appended this run.
    pub profile_lines_added: usize,
    /// Planned actions (dry-run only).
    pub planned: Vec<String>,
}

impl BootstrapReport {
    /// Whether a download and extraction happened (or would happen).
    pub fn installed(&self) -> bool {
        self.initial.needs_install()
    }
}

/// Brings the toolchain to the desired version.
pub struct ToolchainInstaller {
    config: ToolchainConfig,
    oracle: VersionOracle,
    profile: PathBuf,
    platform: Option<Platform>,
}

impl ToolchainInstaller {
    /// Create an installer that writes environment lines to `profile`.
    pub fn new(config: &ToolchainConfig, profile: &Path) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            oracle: VersionOracle::new(config)?,
            profile: profile.to_path_buf(),
            platform: None,
        })
    }

    /// Use a specific oracle (e.g. one without PATH fallback).
    pub fn with_oracle(mut self, oracle: VersionOracle) -> Self {
        self.oracle = oracle;
        self
    }

    /// Install archives for `platform` instead of the running one.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// The version oracle.
    pub fn oracle(&self) -> &VersionOracle {
        &self.oracle
    }

    /// Profile file written by this installer.
    pub fn profile(&self) -> &Path {
        &self.profile
    }

    fn platform(&self) -> Result<Platform> {
        match self.platform {
            Some(p) => Ok(p),
            None => Platform::current(),
        }
    }

    fn go_dir(&self) -> PathBuf {
        self.config.install_root.join("go")
    }

    /// Look up installed and desired versions.
    pub fn inspect(&self) -> Result<(VersionInfo, ToolchainState)> {
        let info = self.oracle.version_info()?;
        let state = ToolchainState::from_info(&info);
        tracing::debug!(
            "Toolchain installed={:?} desired={} state={:?}",
            info.installed,
            info.desired.version,
            state
        );
        Ok((info, state))
    }

    /// Bring the toolchain up to date and wire the profile.
    ///
    /// # Errors
    ///
    /// Feed, download, extraction and verification failures are all fatal
    /// and returned as-is.
    pub fn bootstrap(&self) -> Result<BootstrapReport> {
        let (info, state) = self.inspect()?;

        if state.needs_install() {
            tracing::info!(
                "Toolchain {} ({:?} → {}), installing",
                state,
                info.installed.map(|v| v.to_string()),
                info.desired.version
            );
            self.install(&info.desired)?;
        } else {
            tracing::info!("Toolchain {} is up to date", info.desired.version);
        }

        let entries = profile_entries(&self.config);
        let added = profile::ensure_entries(&self.profile, &entries)?;
        profile::apply_to_current_session(&entries);

        if state.needs_install() {
            self.verify(&info.desired)?;
        }

        Ok(BootstrapReport {
            initial: state,
            previous: info.installed,
            desired: info.desired,
            profile_lines_added: added,
            planned: Vec::new(),
        })
    }

    /// Report what `bootstrap` would do without touching anything.
    pub fn plan(&self) -> Result<BootstrapReport> {
        let (info, state) = self.inspect()?;
        let mut planned = Vec::new();

        if state.needs_install() {
            let platform = self.platform()?;
            let archive_name = platform.archive_name(&info.desired.tag);
            if self.go_dir().exists() {
                planned.push(format!("remove {}", self.go_dir().display()));
            }
            planned.push(format!(
                "download {}",
                archive::archive_url(&self.config.download_base, &archive_name)
            ));
            planned.push(format!(
                "extract {} into {}",
                archive_name,
                self.config.install_root.display()
            ));
        }

        for entry in profile_entries(&self.config) {
            planned.push(format!("ensure '{}' in {}", entry, self.profile.display()));
        }

        Ok(BootstrapReport {
            initial: state,
            previous: info.installed,
            desired: info.desired,
            profile_lines_added: 0,
            planned,
        })
    }

    /// Download and unpack `release`, replacing any existing tree.
    ///
    /// The archive is fetched and checked before the old tree is removed,
    /// so a failed download leaves the previous toolchain in place.
    pub fn install(&self, release: &Release) -> Result<()> {
        let platform = self.platform()?;
        let archive_name = platform.archive_name(&release.tag);
        let url = archive::archive_url(&self.config.download_base, &archive_name);

        let checksum = release.checksum_for(&archive_name);
        let bytes = archive::download(self.oracle.client(), &url, checksum)?;

        let go_dir = self.go_dir();
        if go_dir.exists() {
            tracing::info!("Removing {}", go_dir.display());
            fs::remove_dir_all(&go_dir)?;
        }

        archive::extract(&bytes, &archive_name, &self.config.install_root)
    }

    /// Re-probe and confirm the installed version is `release`.
    pub fn verify(&self, release: &Release) -> Result<ToolchainVersion> {
        match self.oracle.detect_installed() {
            Some(found) if found == release.version => {
                tracing::info!("Toolchain {} verified", found);
                Ok(found)
            }
            found => Err(ToolstrapError::Verification {
                expected: release.version.to_string(),
                found: found
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "nothing".to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolchain::version::ToolchainVersion;

    fn info(installed: Option<&str>, desired: &str) -> VersionInfo {
        VersionInfo {
            installed: installed.map(|v| ToolchainVersion::parse(v).unwrap()),
            desired: Release::pinned(desired).unwrap(),
        }
    }

    #[test]
    fn state_from_versions() {
        assert_eq!(
            ToolchainState::from_info(&info(None, "1.22.0")),
            ToolchainState::NotInstalled
        );
        assert_eq!(
            ToolchainState::from_info(&info(Some("1.21.0"), "1.22.0")),
            ToolchainState::Stale
        );
        assert_eq!(
            ToolchainState::from_info(&info(Some("1.22.0"), "1.22")),
            ToolchainState::UpToDate
        );
    }

    #[test]
    fn newer_installed_is_still_stale() {
        assert_eq!(
            ToolchainState::from_info(&info(Some("1.23.1"), "1.22.0")),
            ToolchainState::Stale
        );
    }

    #[test]
    fn profile_entries_in_order() {
        let config = ToolchainConfig {
            install_root: PathBuf::from("/usr/local"),
            gopath: PathBuf::from("/home/user/go"),
            ..Default::default()
        };
        let lines: Vec<String> = profile_entries(&config).iter().map(|e| e.line()).collect();
        assert_eq!(
            lines,
            vec![
                "export PATH=\"$PATH:/usr/local/go/bin\"",
                "export GOPATH=\"/home/user/go\"",
                "export PATH=\"$PATH:/home/user/go/bin\"",
            ]
        );
    }

    #[cfg(unix)]
    mod bootstrap {
        use super::super::*;
        use crate::toolchain::archive::{sha256_hex, tests::tarball};
        use httpmock::prelude::*;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        const ARCHIVE: &str = "go1.22.0.linux-amd64.tar.gz";

        fn go_script(version: &str) -> String {
            format!("#!/bin/sh\necho 'go version go{} linux/amd64'\n", version)
        }

        struct Fixture {
            server: MockServer,
            temp: TempDir,
            config: ToolchainConfig,
        }

        impl Fixture {
            fn new() -> Self {
                let server = MockServer::start();
                let temp = TempDir::new().unwrap();
                let config = ToolchainConfig {
                    feed_url: server.url("/dl/?mode=json"),
                    download_base: server.url("/dl/"),
                    install_root: temp.path().join("root"),
                    gopath: temp.path().join("gopath"),
                    timeout_secs: 5,
                    ..Default::default()
                };
                Self {
                    server,
                    temp,
                    config,
                }
            }

            fn profile(&self) -> PathBuf {
                self.temp.path().join("home").join(".zshrc")
            }

            fn serve_feed(&self, sha256: &str) -> httpmock::Mock<'_> {
                let body = format!(
                    r#"[{{"version": "go1.22.0", "stable": true, "files": [
                        {{"filename": "{}", "os": "linux", "arch": "amd64",
                          "sha256": "{}", "kind": "archive"}}]}}]"#,
                    ARCHIVE, sha256
                );
                self.server.mock(|when, then| {
                    when.method(GET).path("/dl/");
                    then.status(200).body(body);
                })
            }

            fn serve_archive(&self, bytes: Vec<u8>) -> httpmock::Mock<'_> {
                self.server.mock(|when, then| {
                    when.method(GET).path(format!("/dl/{}", ARCHIVE));
                    then.status(200).body(bytes);
                })
            }

            fn install_existing(&self, version: &str) {
                let bin = self.config.install_root.join("go/bin/go");
                fs::create_dir_all(bin.parent().unwrap()).unwrap();
                fs::write(&bin, go_script(version)).unwrap();
                fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
                fs::write(self.config.install_root.join("go/OLD"), "stale").unwrap();
            }

            fn installer(&self) -> ToolchainInstaller {
                let oracle = VersionOracle::new(&self.config)
                    .unwrap()
                    .without_path_fallback();
                ToolchainInstaller::new(&self.config, &self.profile())
                    .unwrap()
                    .with_oracle(oracle)
                    .with_platform(Platform {
                        os: "linux",
                        arch: "amd64",
                    })
            }
        }

        fn release_archive(version: &str) -> Vec<u8> {
            let script = go_script(version);
            tarball(&[("go/VERSION", 0o644, "release"), ("go/bin/go", 0o755, &script)])
        }

        #[test]
        fn not_installed_to_up_to_date() {
            let fx = Fixture::new();
            let bytes = release_archive("1.22.0");
            fx.serve_feed(&sha256_hex(&bytes));
            let archive = fx.serve_archive(bytes);

            let report = fx.installer().bootstrap().unwrap();

            archive.assert_calls(1);
            assert_eq!(report.initial, ToolchainState::NotInstalled);
            assert!(report.installed());
            assert_eq!(report.profile_lines_added, 3);
            assert_eq!(
                fx.installer().oracle().detect_installed(),
                Some(ToolchainVersion::new(1, 22, 0))
            );
        }

        #[test]
        fn stale_tree_is_replaced() {
            let fx = Fixture::new();
            fx.install_existing("1.21.0");
            let bytes = release_archive("1.22.0");
            fx.serve_feed(&sha256_hex(&bytes));
            let archive = fx.serve_archive(bytes);

            let report = fx.installer().bootstrap().unwrap();

            archive.assert_calls(1);
            assert_eq!(report.initial, ToolchainState::Stale);
            assert_eq!(report.previous, Some(ToolchainVersion::new(1, 21, 0)));
            assert!(report.installed());
            assert!(!fx.config.install_root.join("go/OLD").exists());
            assert!(fx.config.install_root.join("go/VERSION").exists());
            assert_eq!(
                fx.installer().oracle().detect_installed(),
                Some(ToolchainVersion::new(1, 22, 0))
            );
            let (_, state) = fx.installer().inspect().unwrap();
            assert_eq!(state, ToolchainState::UpToDate);
        }

        #[test]
        fn up_to_date_skips_download_but_writes_profile() {
            let fx = Fixture::new();
            fx.install_existing("1.22.0");
            fx.serve_feed("");
            let archive = fx.serve_archive(release_archive("1.22.0"));

            let report = fx.installer().bootstrap().unwrap();

            archive.assert_calls(0);
            assert_eq!(report.initial, ToolchainState::UpToDate);
            assert!(!report.installed());

            let profile = fs::read_to_string(fx.profile()).unwrap();
            assert_eq!(profile.lines().count(), 3);
            assert!(fx.config.install_root.join("go/OLD").exists());
        }

        #[test]
        fn repeated_bootstrap_adds_profile_lines_once() {
            let fx = Fixture::new();
            fx.install_existing("1.22.0");
            fx.serve_feed("");

            let first = fx.installer().bootstrap().unwrap();
            let second = fx.installer().bootstrap().unwrap();

            assert_eq!(first.profile_lines_added, 3);
            assert_eq!(second.profile_lines_added, 0);
            let profile = fs::read_to_string(fx.profile()).unwrap();
            assert_eq!(profile.lines().count(), 3);
        }

        #[test]
        fn wrong_version_after_install_is_verification_error() {
            let fx = Fixture::new();
            let bytes = release_archive("1.21.9");
            fx.serve_feed(&sha256_hex(&bytes));
            fx.serve_archive(bytes);

            let err = fx.installer().bootstrap().unwrap_err();
            assert!(matches!(
                err,
                ToolstrapError::Verification { ref expected, ref found }
                    if expected == "1.22.0" && found == "1.21.9"
            ));
        }

        #[test]
        fn checksum_mismatch_keeps_existing_tree() {
            let fx = Fixture::new();
            fx.install_existing("1.21.0");
            fx.serve_feed("0000000000000000000000000000000000000000000000000000000000000000");
            fx.serve_archive(release_archive("1.22.0"));

            let err = fx.installer().bootstrap().unwrap_err();

            assert!(matches!(err, ToolstrapError::Download { .. }));
            assert!(fx.config.install_root.join("go/OLD").exists());
            assert!(!fx.profile().exists());
        }

        #[test]
        fn feed_failure_is_fatal() {
            let fx = Fixture::new();
            fx.server.mock(|when, then| {
                when.method(GET).path("/dl/");
                then.status(500);
            });

            let err = fx.installer().bootstrap().unwrap_err();
            assert!(matches!(err, ToolstrapError::Network { .. }));
            assert!(!fx.profile().exists());
        }

        #[test]
        fn plan_touches_nothing() {
            let fx = Fixture::new();
            fx.install_existing("1.21.0");
            fx.serve_feed("");
            let archive = fx.serve_archive(release_archive("1.22.0"));

            let report = fx.installer().plan().unwrap();

            archive.assert_calls(0);
            assert_eq!(report.initial, ToolchainState::Stale);
            assert!(report.planned.iter().any(|a| a.starts_with("remove ")));
            assert!(report.planned.iter().any(|a| a.contains(ARCHIVE)));
            assert_eq!(
                report
                    .planned
                    .iter()
                    .filter(|a| a.starts_with("ensure "))
                    .count(),
                3
            );
            assert!(fx.config.install_root.join("go/OLD").exists());
            assert!(!fx.profile().exists());
        }
    }
}
