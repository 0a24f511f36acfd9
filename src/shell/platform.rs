//! Platform-specific shell detection.

use std::path::{Path, PathBuf};

/// The user's login shell and the profile toolstrap writes to for it.
#[derive(Debug, Clone)]
pub struct ShellInfo {
    pub executable: PathBuf,
    pub name: ShellType,
    pub profile: PathBuf,
}

/// Command the user runs to pick up profile changes in an open shell.
pub fn reload_command(profile: &Path) -> String {
    format!("source {}", profile.display())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    Sh,
    Unknown,
}

impl ShellType {
    /// Classify by file stem, so `/usr/local/bin/zsh` is `Zsh`.
    pub fn from_executable(exe: &str) -> Self {
        let name = Path::new(exe)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "bash" => ShellType::Bash,
            "zsh" => ShellType::Zsh,
            "fish" => ShellType::Fish,
            "sh" | "dash" | "ash" => ShellType::Sh,
            _ => ShellType::Unknown,
        }
    }
}

/// Shell from `$SHELL`, defaulting to `/bin/sh`.
pub fn detect_shell() -> ShellInfo {
    let executable = std::env::var_os("SHELL")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/bin/sh"));
    let shell_type = ShellType::from_executable(&executable.to_string_lossy());
    let home = dirs::home_dir().unwrap_or_default();

    ShellInfo {
        executable,
        name: shell_type,
        profile: default_profile(shell_type, &home),
    }
}

/// Profile file for a shell type under `home`.
///
/// Lines are POSIX `export` statements, so fish (which can't source them)
/// falls back to `~/.profile` along with everything unrecognized.
pub fn default_profile(shell_type: ShellType, home: &Path) -> PathBuf {
    match shell_type {
        ShellType::Bash => home.join(".bashrc"),
        ShellType::Zsh => home.join(".zshrc"),
        ShellType::Fish | ShellType::Sh | ShellType::Unknown => home.join(".profile"),
    }
}

const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
];

/// True when any well-known CI variable is set. `main` uses plain output then.
pub fn is_ci() -> bool {
    CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
}

/// Effective uid is 0.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid has no preconditions and cannot fail.
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        false
    }
}

/// Whether the current user can create entries in `dir`.
///
/// Probes by creating and removing a temporary file, which respects ACLs
/// and read-only mounts that permission bits alone don't show.
pub fn can_write_dir(dir: &Path) -> bool {
    let probe = dir.join(format!(".toolstrap-write-probe-{}", std::process::id()));
    match std::fs::File::create(&probe) {
        Ok(_) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_type_from_executable() {
        assert_eq!(ShellType::from_executable("/bin/bash"), ShellType::Bash);
        assert_eq!(ShellType::from_executable("/usr/bin/zsh"), ShellType::Zsh);
        assert_eq!(ShellType::from_executable("/usr/bin/fish"), ShellType::Fish);
        assert_eq!(ShellType::from_executable("/bin/dash"), ShellType::Sh);
        assert_eq!(ShellType::from_executable("unknown"), ShellType::Unknown);
    }

    #[test]
    fn detect_shell_returns_info() {
        let info = detect_shell();
        assert!(!info.executable.as_os_str().is_empty());
        assert!(info.profile.file_name().is_some());
    }

    #[test]
    fn profile_for_bash_and_zsh() {
        let home = Path::new("/home/user");
        assert_eq!(
            default_profile(ShellType::Bash, home),
            PathBuf::from("/home/user/.bashrc")
        );
        assert_eq!(
            default_profile(ShellType::Zsh, home),
            PathBuf::from("/home/user/.zshrc")
        );
    }

    #[test]
    fn profile_falls_back_to_dot_profile() {
        let home = Path::new("/home/user");
        for shell in [ShellType::Fish, ShellType::Sh, ShellType::Unknown] {
            assert!(default_profile(shell, home).ends_with(".profile"));
        }
    }

    #[test]
    fn reload_command_sources_profile() {
        assert_eq!(
            reload_command(Path::new("/home/user/.zshrc")),
            "source /home/user/.zshrc"
        );
    }

    #[test]
    fn can_write_temp_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(can_write_dir(temp.path()));
        assert!(!can_write_dir(&temp.path().join("missing")));
    }

    #[test]
    fn ci_vars_include_generic_flag() {
        assert!(CI_VARS.contains(&"CI"));
    }
}
