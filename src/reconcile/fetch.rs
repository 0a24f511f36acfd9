//! Default primitives for the reconciler: PATH lookup, `go install`, and
//! post-install commands.

use crate::catalog::ToolDescriptor;
use crate::config::ToolchainConfig;
use crate::error::{Result, ToolstrapError};
use crate::shell::{self, CommandOptions};
use crate::toolchain::version::toolchain_binary;
use std::path::PathBuf;

/// Installs tools with `go install`, into `<gopath>/bin`.
#[derive(Debug, Clone)]
pub struct GoFetcher {
    go: PathBuf,
    gopath: PathBuf,
}

impl GoFetcher {
    pub fn new(config: &ToolchainConfig) -> Self {
        Self {
            go: toolchain_binary(&config.install_root),
            gopath: config.gopath.clone(),
        }
    }

    /// Directory `go install` writes binaries to.
    pub fn bin_dir(&self) -> PathBuf {
        self.gopath.join("bin")
    }

    /// The toolchain binary: the one under the install root, else `go` on PATH.
    fn go_binary(&self) -> Option<PathBuf> {
        if self.go.is_file() {
            Some(self.go.clone())
        } else {
            shell::which("go")
        }
    }

    /// Run `go install <target>` for `tool`.
    ///
    /// # Errors
    ///
    /// Returns `Fetch` when no toolchain is available, the command can't be
    /// spawned, or it exits non-zero.
    pub fn fetch(&self, tool: &ToolDescriptor) -> Result<()> {
        let failed = |message: String| ToolstrapError::Fetch {
            tool: tool.name.clone(),
            source_locator: tool.source.clone(),
            message,
        };

        let go = self
            .go_binary()
            .ok_or_else(|| failed("go toolchain not found".to_string()))?;

        let target = tool.install_target();
        let options = CommandOptions::captured()
            .with_env("GOPATH", &self.gopath.display().to_string())
            .with_env("GOBIN", &self.bin_dir().display().to_string());

        tracing::info!("Installing {} from {}", tool.executable, target);
        let result = shell::execute(&go, &["install", target.as_str()], &options)
            .map_err(|e| failed(e.to_string()))?;

        if result.success {
            Ok(())
        } else {
            tracing::debug!("go install {} stderr:\n{}", target, result.stderr);
            let message = result
                .last_error_line()
                .map(String::from)
                .unwrap_or_else(|| format!("go install exited with {:?}", result.exit_code));
            Err(failed(message))
        }
    }
}

/// Run a tool's post-install command through `sh -c`.
pub fn run_inject(tool: &ToolDescriptor, command: &str) -> Result<()> {
    tracing::info!("Running post-install for {}: {}", tool.executable, command);
    let failed = || ToolstrapError::Inject {
        tool: tool.name.clone(),
        command: command.to_string(),
    };

    let result = shell::execute_shell(command, &CommandOptions::captured()).map_err(|e| {
        tracing::debug!("{}", e);
        failed()
    })?;

    if result.success {
        Ok(())
    } else {
        tracing::debug!(
            "post-install for {} exited with {:?}: {}",
            tool.executable,
            result.exit_code,
            result.last_error_line().unwrap_or("")
        );
        Err(failed())
    }
}

/// Whether `executable` resolves on the current PATH.
pub fn is_present(executable: &str) -> bool {
    shell::which(executable).is_some()
}
