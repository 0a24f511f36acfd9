//! Tool descriptors.

use serde::{Deserialize, Serialize};

/// A single tool declared in the catalog.
///
/// The `executable` is the identity key: it is what gets looked up on PATH
/// and what must be unique across a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Human-readable name (e.g., "Subfinder").
    pub name: String,

    /// Executable the tool installs (e.g., "subfinder").
    pub executable: String,

    /// Source locator handed to the package fetch (a Go module path).
    pub source: String,

    /// Best-effort command run after a successful fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inject: Option<String>,
}

impl ToolDescriptor {
    /// Create a descriptor without a post-install command.
    pub fn new(name: &str, executable: &str, source: &str) -> Self {
        Self {
            name: name.to_string(),
            executable: executable.to_string(),
            source: source.to_string(),
            inject: None,
        }
    }

    /// Attach a post-install command.
    pub fn with_inject(mut self, command: &str) -> Self {
        self.inject = Some(command.to_string());
        self
    }

    /// The argument passed to `go install`.
    ///
    /// Sources that already pin a version (`module@v1.2.3`) are used as-is;
    /// everything else tracks `@latest`.
    pub fn install_target(&self) -> String {
        if self.source.contains('@') {
            self.source.clone()
        } else {
            format!("{}@latest", self.source)
        }
    }
}
