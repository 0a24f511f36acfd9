//! Tool catalog declaration and validation.
//!
//! A [`Catalog`] is an ordered list of [`ToolDescriptor`]s. Order is the
//! install order and the order of every report. Executables are the identity
//! key, so a catalog with two entries for the same executable is rejected
//! instead of silently letting the first one win.
//!
//! # Example
//!
//! ```
//! use toolstrap::catalog::{Catalog, ToolDescriptor};
//!
//! let catalog = Catalog::new(vec![
//!     ToolDescriptor::new("Alpha", "alpha", "example.com/alpha"),
//!     ToolDescriptor::new("Beta", "beta", "example.com/beta"),
//! ])
//! .unwrap();
//! assert_eq!(catalog.len(), 2);
//! assert!(catalog.get("beta").is_some());
//! ```

pub mod builtin;
pub mod descriptor;

pub use builtin::load_builtin;
pub use descriptor::ToolDescriptor;

use std::collections::HashMap;

use crate::error::{Result, ToolstrapError};

/// Ordered, validated set of tools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tools: Vec<ToolDescriptor>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate executables and blank fields.
    pub fn new(tools: Vec<ToolDescriptor>) -> Result<Self> {
        let mut seen: HashMap<&str, &str> = HashMap::new();

        for tool in &tools {
            for (field, value) in [
                ("name", &tool.name),
                ("executable", &tool.executable),
                ("source", &tool.source),
            ] {
                if value.trim().is_empty() {
                    return Err(ToolstrapError::ConfigValidationError {
                        message: format!(
                            "catalog entry '{}' has an empty {}",
                            display_name(tool),
                            field
                        ),
                    });
                }
            }

            if tool.executable.contains('/') || tool.executable.contains(char::is_whitespace) {
                return Err(ToolstrapError::ConfigValidationError {
                    message: format!(
                        "executable '{}' of '{}' must be a bare command name",
                        tool.executable, tool.name
                    ),
                });
            }

            if let Some(first) = seen.insert(&tool.executable, &tool.name) {
                return Err(ToolstrapError::DuplicateExecutable {
                    executable: tool.executable.clone(),
                    first: first.to_string(),
                    second: tool.name.clone(),
                });
            }
        }

        Ok(Self { tools })
    }

    /// An empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a tool by executable.
    pub fn get(&self, executable: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.executable == executable)
    }

    /// Restrict the catalog to the given executables, keeping catalog order.
    ///
    /// Unknown names are a configuration error so typos don't silently
    /// produce an empty run.
    pub fn select(&self, executables: &[String]) -> Result<Self> {
        if executables.is_empty() {
            return Ok(self.clone());
        }

        let unknown: Vec<&str> = executables
            .iter()
            .filter(|e| self.get(e).is_none())
            .map(|e| e.as_str())
            .collect();

        if !unknown.is_empty() {
            return Err(ToolstrapError::ConfigValidationError {
                message: format!("unknown tool(s) in --only: {}", unknown.join(", ")),
            });
        }

        Ok(Self {
            tools: self
                .tools
                .iter()
                .filter(|t| executables.contains(&t.executable))
                .cloned()
                .collect(),
        })
    }

    /// Iterate tools in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, ToolDescriptor> {
        self.tools.iter()
    }

    /// All tools in catalog order.
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Number of tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the catalog has no tools.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ToolDescriptor;
    type IntoIter = std::slice::Iter<'a, ToolDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.iter()
    }
}

fn display_name(tool: &ToolDescriptor) -> &str {
    if tool.name.trim().is_empty() {
        &tool.executable
    } else {
        &tool.name
    }
}
