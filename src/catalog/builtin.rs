//! Built-in catalog embedded at compile time.

use include_dir::{include_dir, Dir};
use serde::Deserialize;

use crate::catalog::{Catalog, ToolDescriptor};
use crate::error::{Result, ToolstrapError};

/// Embedded catalogs directory.
static CATALOGS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/catalogs");

/// Name of the catalog used when no configuration declares one.
pub const DEFAULT_CATALOG: &str = "recon.yml";

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tools: Vec<ToolDescriptor>,
}

/// Load the default built-in catalog.
pub fn load_builtin() -> Result<Catalog> {
    load_named(DEFAULT_CATALOG)
}

/// Load a built-in catalog by file name.
pub fn load_named(name: &str) -> Result<Catalog> {
    let path = format!("catalogs/{}", name);
    let file = CATALOGS_DIR
        .get_file(name)
        .ok_or_else(|| ToolstrapError::ConfigNotFound {
            path: path.clone().into(),
        })?;

    let content = file
        .contents_utf8()
        .ok_or_else(|| ToolstrapError::ConfigParseError {
            path: path.clone().into(),
            message: "Invalid UTF-8".to_string(),
        })?;

    let parsed: CatalogFile =
        serde_yaml::from_str(content).map_err(|e| ToolstrapError::ConfigParseError {
            path: path.into(),
            message: e.to_string(),
        })?;

    Catalog::new(parsed.tools)
}
