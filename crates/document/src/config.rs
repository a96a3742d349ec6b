//! Tracking configuration via `fieldtrack.toml`
//!
//! The config is attached to a [`Schema`](crate::Schema) when it is built, so
//! every document of that schema tracks the same way.

use fieldtrack_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "fieldtrack.toml";

/// What bulk assignment does with keys the schema does not declare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFields {
    /// Fail the whole assignment before anything is written
    #[default]
    Reject,
    /// Skip the key and log a warning
    Ignore,
}

/// Tracking configuration loaded from `fieldtrack.toml`.
///
/// # Example
///
/// ```toml
/// strings_as_containers = false
/// unknown_fields = "reject"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Snapshot `String` fields on read, as if they were mutable buffers.
    #[serde(default)]
    pub strings_as_containers: bool,
    /// Handling of undeclared keys in bulk assignment.
    #[serde(default)]
    pub unknown_fields: UnknownFields,
}

impl TrackingConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# fieldtrack configuration
#
# Snapshot String fields on every read, the same as Text/Array/Object fields.
# Only needed when String values are mutated in place through get_mut().
strings_as_containers = false

# Bulk assignment of undeclared keys: "reject" (default) or "ignore"
unknown_fields = "reject"
"#
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse tracking config: {}", e)))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::Config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}
