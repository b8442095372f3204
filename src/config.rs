//! Publish-root configuration.
//!
//! A publish root pairs a local directory with the public base URL it is
//! served from. Roots are read from a TOML file (by default
//! `publish-roots.toml` in the working directory) and kept in file order:
//! the first root that can map a path wins.
//!
//! ## Configuration Options
//!
//! ```toml
//! [[roots]]
//! local_root = "/home/me/resimler/Brochures/Brochures"
//! base_url = "https://resimler.pages.dev/Brochures/Brochures"
//! # Optional: path segments that identify the same tree checked out
//! # somewhere else (another drive, another clone location).
//! marker_segments = ["Brochures", "Brochures"]
//!
//! [[roots]]
//! local_root = "/home/me/resimler/Market_Profile"
//! base_url = "https://resimler.pages.dev/Market_Profile"
//! marker_segments = ["Market_Profile"]
//! ```
//!
//! Unknown keys are rejected to catch typos early. A missing config file is
//! not an error: it yields an empty root list, and every image then ends up
//! unmapped, which the pipeline reports together with the (empty) root list.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "publish-roots.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// One deployable content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishRoot {
    /// Local directory whose contents are published.
    pub local_root: PathBuf,
    /// Public URL the directory is served under.
    pub base_url: String,
    /// Fallback fingerprint: consecutive path segments that mark the publish
    /// boundary when the tree lives somewhere other than `local_root`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marker_segments: Vec<String>,
}

impl PublishRoot {
    pub fn new(local_root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            local_root: local_root.into(),
            base_url: base_url.into(),
            marker_segments: Vec::new(),
        }
    }

    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.marker_segments = markers.into_iter().map(Into::into).collect();
        self
    }
}

/// Everything the tool reads from its config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Publish roots in priority order.
    pub roots: Vec<PublishRoot>,
}

impl ManifestConfig {
    /// Validate every root entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, root) in self.roots.iter().enumerate() {
            let n = i + 1;
            if root.local_root.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "roots[{n}].local_root must not be empty"
                )));
            }
            if !(root.base_url.starts_with("http://") || root.base_url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "roots[{n}].base_url must start with http:// or https:// (got '{}')",
                    root.base_url
                )));
            }
            for segment in &root.marker_segments {
                if segment.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "roots[{n}].marker_segments must not contain empty segments"
                    )));
                }
                if segment.contains(['/', '\\']) {
                    return Err(ConfigError::Validation(format!(
                        "roots[{n}].marker_segments: '{segment}' is not a single path segment; \
                         list each directory name separately"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Parse and validate config file contents.
pub fn parse_config(content: &str) -> Result<ManifestConfig, ConfigError> {
    let config: ManifestConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path`.
///
/// Returns the default (no roots) if the file does not exist.
/// Returns `Err` if the file exists but is unreadable, invalid TOML, or fails
/// validation.
pub fn load_config(path: &Path) -> Result<ManifestConfig, ConfigError> {
    if !path.exists() {
        log::debug!("No config at {}, using an empty root list", path.display());
        return Ok(ManifestConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    log::debug!(
        "Loaded {} publish root(s) from {}",
        config.roots.len(),
        path.display()
    );
    Ok(config)
}

/// Returns a fully-commented example config file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Publish Manifest Configuration
# ==============================
# Each [[roots]] entry maps a local folder to the public URL it is served
# from. Entries are tried top to bottom; the first one that can map an
# image wins, so list more specific roots first.
#
# For every root two strategies are tried, in this order:
#   1. The image lies under `local_root` → the path below it is appended
#      to `base_url`.
#   2. The image path contains `marker_segments` (consecutive folder names,
#      compared case-insensitively) → everything after the first occurrence
#      is appended to `base_url`. This finds the same tree checked out on
#      another drive or in another clone location.
#
# Every URL gets a shared `?v=<YYYYMMDDHHMMSS>` cache-busting suffix.
# Unknown keys will cause an error.

[[roots]]
# Local folder that is published (absolute path).
local_root = "/home/me/resimler/Brochures/Brochures"
# Public URL of that folder.
base_url = "https://resimler.pages.dev/Brochures/Brochures"
# Optional fallback fingerprint, one folder name per entry.
marker_segments = ["Brochures", "Brochures"]

[[roots]]
local_root = "/home/me/resimler/Market_Profile"
base_url = "https://resimler.pages.dev/Market_Profile"
marker_segments = ["Market_Profile"]

[[roots]]
local_root = "/home/me/resimler/LabelveTarihler"
base_url = "https://resimler.pages.dev/LabelveTarihler"
marker_segments = ["LabelveTarihler"]
"##
}
