//! Overview configuration with validation.

use serde::{Deserialize, Serialize};
use shared_types::{ObjectKey, KIND_DEFINITION_API_VERSION, KIND_DEFINITION_KIND};
use std::env;
use thiserror::Error;

/// Main overview configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewConfig {
    /// Section that aggregates one describer per resource kind
    pub section: SectionConfig,
    /// Which records announce resource kinds
    pub watch: WatchConfig,
}

impl OverviewConfig {
    /// Create configuration from environment variables.
    ///
    /// - `DASH_SECTION_ROOT`: section root path (default: /custom-resources)
    /// - `DASH_SECTION_TITLE`: section title (default: Custom Resources)
    pub fn from_env() -> Self {
        let defaults = SectionConfig::default();
        Self {
            section: SectionConfig {
                root: env::var("DASH_SECTION_ROOT").unwrap_or(defaults.root),
                title: env::var("DASH_SECTION_TITLE").unwrap_or(defaults.title),
            },
            watch: WatchConfig::default(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let root = &self.section.root;
        if !root.starts_with('/') {
            return Err(ConfigError::InvalidRoot(format!(
                "{} must start with '/'",
                root
            )));
        }
        if root.len() > 1 && root.ends_with('/') {
            return Err(ConfigError::InvalidRoot(format!(
                "{} must not end with '/'",
                root
            )));
        }
        if root.contains('{') || root.contains('}') {
            return Err(ConfigError::InvalidRoot(format!(
                "{} must not contain placeholders",
                root
            )));
        }
        if self.section.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        if self.watch.api_version.is_empty() || self.watch.kind.is_empty() {
            return Err(ConfigError::InvalidWatchKey);
        }
        Ok(())
    }
}

/// Section configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Root path; list paths are `<root>/<kind>`
    pub root: String,
    /// Title of the merged section view
    pub title: String,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            root: "/custom-resources".to_string(),
            title: "Custom Resources".to_string(),
        }
    }
}

/// Key of the records whose add/delete drives reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub api_version: String,
    pub kind: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            api_version: KIND_DEFINITION_API_VERSION.to_string(),
            kind: KIND_DEFINITION_KIND.to_string(),
        }
    }
}

impl WatchConfig {
    pub fn key(&self) -> ObjectKey {
        ObjectKey::new(self.api_version.clone(), self.kind.clone())
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid section root: {0}")]
    InvalidRoot(String),
    #[error("section title cannot be empty")]
    EmptyTitle,
    #[error("watch key needs both api_version and kind")]
    InvalidWatchKey,
}
