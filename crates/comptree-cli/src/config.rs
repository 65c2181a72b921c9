//! CLI configuration file

use anyhow::Context;
use comptree_builder::{ProjectDescriptor, TreeBuilderConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Content of the `--config` TOML file
///
/// ```toml
/// [builder]
/// scm_base_path = "services/api"
///
/// [project]
/// key = "org:api"
/// name = "API"
/// base_version = "1.4"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Tree builder settings
    pub builder: TreeBuilderConfig,
    /// Project known outside the report
    pub project: ProjectDescriptor,
}

impl CliConfig {
    /// Parse a TOML configuration
    ///
    /// # Errors
    /// When the TOML is malformed
    pub fn from_toml_str(toml: &str) -> anyhow::Result<Self> {
        toml::from_str(toml).context("invalid configuration")
    }

    /// Read and parse a TOML configuration file
    ///
    /// # Errors
    /// When the file cannot be read or is malformed
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration '{}'", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("failed to load configuration '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}
