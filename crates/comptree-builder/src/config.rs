//! Tree builder configuration

use serde::{Deserialize, Serialize};

/// Version given to the project when neither the report nor the previous
/// analysis provides one
pub const DEFAULT_PROJECT_VERSION: &str = "not provided";

/// Settings of the tree builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeBuilderConfig {
    /// Prefix of every scm path; empty for none
    pub scm_base_path: String,
    /// Project version fallback
    pub default_version: String,
}

impl TreeBuilderConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With scm base path
    #[inline]
    #[must_use]
    pub fn with_scm_base_path(mut self, scm_base_path: impl Into<String>) -> Self {
        self.scm_base_path = scm_base_path.into();
        self
    }

    /// With project version fallback
    #[inline]
    #[must_use]
    pub fn with_default_version(mut self, default_version: impl Into<String>) -> Self {
        self.default_version = default_version.into();
        self
    }
}

impl Default for TreeBuilderConfig {
    fn default() -> Self {
        Self {
            scm_base_path: String::new(),
            default_version: DEFAULT_PROJECT_VERSION.to_string(),
        }
    }
}

/// What is already known of the project outside the report
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDescriptor {
    /// Project key, used as the module key of the project
    pub key: String,
    /// Project name, used when the report has none
    pub name: String,
    /// Version of the previous analysis, if any
    pub base_version: Option<String>,
}

impl ProjectDescriptor {
    /// Descriptor of the project keyed `key`
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            base_version: None,
        }
    }

    /// With the version of the previous analysis
    #[inline]
    #[must_use]
    pub fn with_base_version(mut self, version: impl Into<String>) -> Self {
        self.base_version = Some(version.into());
        self
    }
}
