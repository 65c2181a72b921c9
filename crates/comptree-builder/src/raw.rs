//! Raw component records, as read from an analysis report

use comptree_model::ComponentType;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Type of a raw record
///
/// Reports may carry types this crate does not build; they deserialize as
/// [`Unrecognized`](Self::Unrecognized) and are rejected by the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RawComponentType {
    /// Type not set in the report
    #[default]
    Unset,
    /// Project
    Project,
    /// Module
    Module,
    /// Directory
    Directory,
    /// File
    File,
    /// Any other type
    #[serde(other)]
    Unrecognized,
}

impl RawComponentType {
    /// Matching component type, if the tree builder supports it
    #[must_use]
    pub fn component_type(self) -> Option<ComponentType> {
        match self {
            Self::Project => Some(ComponentType::Project),
            Self::Module => Some(ComponentType::Module),
            Self::Directory => Some(ComponentType::Directory),
            Self::File => Some(ComponentType::File),
            Self::Unset | Self::Unrecognized => None,
        }
    }
}

impl Display for RawComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unset => "UNSET",
            Self::Project => "PROJECT",
            Self::Module => "MODULE",
            Self::Directory => "DIRECTORY",
            Self::File => "FILE",
            Self::Unrecognized => "UNRECOGNIZED",
        };
        f.write_str(name)
    }
}

/// One component record of a report
///
/// Absent strings are empty, absent numbers zero, as in the report itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawComponent {
    /// Ref, unique within the report
    #[serde(rename = "ref")]
    pub reference: u32,
    /// Record type
    #[serde(rename = "type")]
    pub component_type: RawComponentType,
    /// Report key (projects and modules)
    pub key: String,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Version
    pub version: String,
    /// Path relative to the closest module (directories and files)
    pub path: String,
    /// Path relative to the project base directory
    pub project_relative_path: String,
    /// Number of lines (files)
    pub lines: i32,
    /// Language key (files)
    pub language: String,
    /// Test file flag (files)
    pub is_test: bool,
    /// Refs of the children, in order
    pub child_refs: Vec<u32>,
}

impl RawComponent {
    /// Record with `reference` and `component_type`, everything else empty
    #[must_use]
    pub fn new(reference: u32, component_type: RawComponentType) -> Self {
        Self {
            reference,
            component_type,
            ..Self::default()
        }
    }

    /// With key
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// With name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// With description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With version
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// With module-relative path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// With project-relative path
    #[must_use]
    pub fn with_project_relative_path(mut self, path: impl Into<String>) -> Self {
        self.project_relative_path = path.into();
        self
    }

    /// With line count
    #[must_use]
    pub fn with_lines(mut self, lines: i32) -> Self {
        self.lines = lines;
        self
    }

    /// With language key
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// With test file flag
    #[must_use]
    pub fn with_is_test(mut self, is_test: bool) -> Self {
        self.is_test = is_test;
        self
    }

    /// With children refs appended
    #[must_use]
    pub fn with_child_refs(mut self, child_refs: impl IntoIterator<Item = u32>) -> Self {
        self.child_refs.extend(child_refs);
        self
    }
}
