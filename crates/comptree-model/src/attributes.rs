//! Variant-specific component attributes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attributes carried by every report component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAttributes {
    reference: u32,
    version: Option<String>,
    path: Option<String>,
    scm_path: Option<String>,
}

impl ReportAttributes {
    /// Attributes for the component at `reference` in the report
    #[inline]
    #[must_use]
    pub fn new(reference: u32) -> Self {
        Self {
            reference,
            version: None,
            path: None,
            scm_path: None,
        }
    }

    /// With version
    #[inline]
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// With path relative to the enclosing module
    #[inline]
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// With path relative to the SCM root
    #[inline]
    #[must_use]
    pub fn with_scm_path(mut self, scm_path: impl Into<String>) -> Self {
        self.scm_path = Some(scm_path.into());
        self
    }

    /// Reference of the component in its report
    #[inline]
    #[must_use]
    pub fn reference(&self) -> u32 {
        self.reference
    }

    /// Version declared by the report
    #[inline]
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Path relative to the enclosing module
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Path relative to the SCM root
    #[inline]
    #[must_use]
    pub fn scm_path(&self) -> Option<&str> {
        self.scm_path.as_deref()
    }
}

/// Attributes only carried by `FILE` components
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttributes {
    lines: u32,
    unit_test: bool,
    language_key: Option<String>,
}

impl FileAttributes {
    /// File of `lines` lines
    #[inline]
    #[must_use]
    pub fn new(lines: u32) -> Self {
        Self {
            lines,
            unit_test: false,
            language_key: None,
        }
    }

    /// Mark as unit test file
    #[inline]
    #[must_use]
    pub fn with_unit_test(mut self, unit_test: bool) -> Self {
        self.unit_test = unit_test;
        self
    }

    /// With language key
    #[inline]
    #[must_use]
    pub fn with_language_key(mut self, language_key: impl Into<String>) -> Self {
        self.language_key = Some(language_key.into());
        self
    }

    /// Number of lines
    #[inline]
    #[must_use]
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Whether the file is a unit test
    #[inline]
    #[must_use]
    pub fn is_unit_test(&self) -> bool {
        self.unit_test
    }

    /// Language of the file, if known
    #[inline]
    #[must_use]
    pub fn language_key(&self) -> Option<&str> {
        self.language_key.as_deref()
    }
}

/// Attributes only carried by `PROJECT_VIEW` components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectViewAttributes {
    project_uuid: String,
    analysis_date: Option<DateTime<Utc>>,
}

impl ProjectViewAttributes {
    /// Reference to the project with uuid `project_uuid`
    #[inline]
    #[must_use]
    pub fn new(project_uuid: impl Into<String>) -> Self {
        Self {
            project_uuid: project_uuid.into(),
            analysis_date: None,
        }
    }

    /// With date of the referenced project's last analysis
    #[inline]
    #[must_use]
    pub fn with_analysis_date(mut self, date: DateTime<Utc>) -> Self {
        self.analysis_date = Some(date);
        self
    }

    /// Uuid of the referenced project
    #[inline]
    #[must_use]
    pub fn project_uuid(&self) -> &str {
        &self.project_uuid
    }

    /// Date of the referenced project's last analysis
    #[inline]
    #[must_use]
    pub fn analysis_date(&self) -> Option<DateTime<Utc>> {
        self.analysis_date
    }
}
