//! Access to the component records of an analysis report

use crate::error::ReportError;
use crate::raw::RawComponent;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source of the component records of one report
pub trait ReportReader {
    /// Ref of the root record
    ///
    /// # Errors
    /// Implementation specific; propagated as is by the tree builder
    fn root_ref(&self) -> Result<u32, ReportError>;

    /// Record carrying `reference`
    ///
    /// # Errors
    /// `MissingComponent` when no record carries the ref, or any
    /// implementation specific failure
    fn read_component(&self, reference: u32) -> Result<RawComponent, ReportError>;
}

impl<R: ReportReader + ?Sized> ReportReader for &R {
    fn root_ref(&self) -> Result<u32, ReportError> {
        (**self).root_ref()
    }

    fn read_component(&self, reference: u32) -> Result<RawComponent, ReportError> {
        (**self).read_component(reference)
    }
}

/// Serialized form of an [`InMemoryReport`]
#[derive(Debug, Serialize, Deserialize)]
struct ReportDocument {
    root_ref: u32,
    components: Vec<RawComponent>,
}

/// Report held in memory, loadable from JSON
///
/// ```json
/// {
///   "root_ref": 1,
///   "components": [
///     { "ref": 1, "type": "PROJECT", "child_refs": [2] },
///     { "ref": 2, "type": "FILE", "path": "src/lib.rs", "lines": 12 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryReport {
    root_ref: u32,
    components: IndexMap<u32, RawComponent>,
}

impl InMemoryReport {
    /// Empty report whose root is `root_ref`
    #[must_use]
    pub fn new(root_ref: u32) -> Self {
        Self {
            root_ref,
            components: IndexMap::new(),
        }
    }

    /// Add a record
    ///
    /// # Errors
    /// `DuplicateComponent` when a record with the same ref exists
    pub fn add(&mut self, component: RawComponent) -> Result<(), ReportError> {
        let reference = component.reference;
        if self.components.contains_key(&reference) {
            return Err(ReportError::DuplicateComponent(reference));
        }
        self.components.insert(reference, component);
        Ok(())
    }

    /// With a record added
    ///
    /// # Errors
    /// See [`add`](Self::add)
    pub fn with_component(mut self, component: RawComponent) -> Result<Self, ReportError> {
        self.add(component)?;
        Ok(self)
    }

    /// Parse a JSON report
    ///
    /// # Errors
    /// `Json` on malformed input, `DuplicateComponent` on a repeated ref
    pub fn from_json_str(json: &str) -> Result<Self, ReportError> {
        let document: ReportDocument = serde_json::from_str(json)?;
        let mut report = Self::new(document.root_ref);
        for component in document.components {
            report.add(component)?;
        }
        Ok(report)
    }

    /// Read and parse a JSON report file
    ///
    /// # Errors
    /// `Io` when the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str)
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let report = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), components = report.len(), "report loaded");
        Ok(report)
    }

    /// Serialize back to JSON, records in insertion order
    ///
    /// # Errors
    /// `Json` if serialization fails
    pub fn to_json_string(&self) -> Result<String, ReportError> {
        let document = ReportDocument {
            root_ref: self.root_ref,
            components: self.components.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if the report has no record
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ReportReader for InMemoryReport {
    fn root_ref(&self) -> Result<u32, ReportError> {
        Ok(self.root_ref)
    }

    fn read_component(&self, reference: u32) -> Result<RawComponent, ReportError> {
        self.components
            .get(&reference)
            .cloned()
            .ok_or(ReportError::MissingComponent(reference))
    }
}
