//! Error types for report reading and tree building

use crate::raw::RawComponentType;
use comptree_model::ComponentError;
use comptree_repository::RepositoryError;

/// Errors raised by a [`ReportReader`](crate::ReportReader)
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// No record carries this ref
    #[error("no component with ref '{0}' in report")]
    MissingComponent(u32),

    /// Two records carry the same ref
    #[error("component with ref '{0}' is already in the report")]
    DuplicateComponent(u32),

    /// Report file could not be read
    #[error("failed to read report '{path}'")]
    Io {
        /// Report path
        path: String,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Report is not valid JSON
    #[error("malformed report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while building a tree
#[derive(Debug, thiserror::Error)]
pub enum TreeBuildError {
    /// The root record is not a project
    #[error("Expected root component of type 'PROJECT'")]
    RootNotProject(RawComponentType),

    /// Record type not built by the tree builder
    #[error("Unsupported component type '{0}'")]
    UnsupportedType(RawComponentType),

    /// File record without a positive line count
    #[error("File '{0}' has no line")]
    FileWithoutLines(String),

    /// Report access failed
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Component construction failed
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// Ref cache registration failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for tree building
pub type Result<T> = std::result::Result<T, TreeBuildError>;
