//! Error types for crawlers and visitors

use comptree_model::ComponentError;

/// Result of a visitor callback
pub type VisitResult = Result<(), VisitError>;

/// Errors raised while configuring or running a traversal
///
/// Any error returned by a callback stops the traversal and is handed back
/// to the caller of `visit`; there is no partial traversal mode.
#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    /// Required configuration missing
    #[error("{0} is required")]
    ArgumentRequired(&'static str),

    /// Configuration value not acceptable
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Traversal stopped on purpose by a callback
    #[error("traversal cancelled")]
    Cancelled,

    /// Path access failed
    #[error(transparent)]
    Path(#[from] PathError),

    /// Component attribute access failed
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// Callback failure
    #[error("visitor failed: {0}")]
    Failed(String),
}

impl VisitError {
    /// Check if the traversal was cancelled by a callback
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Errors raised by [`Path`](crate::Path) accessors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Requested element does not exist
    #[error("no such element: {0}")]
    NoSuchElement(&'static str),
}
