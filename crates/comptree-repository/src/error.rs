//! Repository error types

use crate::external_ids::IdKind;
use comptree_model::ComponentError;
use comptree_visitor::VisitError;

/// Errors raised by the tree-root holder and the repositories
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Root read before being set
    #[error("tree root has not been initialized yet")]
    NotInitialized,

    /// Root set twice
    #[error("tree root has already been initialized")]
    AlreadyInitialized,

    /// No component with this ref
    #[error("no component with ref '{0}'")]
    UnknownRef(u32),

    /// Two components of the tree carry the same ref
    #[error("ref '{0}' is carried by more than one component")]
    DuplicateRef(u32),

    /// Ref registered twice in the ref cache
    #[error("ref '{0}' is already cached")]
    RefAlreadyCached(u32),

    /// External id set twice
    #[error("{kind} of component '{uuid}' has already been set")]
    IdAlreadySet {
        /// Id kind
        kind: IdKind,
        /// Component uuid
        uuid: String,
    },

    /// External id read before being set
    #[error("{kind} of component '{uuid}' has not been set")]
    IdNotSet {
        /// Id kind
        kind: IdKind,
        /// Component uuid
        uuid: String,
    },

    /// Component attribute access failed
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// Indexing crawl failed
    #[error(transparent)]
    Visit(#[from] VisitError),
}

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, RepositoryError>;
