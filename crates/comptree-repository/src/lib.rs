//! comptree repositories
//!
//! State shared by the passes run over one component tree:
//!
//! - [`TreeRootHolder`]: set-once root with a ref → component index
//! - [`ExternalIdRepository`]: externally issued ids per component, each set
//!   at most once
//! - [`RefCache`]: ref → key and uuid, filled while the tree is built
//!
//! None of these are thread-safe; a pass has a single writer and uses fresh
//! instances.

#![warn(unreachable_pub)]

mod error;
mod external_ids;
mod ref_cache;
mod tree_root_holder;

// Re-exports
pub use error::{RepositoryError, Result};
pub use external_ids::{ExternalIdRepository, IdKind, IdSlot};
pub use ref_cache::{ComponentIdentity, RefCache};
pub use tree_root_holder::TreeRootHolder;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
