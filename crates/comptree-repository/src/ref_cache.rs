//! Ref → identity cache filled while the tree is being built

use crate::error::{RepositoryError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key and uuid generated for a ref
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentIdentity {
    /// Generated key
    pub key: String,
    /// Generated uuid
    pub uuid: String,
}

impl ComponentIdentity {
    /// Identity from its parts
    #[must_use]
    pub fn new(key: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            uuid: uuid.into(),
        }
    }
}

/// Identities of report components, available before the components exist
#[derive(Debug, Default)]
pub struct RefCache {
    identities: IndexMap<u32, ComponentIdentity>,
}

impl RefCache {
    /// Empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the identity of `reference`
    ///
    /// # Errors
    /// `RefAlreadyCached` when the ref was already registered
    pub fn register(&mut self, reference: u32, identity: ComponentIdentity) -> Result<()> {
        if self.identities.contains_key(&reference) {
            return Err(RepositoryError::RefAlreadyCached(reference));
        }
        self.identities.insert(reference, identity);
        Ok(())
    }

    /// Identity of `reference`
    ///
    /// # Errors
    /// `UnknownRef` when the ref was never registered
    pub fn get(&self, reference: u32) -> Result<&ComponentIdentity> {
        self.identities
            .get(&reference)
            .ok_or(RepositoryError::UnknownRef(reference))
    }

    /// Registered refs with their identity, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &ComponentIdentity)> {
        self.identities.iter().map(|(reference, identity)| (*reference, identity))
    }

    /// Number of registered refs
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Check if nothing was registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
