//! Externally issued ids attached to components
//!
//! Persistence code issues a component row id and a snapshot id per
//! component once it has stored them. Each id is written at most once and
//! read back by later passes.

use crate::error::{RepositoryError, Result};
use comptree_model::Component;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Kind of external id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdKind {
    /// Persisted component row id
    ComponentId,
    /// Persisted snapshot id
    SnapshotId,
}

impl Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ComponentId => f.write_str("component id"),
            Self::SnapshotId => f.write_str("snapshot id"),
        }
    }
}

/// State of one external id; only moves from `Unset` to `Set`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdSlot {
    /// Not issued yet
    #[default]
    Unset,
    /// Issued id
    Set(i64),
}

impl IdSlot {
    /// Issued id, if any
    #[inline]
    #[must_use]
    pub fn get(self) -> Option<i64> {
        match self {
            Self::Unset => None,
            Self::Set(id) => Some(id),
        }
    }

    /// Check if the id has been issued
    #[inline]
    #[must_use]
    pub fn is_set(self) -> bool {
        matches!(self, Self::Set(_))
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Slots {
    component_id: IdSlot,
    snapshot_id: IdSlot,
}

impl Slots {
    fn get_mut(&mut self, kind: IdKind) -> &mut IdSlot {
        match kind {
            IdKind::ComponentId => &mut self.component_id,
            IdKind::SnapshotId => &mut self.snapshot_id,
        }
    }

    fn get(self, kind: IdKind) -> IdSlot {
        match kind {
            IdKind::ComponentId => self.component_id,
            IdKind::SnapshotId => self.snapshot_id,
        }
    }
}

/// External ids of the components of one tree, keyed by component uuid
#[derive(Debug, Default)]
pub struct ExternalIdRepository {
    slots: IndexMap<String, Slots>,
}

impl ExternalIdRepository {
    /// Empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `kind` id of `component`
    ///
    /// # Errors
    /// - `IdAlreadySet` when this id was already set for the component
    /// - `Component` when the component uuid is not fed
    pub fn set(&mut self, component: &Component, kind: IdKind, id: i64) -> Result<()> {
        let uuid = component.uuid()?;
        let slot = self.slots.entry(uuid.to_string()).or_default().get_mut(kind);
        if slot.is_set() {
            return Err(RepositoryError::IdAlreadySet {
                kind,
                uuid: uuid.to_string(),
            });
        }
        *slot = IdSlot::Set(id);
        Ok(())
    }

    /// The `kind` id of `component`
    ///
    /// # Errors
    /// - `IdNotSet` when this id was never set for the component
    /// - `Component` when the component uuid is not fed
    pub fn get(&self, component: &Component, kind: IdKind) -> Result<i64> {
        let uuid = component.uuid()?;
        self.slot(component, kind)?
            .get()
            .ok_or_else(|| RepositoryError::IdNotSet {
                kind,
                uuid: uuid.to_string(),
            })
    }

    /// Current slot of the `kind` id of `component`, without failing when unset
    ///
    /// # Errors
    /// `Component` when the component uuid is not fed
    pub fn slot(&self, component: &Component, kind: IdKind) -> Result<IdSlot> {
        let uuid = component.uuid()?;
        Ok(self
            .slots
            .get(uuid)
            .map_or(IdSlot::Unset, |slots| slots.get(kind)))
    }

    /// Set the persisted component row id
    ///
    /// # Errors
    /// See [`set`](Self::set)
    pub fn set_component_id(&mut self, component: &Component, id: i64) -> Result<()> {
        self.set(component, IdKind::ComponentId, id)
    }

    /// Persisted component row id
    ///
    /// # Errors
    /// See [`get`](Self::get)
    pub fn component_id(&self, component: &Component) -> Result<i64> {
        self.get(component, IdKind::ComponentId)
    }

    /// Set the persisted snapshot id
    ///
    /// # Errors
    /// See [`set`](Self::set)
    pub fn set_snapshot_id(&mut self, component: &Component, id: i64) -> Result<()> {
        self.set(component, IdKind::SnapshotId, id)
    }

    /// Persisted snapshot id
    ///
    /// # Errors
    /// See [`get`](Self::get)
    pub fn snapshot_id(&self, component: &Component) -> Result<i64> {
        self.get(component, IdKind::SnapshotId)
    }

    /// Number of components with at least one slot touched
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no id was ever set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
