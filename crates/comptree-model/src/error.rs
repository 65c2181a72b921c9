//! Error types for the component model

use crate::component_type::ComponentType;

/// Errors raised while building or reading a [`Component`](crate::Component)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
    /// Attribute read before it was assigned
    #[error("{attribute} has not been fed yet")]
    AttributeNotFed {
        /// Attribute name
        attribute: &'static str,
    },

    /// Set-once attribute assigned twice
    #[error("{attribute} has already been fed")]
    AlreadyFed {
        /// Attribute name
        attribute: &'static str,
    },

    /// Attribute does not exist for this variant
    #[error("{attribute} are invalid for component of type {component_type}")]
    InvalidForType {
        /// Attribute name
        attribute: &'static str,
        /// Type of the component the attribute was requested on
        component_type: ComponentType,
    },

    /// Attribute required by this variant is missing at build time
    #[error("{attribute} is required for component of type {component_type}")]
    MissingAttribute {
        /// Attribute name
        attribute: &'static str,
        /// Type of the component being built
        component_type: ComponentType,
    },

    /// Child from the other hierarchy
    #[error("component of type {child} cannot be a child of {parent}: hierarchies differ")]
    HierarchyMismatch {
        /// Parent type
        parent: ComponentType,
        /// Offending child type
        child: ComponentType,
    },

    /// Child higher than its parent
    #[error("component of type {child} cannot be a child of {parent}")]
    InvalidChild {
        /// Parent type
        parent: ComponentType,
        /// Offending child type
        child: ComponentType,
    },
}
