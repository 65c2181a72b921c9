//! comptree component model
//!
//! Typed nodes of a project's structural hierarchy.
//!
//! # Core Concepts
//!
//! - [`ComponentType`]: closed set of node types, split into the report
//!   hierarchy (`PROJECT > MODULE > DIRECTORY > FILE`) and the views
//!   hierarchy (`VIEW > SUBVIEW > PROJECT_VIEW`)
//! - [`Component`]: immutable node with ordered, [`Arc`](std::sync::Arc)-shared children
//! - [`ReportAttributes`], [`FileAttributes`], [`ProjectViewAttributes`]:
//!   variant-only attributes
//!
//! # Example
//!
//! ```rust
//! use comptree_model::{Component, ComponentType, FileAttributes};
//!
//! let file = Component::report_builder(ComponentType::File, 2)
//!     .with_key("project:src/lib.rs")
//!     .with_file_attributes(FileAttributes::new(120))
//!     .build()
//!     .unwrap();
//! let project = Component::report_builder(ComponentType::Project, 1)
//!     .with_key("project")
//!     .add_child(file)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(project.children().len(), 1);
//! assert!(ComponentType::File.is_deeper_than(ComponentType::Project));
//! ```

#![warn(unreachable_pub)]

mod attributes;
mod component;
mod component_type;
mod error;

// Re-exports
pub use attributes::{FileAttributes, ProjectViewAttributes, ReportAttributes};
pub use component::{Component, ComponentBuilder};
pub use component_type::{ComponentType, Hierarchy};
pub use error::ComponentError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
