//! comptree tree builder
//!
//! Turns the ref-addressed component records of an analysis report into an
//! immutable [`Component`](comptree_model::Component) tree.
//!
//! # Core Concepts
//!
//! - [`ReportReader`]: root ref plus one [`RawComponent`] per ref;
//!   [`InMemoryReport`] is the JSON-backed implementation
//! - [`KeyGenerator`] and [`UuidSupplier`]: component identity, derived from
//!   the key of the closest module
//! - [`ComponentTreeBuilder`]: reads the records depth first, building
//!   children before their parent, optionally filling a
//!   [`RefCache`](comptree_repository::RefCache)

#![warn(unreachable_pub)]

mod config;
mod error;
mod identity;
mod raw;
mod report;
mod tree_builder;

// Re-exports
pub use config::{ProjectDescriptor, TreeBuilderConfig, DEFAULT_PROJECT_VERSION};
pub use error::{ReportError, Result, TreeBuildError};
pub use identity::{EffectiveKeyGenerator, ExistingUuidSupplier, KeyGenerator, UuidSupplier};
pub use raw::{RawComponent, RawComponentType};
pub use report::{InMemoryReport, ReportReader};
pub use tree_builder::ComponentTreeBuilder;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
