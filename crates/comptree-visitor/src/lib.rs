//! comptree crawlers
//!
//! Depth-first traversal of [`Component`](comptree_model::Component) trees.
//!
//! # Core Concepts
//!
//! - [`DepthLimit`]: deepest type dispatched, per hierarchy; deeper components
//!   are skipped
//! - [`VisitorSpec`]: depth limit plus [`Order`], declared by every visitor
//! - [`TypeAwareVisitor`] driven by [`DepthTraversalCrawler`]: one callback per
//!   component type, preceded by `visit_any`
//! - [`PathAwareVisitor`] driven by [`PathAwareCrawler`]: same dispatch, plus a
//!   [`Path`] of per-component accumulators from the root down to the visited
//!   component
//! - [`VisitorsCrawler`]: several visitors in a single walk
//!
//! # Example
//!
//! ```rust
//! use comptree_model::{Component, ComponentType, FileAttributes};
//! use comptree_visitor::{
//!     DepthLimit, DepthTraversalCrawler, Order, TypeAwareVisitor, VisitResult, VisitorSpec,
//! };
//!
//! #[derive(Default)]
//! struct FileNames(Vec<String>);
//!
//! impl TypeAwareVisitor for FileNames {
//!     fn spec(&self) -> VisitorSpec {
//!         VisitorSpec::new(DepthLimit::FILE, Order::PreOrder)
//!     }
//!
//!     fn visit_file(&mut self, file: &Component) -> VisitResult {
//!         self.0.push(file.name().to_string());
//!         Ok(())
//!     }
//! }
//!
//! let project = Component::report_builder(ComponentType::Project, 1)
//!     .with_name("demo")
//!     .add_child(
//!         Component::report_builder(ComponentType::File, 2)
//!             .with_name("lib.rs")
//!             .with_file_attributes(FileAttributes::new(12))
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let mut crawler = DepthTraversalCrawler::new(FileNames::default());
//! crawler.visit(&project).unwrap();
//! assert_eq!(crawler.visitor().0, vec!["lib.rs"]);
//! ```

#![warn(unreachable_pub)]

mod depth;
mod error;
mod path;
mod path_aware;
mod spec;
mod type_aware;
mod visitors_crawler;

// Re-exports
pub use depth::DepthLimit;
pub use error::{PathError, VisitError, VisitResult};
pub use path::Path;
pub use path_aware::{PathAwareCrawler, PathAwareVisitor};
pub use spec::{Order, VisitorSpec, VisitorSpecBuilder};
pub use type_aware::{DepthTraversalCrawler, TypeAwareVisitor};
pub use visitors_crawler::VisitorsCrawler;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
