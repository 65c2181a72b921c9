//! Holder of the root of the tree being analysed
//!
//! The root is set once per pass. Setting it walks the tree a single time to
//! index every component carrying a ref, so later lookups by ref are
//! constant time and return the very `Arc` the tree holds.

use crate::error::{RepositoryError, Result};
use comptree_model::Component;
use comptree_visitor::{
    DepthLimit, DepthTraversalCrawler, Order, TypeAwareVisitor, VisitError, VisitResult,
    VisitorSpec,
};
use once_cell::unsync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug)]
struct Initialized {
    root: Arc<Component>,
    by_ref: HashMap<u32, Arc<Component>>,
}

/// Set-once holder of the tree root and its ref index
///
/// # Example
///
/// ```rust
/// use comptree_model::{Component, ComponentType, FileAttributes};
/// use comptree_repository::TreeRootHolder;
/// use std::sync::Arc;
///
/// let file = Arc::new(
///     Component::report_builder(ComponentType::File, 2)
///         .with_name("lib.rs")
///         .with_file_attributes(FileAttributes::new(3))
///         .build()
///         .unwrap(),
/// );
/// let root = Component::report_builder(ComponentType::Project, 1)
///     .with_name("demo")
///     .add_child(Arc::clone(&file))
///     .build()
///     .unwrap();
///
/// let holder = TreeRootHolder::new();
/// holder.set_root(Arc::new(root)).unwrap();
/// assert!(Arc::ptr_eq(&holder.component_by_ref(2).unwrap(), &file));
/// assert_eq!(holder.size().unwrap(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TreeRootHolder {
    state: OnceCell<Initialized>,
}

impl TreeRootHolder {
    /// Empty holder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root and index the tree by ref
    ///
    /// # Errors
    /// - `AlreadyInitialized` when a root was already set
    /// - `DuplicateRef` when two components carry the same ref; the holder
    ///   stays empty
    pub fn set_root(&self, root: Arc<Component>) -> Result<()> {
        if self.is_initialized() {
            return Err(RepositoryError::AlreadyInitialized);
        }
        let by_ref = index_by_ref(&root)?;
        tracing::debug!(root = %root, size = by_ref.len(), "tree root initialized");
        self.state
            .set(Initialized { root, by_ref })
            .map_err(|_| RepositoryError::AlreadyInitialized)
    }

    /// Check if the root has been set
    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    /// Root of the tree
    ///
    /// # Errors
    /// `NotInitialized` before [`set_root`](Self::set_root)
    pub fn root(&self) -> Result<&Arc<Component>> {
        Ok(&self.initialized()?.root)
    }

    /// Component of the tree carrying `reference`
    ///
    /// # Errors
    /// - `NotInitialized` before [`set_root`](Self::set_root)
    /// - `UnknownRef` when no component of the tree carries this ref
    pub fn component_by_ref(&self, reference: u32) -> Result<Arc<Component>> {
        self.initialized()?
            .by_ref
            .get(&reference)
            .cloned()
            .ok_or(RepositoryError::UnknownRef(reference))
    }

    /// Number of components carrying a ref
    ///
    /// # Errors
    /// `NotInitialized` before [`set_root`](Self::set_root)
    pub fn size(&self) -> Result<usize> {
        Ok(self.initialized()?.by_ref.len())
    }

    fn initialized(&self) -> Result<&Initialized> {
        self.state.get().ok_or(RepositoryError::NotInitialized)
    }
}

/// Crawls the whole tree bottom-up, indexing the children of each component
///
/// Every component but the root is the child of a crawled one, so the root is
/// indexed separately.
struct RefIndexer {
    by_ref: HashMap<u32, Arc<Component>>,
    duplicate: Option<u32>,
}

impl RefIndexer {
    fn index(&mut self, component: Arc<Component>) -> VisitResult {
        let Some(reference) = component.reference() else {
            return Ok(());
        };
        if self.by_ref.insert(reference, component).is_some() {
            self.duplicate = Some(reference);
            return Err(VisitError::Cancelled);
        }
        Ok(())
    }
}

impl TypeAwareVisitor for RefIndexer {
    fn spec(&self) -> VisitorSpec {
        VisitorSpec::new(DepthLimit::LEAVES, Order::PostOrder)
    }

    fn visit_any(&mut self, component: &Component) -> VisitResult {
        for child in component.children() {
            self.index(Arc::clone(child))?;
        }
        Ok(())
    }
}

fn index_by_ref(root: &Arc<Component>) -> Result<HashMap<u32, Arc<Component>>> {
    let mut indexer = RefIndexer {
        by_ref: HashMap::new(),
        duplicate: None,
    };
    let crawled = DepthTraversalCrawler::new(&mut indexer).visit(root);
    let outcome = crawled.and_then(|()| indexer.index(Arc::clone(root)));
    match (outcome, indexer.duplicate) {
        (_, Some(reference)) => Err(RepositoryError::DuplicateRef(reference)),
        (Err(err), None) => Err(err.into()),
        (Ok(()), None) => Ok(indexer.by_ref),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comptree_model::{ComponentType, FileAttributes, ProjectViewAttributes};

    fn file(reference: u32) -> Arc<Component> {
        Arc::new(
            Component::report_builder(ComponentType::File, reference)
                .with_name(format!("f{reference}"))
                .with_file_attributes(FileAttributes::new(1))
                .build()
                .unwrap(),
        )
    }

    fn project(children: Vec<Arc<Component>>) -> Arc<Component> {
        let directory = Component::report_builder(ComponentType::Directory, 2)
            .with_name("src")
            .add_children(children)
            .build()
            .unwrap();
        Arc::new(
            Component::report_builder(ComponentType::Project, 1)
                .with_name("p")
                .add_child(directory)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn empty_holder_is_not_initialized() {
        let holder = TreeRootHolder::new();
        assert!(!holder.is_initialized());
        assert!(matches!(holder.root(), Err(RepositoryError::NotInitialized)));
        assert!(matches!(holder.component_by_ref(1), Err(RepositoryError::NotInitialized)));
        assert!(matches!(holder.size(), Err(RepositoryError::NotInitialized)));
    }

    #[test]
    fn lookup_returns_the_same_arc() {
        let (f3, f4) = (file(3), file(4));
        let root = project(vec![Arc::clone(&f3), Arc::clone(&f4)]);
        let holder = TreeRootHolder::new();
        holder.set_root(Arc::clone(&root)).unwrap();

        assert!(Arc::ptr_eq(holder.root().unwrap(), &root));
        assert!(Arc::ptr_eq(&holder.component_by_ref(1).unwrap(), &root));
        assert!(Arc::ptr_eq(&holder.component_by_ref(3).unwrap(), &f3));
        assert!(Arc::ptr_eq(&holder.component_by_ref(4).unwrap(), &f4));
        assert_eq!(holder.component_by_ref(2).unwrap().name(), "src");
        assert_eq!(holder.size().unwrap(), 4);
    }

    #[test]
    fn out_of_tree_ref_fails() {
        let holder = TreeRootHolder::new();
        holder.set_root(project(vec![file(3)])).unwrap();
        let err = holder.component_by_ref(99).unwrap_err();
        assert!(matches!(err, RepositoryError::UnknownRef(99)));
        assert_eq!(err.to_string(), "no component with ref '99'");
    }

    #[test]
    fn root_is_set_once() {
        let holder = TreeRootHolder::new();
        holder.set_root(project(vec![])).unwrap();
        assert!(matches!(
            holder.set_root(project(vec![file(3)])),
            Err(RepositoryError::AlreadyInitialized)
        ));
        assert_eq!(holder.size().unwrap(), 2);
    }

    #[test]
    fn duplicate_ref_leaves_holder_empty() {
        let holder = TreeRootHolder::new();
        let result = holder.set_root(project(vec![file(3), file(3)]));
        assert!(matches!(result, Err(RepositoryError::DuplicateRef(3))));
        assert!(!holder.is_initialized());
    }

    #[test]
    fn views_tree_has_no_ref() {
        let project_view = Component::builder(ComponentType::ProjectView)
            .with_key("pv")
            .with_uuid("u-pv")
            .with_project_view_attributes(ProjectViewAttributes::new("u-p"))
            .build()
            .unwrap();
        let view = Component::builder(ComponentType::View)
            .with_key("v")
            .with_uuid("u-v")
            .add_child(project_view)
            .build()
            .unwrap();
        let holder = TreeRootHolder::new();
        holder.set_root(Arc::new(view)).unwrap();
        assert_eq!(holder.size().unwrap(), 0);
        assert_eq!(holder.root().unwrap().key().unwrap(), "v");
    }
}
