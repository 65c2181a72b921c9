//! Path-aware visitors and crawler
//!
//! Same dispatch rules as [`DepthTraversalCrawler`](crate::DepthTraversalCrawler),
//! but every callback also receives the [`Path`] of elements created for the
//! components from the crawled root down to the visited one.

use crate::error::VisitResult;
use crate::path::{Path, PathStack};
use crate::spec::{Order, VisitorSpec};
use comptree_model::{Component, ComponentType};

/// Visitor receiving the path of accumulator elements on every callback
///
/// # Example
/// Counting files bottom-up without any map keyed by component:
///
/// ```rust
/// use comptree_model::{Component, ComponentType};
/// use comptree_visitor::{DepthLimit, Order, Path, PathAwareVisitor, VisitResult, VisitorSpec};
///
/// struct FileCounter;
///
/// impl PathAwareVisitor for FileCounter {
///     type Element = u32;
///
///     fn spec(&self) -> VisitorSpec {
///         VisitorSpec::new(DepthLimit::FILE, Order::PostOrder)
///     }
///
///     fn create_element(&mut self, component: &Component) -> u32 {
///         u32::from(component.component_type() == ComponentType::File)
///     }
///
///     fn visit_any(&mut self, _component: &Component, path: &mut Path<u32>) -> VisitResult {
///         if let Ok((current, parent)) = path.current_and_parent_mut() {
///             *parent += *current;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait PathAwareVisitor {
    /// Accumulator type, one per component on the path
    type Element;

    /// Depth limit and order of this visitor
    fn spec(&self) -> VisitorSpec;

    /// Element pushed on the path when the crawler enters `component`
    fn create_element(&mut self, component: &Component) -> Self::Element;

    /// Called on every component in scope, before its type callback
    fn visit_any(&mut self, _component: &Component, _path: &mut Path<Self::Element>) -> VisitResult {
        Ok(())
    }

    /// `PROJECT` callback
    fn visit_project(&mut self, _project: &Component, _path: &mut Path<Self::Element>) -> VisitResult {
        Ok(())
    }

    /// `MODULE` callback
    fn visit_module(&mut self, _module: &Component, _path: &mut Path<Self::Element>) -> VisitResult {
        Ok(())
    }

    /// `DIRECTORY` callback
    fn visit_directory(
        &mut self,
        _directory: &Component,
        _path: &mut Path<Self::Element>,
    ) -> VisitResult {
        Ok(())
    }

    /// `FILE` callback
    fn visit_file(&mut self, _file: &Component, _path: &mut Path<Self::Element>) -> VisitResult {
        Ok(())
    }

    /// `VIEW` callback
    fn visit_view(&mut self, _view: &Component, _path: &mut Path<Self::Element>) -> VisitResult {
        Ok(())
    }

    /// `SUBVIEW` callback
    fn visit_subview(&mut self, _subview: &Component, _path: &mut Path<Self::Element>) -> VisitResult {
        Ok(())
    }

    /// `PROJECT_VIEW` callback
    fn visit_project_view(
        &mut self,
        _project_view: &Component,
        _path: &mut Path<Self::Element>,
    ) -> VisitResult {
        Ok(())
    }
}

impl<V: PathAwareVisitor + ?Sized> PathAwareVisitor for &mut V {
    type Element = V::Element;

    fn spec(&self) -> VisitorSpec {
        (**self).spec()
    }

    fn create_element(&mut self, component: &Component) -> Self::Element {
        (**self).create_element(component)
    }

    fn visit_any(&mut self, component: &Component, path: &mut Path<Self::Element>) -> VisitResult {
        (**self).visit_any(component, path)
    }

    fn visit_project(&mut self, project: &Component, path: &mut Path<Self::Element>) -> VisitResult {
        (**self).visit_project(project, path)
    }

    fn visit_module(&mut self, module: &Component, path: &mut Path<Self::Element>) -> VisitResult {
        (**self).visit_module(module, path)
    }

    fn visit_directory(
        &mut self,
        directory: &Component,
        path: &mut Path<Self::Element>,
    ) -> VisitResult {
        (**self).visit_directory(directory, path)
    }

    fn visit_file(&mut self, file: &Component, path: &mut Path<Self::Element>) -> VisitResult {
        (**self).visit_file(file, path)
    }

    fn visit_view(&mut self, view: &Component, path: &mut Path<Self::Element>) -> VisitResult {
        (**self).visit_view(view, path)
    }

    fn visit_subview(&mut self, subview: &Component, path: &mut Path<Self::Element>) -> VisitResult {
        (**self).visit_subview(subview, path)
    }

    fn visit_project_view(
        &mut self,
        project_view: &Component,
        path: &mut Path<Self::Element>,
    ) -> VisitResult {
        (**self).visit_project_view(project_view, path)
    }
}

/// Call `visit_any` then the type callback of `component`
pub(crate) fn dispatch_with_path<V: PathAwareVisitor + ?Sized>(
    visitor: &mut V,
    component: &Component,
    path: &mut Path<V::Element>,
) -> VisitResult {
    visitor.visit_any(component, path)?;
    match component.component_type() {
        ComponentType::Project => visitor.visit_project(component, path),
        ComponentType::Module => visitor.visit_module(component, path),
        ComponentType::Directory => visitor.visit_directory(component, path),
        ComponentType::File => visitor.visit_file(component, path),
        ComponentType::View => visitor.visit_view(component, path),
        ComponentType::Subview => visitor.visit_subview(component, path),
        ComponentType::ProjectView => visitor.visit_project_view(component, path),
    }
}

/// Depth-first crawler driving one [`PathAwareVisitor`]
pub struct PathAwareCrawler<V: PathAwareVisitor> {
    visitor: V,
    spec: VisitorSpec,
    stack: PathStack<V::Element>,
}

impl<V: PathAwareVisitor> PathAwareCrawler<V> {
    /// Crawler for `visitor`; its spec is read once here
    #[must_use]
    pub fn new(visitor: V) -> Self {
        let spec = visitor.spec();
        Self {
            visitor,
            spec,
            stack: PathStack::new(),
        }
    }

    /// Crawl the tree rooted at `component`
    ///
    /// # Errors
    /// First error returned by a callback; the path is unwound either way
    pub fn visit(&mut self, component: &Component) -> VisitResult {
        tracing::debug!(
            root = %component,
            order = ?self.spec.order,
            "crawling component tree with path"
        );
        let outcome = self.visit_impl(component);
        debug_assert!(self.stack.is_empty());
        outcome
    }

    fn visit_impl(&mut self, component: &Component) -> VisitResult {
        if !self.spec.max_depth.is_in_scope(component.component_type()) {
            return Ok(());
        }
        let element = self.visitor.create_element(component);
        self.stack.push(element);
        let outcome = self.visit_in_path(component);
        self.stack.pop();
        outcome
    }

    fn visit_in_path(&mut self, component: &Component) -> VisitResult {
        if self.spec.order == Order::PreOrder {
            self.dispatch(component)?;
        }
        for child in component.children() {
            self.visit_impl(child)?;
        }
        if self.spec.order == Order::PostOrder {
            self.dispatch(component)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, component: &Component) -> VisitResult {
        match self.stack.path_mut() {
            Some(path) => dispatch_with_path(&mut self.visitor, component, path),
            None => Ok(()),
        }
    }

    /// Visitor being driven
    #[inline]
    #[must_use]
    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    /// Visitor being driven, mutably
    #[inline]
    pub fn visitor_mut(&mut self) -> &mut V {
        &mut self.visitor
    }

    /// Give the visitor back
    #[inline]
    #[must_use]
    pub fn into_visitor(self) -> V {
        self.visitor
    }
}
