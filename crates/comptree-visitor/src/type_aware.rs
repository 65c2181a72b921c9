//! Type-aware visitors and the depth traversal crawler
//!
//! The crawler walks the tree and, for every component in scope of the
//! visitor's [`DepthLimit`](crate::DepthLimit), calls
//! [`TypeAwareVisitor::visit_any`] followed by the callback of the component's
//! type. Children are never higher than their parent, so once a component is
//! out of scope its whole subtree is too and is not walked.

use crate::error::VisitResult;
use crate::spec::{Order, VisitorSpec};
use comptree_model::{Component, ComponentType};

/// Visitor dispatched on component type
///
/// Implement this trait to define custom behavior when crawling a component
/// tree. Callbacks default to no-ops.
pub trait TypeAwareVisitor {
    /// Depth limit and order of this visitor
    fn spec(&self) -> VisitorSpec;

    /// Called on every component in scope, before its type callback
    fn visit_any(&mut self, _component: &Component) -> VisitResult {
        Ok(())
    }

    /// `PROJECT` callback
    fn visit_project(&mut self, _project: &Component) -> VisitResult {
        Ok(())
    }

    /// `MODULE` callback
    fn visit_module(&mut self, _module: &Component) -> VisitResult {
        Ok(())
    }

    /// `DIRECTORY` callback
    fn visit_directory(&mut self, _directory: &Component) -> VisitResult {
        Ok(())
    }

    /// `FILE` callback
    fn visit_file(&mut self, _file: &Component) -> VisitResult {
        Ok(())
    }

    /// `VIEW` callback
    fn visit_view(&mut self, _view: &Component) -> VisitResult {
        Ok(())
    }

    /// `SUBVIEW` callback
    fn visit_subview(&mut self, _subview: &Component) -> VisitResult {
        Ok(())
    }

    /// `PROJECT_VIEW` callback
    fn visit_project_view(&mut self, _project_view: &Component) -> VisitResult {
        Ok(())
    }
}

impl<V: TypeAwareVisitor + ?Sized> TypeAwareVisitor for &mut V {
    fn spec(&self) -> VisitorSpec {
        (**self).spec()
    }

    fn visit_any(&mut self, component: &Component) -> VisitResult {
        (**self).visit_any(component)
    }

    fn visit_project(&mut self, project: &Component) -> VisitResult {
        (**self).visit_project(project)
    }

    fn visit_module(&mut self, module: &Component) -> VisitResult {
        (**self).visit_module(module)
    }

    fn visit_directory(&mut self, directory: &Component) -> VisitResult {
        (**self).visit_directory(directory)
    }

    fn visit_file(&mut self, file: &Component) -> VisitResult {
        (**self).visit_file(file)
    }

    fn visit_view(&mut self, view: &Component) -> VisitResult {
        (**self).visit_view(view)
    }

    fn visit_subview(&mut self, subview: &Component) -> VisitResult {
        (**self).visit_subview(subview)
    }

    fn visit_project_view(&mut self, project_view: &Component) -> VisitResult {
        (**self).visit_project_view(project_view)
    }
}

/// Call `visit_any` then the type callback of `component`
pub(crate) fn dispatch<V: TypeAwareVisitor + ?Sized>(
    visitor: &mut V,
    component: &Component,
) -> VisitResult {
    visitor.visit_any(component)?;
    match component.component_type() {
        ComponentType::Project => visitor.visit_project(component),
        ComponentType::Module => visitor.visit_module(component),
        ComponentType::Directory => visitor.visit_directory(component),
        ComponentType::File => visitor.visit_file(component),
        ComponentType::View => visitor.visit_view(component),
        ComponentType::Subview => visitor.visit_subview(component),
        ComponentType::ProjectView => visitor.visit_project_view(component),
    }
}

/// Depth-first crawler driving one [`TypeAwareVisitor`]
#[derive(Debug)]
pub struct DepthTraversalCrawler<V> {
    visitor: V,
    spec: VisitorSpec,
}

impl<V: TypeAwareVisitor> DepthTraversalCrawler<V> {
    /// Crawler for `visitor`; its spec is read once here
    #[must_use]
    pub fn new(visitor: V) -> Self {
        let spec = visitor.spec();
        Self { visitor, spec }
    }

    /// Crawl the tree rooted at `component`
    ///
    /// # Errors
    /// First error returned by a callback
    pub fn visit(&mut self, component: &Component) -> VisitResult {
        tracing::debug!(
            root = %component,
            order = ?self.spec.order,
            "crawling component tree"
        );
        self.visit_impl(component)
    }

    fn visit_impl(&mut self, component: &Component) -> VisitResult {
        if !self.spec.max_depth.is_in_scope(component.component_type()) {
            return Ok(());
        }
        if self.spec.order == Order::PreOrder {
            dispatch(&mut self.visitor, component)?;
        }
        for child in component.children() {
            self.visit_impl(child)?;
        }
        if self.spec.order == Order::PostOrder {
            dispatch(&mut self.visitor, component)?;
        }
        Ok(())
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
