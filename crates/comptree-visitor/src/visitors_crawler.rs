//! Several visitors driven by a single walk of the tree

use crate::error::VisitResult;
use crate::path::PathStack;
use crate::path_aware::{dispatch_with_path, PathAwareVisitor};
use crate::spec::VisitorSpec;
use crate::type_aware::{dispatch, TypeAwareVisitor};
use comptree_model::Component;
use std::time::{Duration, Instant};

/// Visitor as seen by [`VisitorsCrawler`], whatever its flavor
trait CrawledVisitor {
    fn spec(&self) -> VisitorSpec;

    /// Called on every component in scope before any dispatch on it
    fn enter(&mut self, _component: &Component) {}

    fn dispatch(&mut self, component: &Component) -> VisitResult;

    /// Called on every component in scope once its subtree is done
    fn leave(&mut self) {}

    /// Drop any state left by an interrupted walk
    fn reset(&mut self) {}
}

struct TypeAwareEntry<V> {
    visitor: V,
    spec: VisitorSpec,
}

impl<V: TypeAwareVisitor> CrawledVisitor for TypeAwareEntry<V> {
    fn spec(&self) -> VisitorSpec {
        self.spec
    }

    fn dispatch(&mut self, component: &Component) -> VisitResult {
        dispatch(&mut self.visitor, component)
    }
}

struct PathAwareEntry<V: PathAwareVisitor> {
    visitor: V,
    spec: VisitorSpec,
    stack: PathStack<V::Element>,
}

impl<V: PathAwareVisitor> CrawledVisitor for PathAwareEntry<V> {
    fn spec(&self) -> VisitorSpec {
        self.spec
    }

    fn enter(&mut self, component: &Component) {
        let element = self.visitor.create_element(component);
        self.stack.push(element);
    }

    fn dispatch(&mut self, component: &Component) -> VisitResult {
        match self.stack.path_mut() {
            Some(path) => dispatch_with_path(&mut self.visitor, component, path),
            None => Ok(()),
        }
    }

    fn leave(&mut self) {
        self.stack.pop();
    }

    fn reset(&mut self) {
        self.stack = PathStack::new();
    }
}

struct Registered<'v> {
    name: &'static str,
    visitor: Box<dyn CrawledVisitor + 'v>,
    duration: Duration,
}

/// Crawler running several visitors in one walk
///
/// On every component, pre-order visitors are dispatched in registration
/// order before the children are walked, post-order visitors after. Each
/// visitor only sees the components in scope of its own depth limit, and
/// time spent in each visitor is accumulated across calls to
/// [`visit`](Self::visit).
///
/// Pass `&mut visitor` to keep access to a visitor's state after the walk.
#[derive(Default)]
pub struct VisitorsCrawler<'v> {
    visitors: Vec<Registered<'v>>,
}

impl<'v> VisitorsCrawler<'v> {
    /// Crawler with no visitor
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type-aware visitor
    #[must_use]
    pub fn with_type_aware<V: TypeAwareVisitor + 'v>(mut self, visitor: V) -> Self {
        let spec = visitor.spec();
        self.register::<V>(Box::new(TypeAwareEntry { visitor, spec }));
        self
    }

    /// Register a path-aware visitor
    #[must_use]
    pub fn with_path_aware<V: PathAwareVisitor + 'v>(mut self, visitor: V) -> Self {
        let spec = visitor.spec();
        self.register::<V>(Box::new(PathAwareEntry {
            visitor,
            spec,
            stack: PathStack::new(),
        }));
        self
    }

    fn register<V>(&mut self, visitor: Box<dyn CrawledVisitor + 'v>) {
        self.visitors.push(Registered {
            name: std::any::type_name::<V>(),
            visitor,
            duration: Duration::ZERO,
        });
    }

    /// Number of registered visitors
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if no visitor is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    /// Walk the tree rooted at `component` once, driving every visitor
    ///
    /// # Errors
    /// First error returned by any visitor; no visitor is called afterwards
    pub fn visit(&mut self, component: &Component) -> VisitResult {
        tracing::debug!(
            root = %component,
            visitors = self.visitors.len(),
            "crawling component tree"
        );
        let outcome = self.visit_node(component);
        for registered in &mut self.visitors {
            registered.visitor.reset();
        }
        for (name, duration) in self.cumulative_durations() {
            tracing::debug!(visitor = name, ?duration, "cumulative visitor time");
        }
        outcome
    }

    fn visit_node(&mut self, component: &Component) -> VisitResult {
        let component_type = component.component_type();
        let in_scope: Vec<bool> = self
            .visitors
            .iter()
            .map(|r| r.visitor.spec().max_depth.is_in_scope(component_type))
            .collect();
        // children are never higher than their parent, so nothing below is in scope either
        if !in_scope.contains(&true) {
            return Ok(());
        }

        for registered in self.in_scope_mut(&in_scope) {
            registered.visitor.enter(component);
        }
        for registered in self.in_scope_mut(&in_scope) {
            if registered.visitor.spec().is_pre_order() {
                registered.timed_dispatch(component)?;
            }
        }
        for child in component.children() {
            self.visit_node(child)?;
        }
        for registered in self.in_scope_mut(&in_scope) {
            if registered.visitor.spec().is_post_order() {
                registered.timed_dispatch(component)?;
            }
        }
        for registered in self.in_scope_mut(&in_scope) {
            registered.visitor.leave();
        }
        Ok(())
    }

    fn in_scope_mut<'a>(
        &'a mut self,
        in_scope: &'a [bool],
    ) -> impl Iterator<Item = &'a mut Registered<'v>> + 'a {
        self.visitors
            .iter_mut()
            .zip(in_scope)
            .filter_map(|(registered, in_scope)| in_scope.then_some(registered))
    }

    /// Time spent in each visitor, in registration order
    #[must_use]
    pub fn cumulative_durations(&self) -> Vec<(&'static str, Duration)> {
        self.visitors
            .iter()
            .map(|r| (r.name, r.duration))
            .collect()
    }
}

impl Registered<'_> {
    fn timed_dispatch(&mut self, component: &Component) -> VisitResult {
        let start = Instant::now();
        let outcome = self.visitor.dispatch(component);
        self.duration += start.elapsed();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::DepthLimit;
    use crate::error::VisitError;
    use crate::path::Path;
    use crate::spec::Order;
    use comptree_model::{ComponentType, FileAttributes, ProjectViewAttributes};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn node(component_type: ComponentType, reference: u32, children: Vec<Component>) -> Component {
        let mut builder =
            Component::report_builder(component_type, reference).with_name(format!("c{reference}"));
        if component_type == ComponentType::File {
            builder = builder.with_file_attributes(FileAttributes::new(10));
        }
        builder
            .add_children(children.into_iter().map(Arc::new))
            .build()
            .unwrap()
    }

    /// PROJECT(1) -> MODULE(2) -> {DIRECTORY(3) -> FILE(4), FILE(5)}
    fn tree() -> Component {
        use ComponentType::{Directory, File, Module, Project};
        node(
            Project,
            1,
            vec![node(
                Module,
                2,
                vec![node(Directory, 3, vec![node(File, 4, vec![])]), node(File, 5, vec![])],
            )],
        )
    }

    struct Logging {
        tag: &'static str,
        spec: VisitorSpec,
        log: Log,
    }

    impl TypeAwareVisitor for Logging {
        fn spec(&self) -> VisitorSpec {
            self.spec
        }

        fn visit_any(&mut self, component: &Component) -> VisitResult {
            let reference = component.reference().unwrap_or_default();
            self.log.borrow_mut().push(format!("{}{reference}", self.tag));
            Ok(())
        }
    }

    fn logging(tag: &'static str, max_depth: DepthLimit, order: Order, log: &Log) -> Logging {
        Logging {
            tag,
            spec: VisitorSpec::new(max_depth, order),
            log: Rc::clone(log),
        }
    }

    #[test]
    fn visitors_interleave_in_registration_order() {
        let log = Log::default();
        let mut crawler = VisitorsCrawler::new()
            .with_type_aware(logging("a", DepthLimit::FILE, Order::PreOrder, &log))
            .with_type_aware(logging("b", DepthLimit::MODULE, Order::PostOrder, &log))
            .with_type_aware(logging("c", DepthLimit::DIRECTORY, Order::PreOrder, &log));
        crawler.visit(&tree()).unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["a1", "c1", "a2", "c2", "a3", "c3", "a4", "a5", "b2", "b1"]
        );
    }

    #[test]
    fn each_visitor_sees_what_a_dedicated_crawler_would() {
        let log = Log::default();
        VisitorsCrawler::new()
            .with_type_aware(logging("", DepthLimit::DIRECTORY, Order::PostOrder, &log))
            .with_type_aware(logging("x", DepthLimit::VIEW, Order::PreOrder, &log))
            .visit(&tree())
            .unwrap();

        let alone = Log::default();
        crate::DepthTraversalCrawler::new(logging("", DepthLimit::DIRECTORY, Order::PostOrder, &alone))
            .visit(&tree())
            .unwrap();
        assert_eq!(*log.borrow(), *alone.borrow());
    }

    /// Counts lines below every component, path-aware
    #[derive(Default)]
    struct Lines {
        per_component: Vec<(u32, u32)>,
    }

    impl PathAwareVisitor for Lines {
        type Element = u32;

        fn spec(&self) -> VisitorSpec {
            VisitorSpec::new(DepthLimit::FILE, Order::PostOrder)
        }

        fn create_element(&mut self, component: &Component) -> u32 {
            component.file_attributes().map_or(0, FileAttributes::lines)
        }

        fn visit_any(&mut self, component: &Component, path: &mut Path<u32>) -> VisitResult {
            self.per_component
                .push((component.reference().unwrap_or_default(), *path.current()));
            if let Ok((current, parent)) = path.current_and_parent_mut() {
                *parent += *current;
            }
            Ok(())
        }
    }

    #[test]
    fn path_aware_visitor_keeps_its_own_path() {
        let log = Log::default();
        let mut lines = Lines::default();
        VisitorsCrawler::new()
            .with_type_aware(logging("a", DepthLimit::MODULE, Order::PreOrder, &log))
            .with_path_aware(&mut lines)
            .visit(&tree())
            .unwrap();
        assert_eq!(
            lines.per_component,
            vec![(4, 10), (3, 10), (5, 10), (2, 20), (1, 20)]
        );
        assert_eq!(*log.borrow(), vec!["a1", "a2"]);
    }

    #[test]
    fn views_tree_only_reaches_views_visitors() {
        let log = Log::default();
        let project_view = Component::builder(ComponentType::ProjectView)
            .with_key("pv")
            .with_uuid("uuid-pv")
            .with_project_view_attributes(ProjectViewAttributes::new("uuid-project"))
            .build()
            .unwrap();
        let view = Component::builder(ComponentType::View)
            .with_key("view")
            .with_uuid("uuid-view")
            .add_child(project_view)
            .build()
            .unwrap();
        VisitorsCrawler::new()
            .with_type_aware(logging("report", DepthLimit::FILE, Order::PreOrder, &log))
            .with_type_aware(logging("views", DepthLimit::LEAVES, Order::PostOrder, &log))
            .visit(&view)
            .unwrap();
        assert_eq!(*log.borrow(), vec!["views0", "views0"]);
    }

    struct Cancelling;

    impl TypeAwareVisitor for Cancelling {
        fn spec(&self) -> VisitorSpec {
            VisitorSpec::new(DepthLimit::DIRECTORY, Order::PreOrder)
        }

        fn visit_directory(&mut self, _directory: &Component) -> VisitResult {
            Err(VisitError::Cancelled)
        }
    }

    #[test]
    fn error_stops_every_visitor() {
        let log = Log::default();
        let mut crawler = VisitorsCrawler::new()
            .with_type_aware(Cancelling)
            .with_type_aware(logging("a", DepthLimit::FILE, Order::PreOrder, &log));
        let result = crawler.visit(&tree());
        assert!(result.unwrap_err().is_cancelled());
        // the directory is dispatched to `Cancelling` first, so `a` never sees it
        assert_eq!(*log.borrow(), vec!["a1", "a2"]);
    }

    #[test]
    fn durations_are_reported_per_visitor() {
        let log = Log::default();
        let mut lines = Lines::default();
        let mut crawler = VisitorsCrawler::new()
            .with_type_aware(logging("a", DepthLimit::FILE, Order::PreOrder, &log))
            .with_path_aware(&mut lines);
        assert_eq!(crawler.len(), 2);
        crawler.visit(&tree()).unwrap();
        crawler.visit(&tree()).unwrap();

        let durations = crawler.cumulative_durations();
        assert_eq!(durations.len(), 2);
        assert!(durations[0].0.ends_with("Logging"));
        assert!(durations[1].0.contains("Lines"));
        drop(crawler);
        assert_eq!(lines.per_component.len(), 10);
    }

    #[test]
    fn empty_crawler_walks_nothing() {
        let mut crawler = VisitorsCrawler::new();
        assert!(crawler.is_empty());
        crawler.visit(&tree()).unwrap();
        assert!(crawler.cumulative_durations().is_empty());
    }
}
