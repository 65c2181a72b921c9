//! Testing utilities for comptree workspace
//!
//! Shared fixtures (reports, trees) and call-recording visitors.

#![allow(missing_docs)]

use chrono::{TimeZone, Utc};
use comptree_builder::{
    ComponentTreeBuilder, InMemoryReport, ProjectDescriptor, RawComponent, RawComponentType,
};
use comptree_model::{Component, ComponentType, ProjectViewAttributes};
use comptree_visitor::{
    DepthLimit, Order, Path, PathAwareVisitor, TypeAwareVisitor, VisitResult, VisitorSpec,
};
use std::sync::Arc;

pub const PROJECT_KEY: &str = "org:project";

pub fn project_descriptor() -> ProjectDescriptor {
    ProjectDescriptor::new(PROJECT_KEY, "Project")
}

/// Report from raw records, rooted at the first one
pub fn report_of(components: impl IntoIterator<Item = RawComponent>) -> InMemoryReport {
    let mut components = components.into_iter().peekable();
    let root_ref = components.peek().map_or(1, |root| root.reference);
    let mut report = InMemoryReport::new(root_ref);
    for component in components {
        report.add(component).unwrap();
    }
    report
}

/// `PROJECT(1) -> MODULE(2) -> DIRECTORY(3) -> {FILE(4), FILE(5)}`
pub fn sample_report() -> InMemoryReport {
    report_of([
        RawComponent::new(1, RawComponentType::Project).with_child_refs([2]),
        RawComponent::new(2, RawComponentType::Module)
            .with_key("org:module")
            .with_child_refs([3]),
        RawComponent::new(3, RawComponentType::Directory)
            .with_path("src")
            .with_child_refs([4, 5]),
        RawComponent::new(4, RawComponentType::File)
            .with_path("src/main.rs")
            .with_lines(40)
            .with_language("rust"),
        RawComponent::new(5, RawComponentType::File)
            .with_path("src/main_test.rs")
            .with_lines(15)
            .with_language("rust")
            .with_is_test(true),
    ])
}

/// Refs encode ancestry: the parent of `1112` is `111`
///
/// ```text
/// PROJECT(1)
/// ├── MODULE(11)
/// │   ├── DIRECTORY(111) -> {FILE(1111), FILE(1112)}
/// │   └── DIRECTORY(112) -> FILE(1121)
/// └── MODULE(12)
///     └── DIRECTORY(121) -> FILE(1211)
/// ```
pub fn nested_report() -> InMemoryReport {
    let file = |reference: u32, path: &str| {
        RawComponent::new(reference, RawComponentType::File)
            .with_path(path)
            .with_lines(i32::try_from(reference % 100).unwrap_or(1) + 1)
    };
    report_of([
        RawComponent::new(1, RawComponentType::Project).with_child_refs([11, 12]),
        RawComponent::new(11, RawComponentType::Module)
            .with_key("m11")
            .with_child_refs([111, 112]),
        RawComponent::new(111, RawComponentType::Directory)
            .with_path("a")
            .with_child_refs([1111, 1112]),
        file(1111, "a/x.rs"),
        file(1112, "a/y.rs"),
        RawComponent::new(112, RawComponentType::Directory)
            .with_path("b")
            .with_child_refs([1121]),
        file(1121, "b/z.rs"),
        RawComponent::new(12, RawComponentType::Module)
            .with_key("m12")
            .with_child_refs([121]),
        RawComponent::new(121, RawComponentType::Directory)
            .with_path("c")
            .with_child_refs([1211]),
        file(1211, "c/w.rs"),
    ])
}

/// Uuid issued by [`build_tree`] for `key`
pub fn uuid_of(key: &str) -> String {
    format!("{key}_uuid")
}

/// Tree of `report` with deterministic uuids
pub fn build_tree(report: &InMemoryReport) -> Arc<Component> {
    ComponentTreeBuilder::new(report, project_descriptor())
        .with_uuid_supplier(uuid_of)
        .build()
        .unwrap()
}

/// `VIEW -> SUBVIEW -> {PROJECT_VIEW, PROJECT_VIEW}`
pub fn views_tree() -> Arc<Component> {
    let analysed = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let project_view = |key: &str| {
        Component::builder(ComponentType::ProjectView)
            .with_key(key)
            .with_uuid(uuid_of(key))
            .with_project_view_attributes(
                ProjectViewAttributes::new(uuid_of(&format!("{key}_project")))
                    .with_analysis_date(analysed),
            )
            .build()
            .unwrap()
    };
    let subview = Component::builder(ComponentType::Subview)
        .with_key("sv")
        .with_uuid(uuid_of("sv"))
        .add_child(project_view("pv1"))
        .add_child(project_view("pv2"))
        .build()
        .unwrap();
    Arc::new(
        Component::builder(ComponentType::View)
            .with_key("v")
            .with_uuid(uuid_of("v"))
            .add_child(subview)
            .build()
            .unwrap(),
    )
}

/// Label of a component in recorded calls: its ref, else its key
pub fn label(component: &Component) -> String {
    match component.reference() {
        Some(reference) => reference.to_string(),
        None => component.key().unwrap_or("?").to_string(),
    }
}

/// Records every callback as `method(label)`
#[derive(Debug)]
pub struct CallRecorder {
    pub spec: VisitorSpec,
    pub calls: Vec<String>,
}

impl CallRecorder {
    pub fn new(max_depth: DepthLimit, order: Order) -> Self {
        Self {
            spec: VisitorSpec::new(max_depth, order),
            calls: Vec::new(),
        }
    }

    fn record(&mut self, method: &str, component: &Component) -> VisitResult {
        self.calls.push(format!("{method}({})", label(component)));
        Ok(())
    }
}

impl TypeAwareVisitor for CallRecorder {
    fn spec(&self) -> VisitorSpec {
        self.spec
    }

    fn visit_any(&mut self, component: &Component) -> VisitResult {
        self.record("any", component)
    }

    fn visit_project(&mut self, project: &Component) -> VisitResult {
        self.record("project", project)
    }

    fn visit_module(&mut self, module: &Component) -> VisitResult {
        self.record("module", module)
    }

    fn visit_directory(&mut self, directory: &Component) -> VisitResult {
        self.record("directory", directory)
    }

    fn visit_file(&mut self, file: &Component) -> VisitResult {
        self.record("file", file)
    }

    fn visit_view(&mut self, view: &Component) -> VisitResult {
        self.record("view", view)
    }

    fn visit_subview(&mut self, subview: &Component) -> VisitResult {
        self.record("subview", subview)
    }

    fn visit_project_view(&mut self, project_view: &Component) -> VisitResult {
        self.record("projectView", project_view)
    }
}

/// Path snapshot taken on one callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSnapshot {
    pub current: String,
    pub parent: Option<String>,
    pub root: String,
    pub chain: Vec<String>,
}

/// Path-aware visitor whose elements are component labels
#[derive(Debug)]
pub struct PathRecorder {
    pub spec: VisitorSpec,
    pub snapshots: Vec<PathSnapshot>,
}

impl PathRecorder {
    pub fn new(max_depth: DepthLimit, order: Order) -> Self {
        Self {
            spec: VisitorSpec::new(max_depth, order),
            snapshots: Vec::new(),
        }
    }

    /// Snapshot taken on the component labelled `label`
    pub fn at(&self, label: &str) -> Option<&PathSnapshot> {
        self.snapshots.iter().find(|s| s.current == label)
    }
}

impl PathAwareVisitor for PathRecorder {
    type Element = String;

    fn spec(&self) -> VisitorSpec {
        self.spec
    }

    fn create_element(&mut self, component: &Component) -> String {
        label(component)
    }

    fn visit_any(&mut self, _component: &Component, path: &mut Path<String>) -> VisitResult {
        self.snapshots.push(PathSnapshot {
            current: path.current().clone(),
            parent: path.parent().ok().cloned(),
            root: path.root().clone(),
            chain: path.iter().cloned().collect(),
        });
        Ok(())
    }
}
