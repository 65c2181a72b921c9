//! Component tree construction from a report
//!
//! Records are read from the root down; each component is built once its
//! children are, so the tree is immutable as soon as it exists. Keys are
//! derived from the closest enclosing module (the project counts as one).

use crate::config::{ProjectDescriptor, TreeBuilderConfig};
use crate::error::{Result, TreeBuildError};
use crate::identity::{EffectiveKeyGenerator, ExistingUuidSupplier, KeyGenerator, UuidSupplier};
use crate::raw::{RawComponent, RawComponentType};
use crate::report::ReportReader;
use comptree_model::{Component, ComponentType, FileAttributes, ReportAttributes};
use comptree_repository::{ComponentIdentity, RefCache};
use std::sync::Arc;

/// Builds the component tree of a report
///
/// # Example
///
/// ```rust
/// use comptree_builder::{
///     ComponentTreeBuilder, InMemoryReport, ProjectDescriptor, RawComponent, RawComponentType,
/// };
///
/// let report = InMemoryReport::new(1)
///     .with_component(RawComponent::new(1, RawComponentType::Project).with_child_refs([2]))?
///     .with_component(
///         RawComponent::new(2, RawComponentType::File)
///             .with_path("src/lib.rs")
///             .with_lines(12),
///     )?;
///
/// let mut builder = ComponentTreeBuilder::new(&report, ProjectDescriptor::new("org:app", "App"));
/// let root = builder.build()?;
/// assert_eq!(root.name(), "App");
/// assert_eq!(root.children()[0].key()?, "org:app:src/lib.rs");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ComponentTreeBuilder<R> {
    reader: R,
    project: ProjectDescriptor,
    config: TreeBuilderConfig,
    key_generator: Box<dyn KeyGenerator>,
    uuid_supplier: Box<dyn UuidSupplier>,
}

impl<R: ReportReader> ComponentTreeBuilder<R> {
    /// Builder reading `reader`, with effective keys and random uuids
    #[must_use]
    pub fn new(reader: R, project: ProjectDescriptor) -> Self {
        Self {
            reader,
            project,
            config: TreeBuilderConfig::default(),
            key_generator: Box::new(EffectiveKeyGenerator),
            uuid_supplier: Box::new(ExistingUuidSupplier::new()),
        }
    }

    /// With configuration
    #[must_use]
    pub fn with_config(mut self, config: TreeBuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// With key generator
    #[must_use]
    pub fn with_key_generator(mut self, key_generator: impl KeyGenerator + 'static) -> Self {
        self.key_generator = Box::new(key_generator);
        self
    }

    /// With uuid supplier
    #[must_use]
    pub fn with_uuid_supplier(mut self, uuid_supplier: impl UuidSupplier + 'static) -> Self {
        self.uuid_supplier = Box::new(uuid_supplier);
        self
    }

    /// Build the tree of the report
    ///
    /// # Errors
    /// - `RootNotProject` when the root record is not a project
    /// - `UnsupportedType`, `FileWithoutLines` on an invalid record
    /// - `Report` when a record cannot be read
    /// - `Component` when a record breaks the component model
    pub fn build(&mut self) -> Result<Arc<Component>> {
        self.build_root(None)
    }

    /// Build the tree of the report, registering every ref in `cache`
    ///
    /// # Errors
    /// As [`build`](Self::build), plus `Repository` when a ref is already cached
    pub fn build_with_cache(&mut self, cache: &mut RefCache) -> Result<Arc<Component>> {
        self.build_root(Some(cache))
    }

    fn build_root(&mut self, cache: Option<&mut RefCache>) -> Result<Arc<Component>> {
        let root_ref = self.reader.root_ref()?;
        let raw = self.reader.read_component(root_ref)?;
        if raw.component_type != RawComponentType::Project {
            return Err(TreeBuildError::RootNotProject(raw.component_type));
        }
        let module_key = self.project.key.clone();
        let root = self.build_component(raw, &module_key, cache)?;
        tracing::info!(root = %root, "component tree built");
        Ok(root)
    }

    fn build_component(
        &mut self,
        raw: RawComponent,
        closest_module_key: &str,
        mut cache: Option<&mut RefCache>,
    ) -> Result<Arc<Component>> {
        let component_type = raw
            .component_type
            .component_type()
            .ok_or(TreeBuildError::UnsupportedType(raw.component_type))?;

        let module_key = match component_type {
            ComponentType::Project => self.project.key.clone(),
            ComponentType::Module => raw.key.clone(),
            _ => closest_module_key.to_string(),
        };
        let key = match component_type {
            ComponentType::Project | ComponentType::Module => {
                self.key_generator.generate_key(&module_key, None)
            }
            _ => self
                .key_generator
                .generate_key(&module_key, non_empty(&raw.path)),
        };
        let uuid = self.uuid_supplier.uuid_for(&key);
        if let Some(cache) = cache.as_deref_mut() {
            cache.register(raw.reference, ComponentIdentity::new(&key, &uuid))?;
        }

        let mut children = Vec::with_capacity(raw.child_refs.len());
        for &child_ref in &raw.child_refs {
            let child = self.reader.read_component(child_ref)?;
            children.push(self.build_component(child, &module_key, cache.as_deref_mut())?);
        }

        let mut builder = Component::builder(component_type)
            .with_name(self.name_of(component_type, &raw, &key))
            .with_report_attributes(self.report_attributes_of(component_type, &raw))
            .add_children(children);
        if let Some(description) = non_empty(&raw.description) {
            builder = builder.with_description(description);
        }
        if component_type == ComponentType::File {
            builder = builder.with_file_attributes(file_attributes_of(&raw)?);
        }
        let component = builder.with_key(key).with_uuid(uuid).build()?;
        tracing::debug!(component = %component, "component built");
        Ok(Arc::new(component))
    }

    fn name_of(&self, component_type: ComponentType, raw: &RawComponent, key: &str) -> String {
        let fallback = match component_type {
            ComponentType::Project => non_empty(&self.project.name).unwrap_or(key),
            _ => key,
        };
        non_empty(&raw.name).unwrap_or(fallback).to_string()
    }

    fn report_attributes_of(&self, component_type: ComponentType, raw: &RawComponent) -> ReportAttributes {
        let mut attributes = ReportAttributes::new(raw.reference);
        let version = match component_type {
            ComponentType::Project => Some(
                non_empty(&raw.version)
                    .or_else(|| self.project.base_version.as_deref().and_then(non_empty))
                    .unwrap_or(&self.config.default_version),
            ),
            _ => non_empty(&raw.version),
        };
        if let Some(version) = version {
            attributes = attributes.with_version(version);
        }
        if let Some(path) = non_empty(&raw.path) {
            attributes = attributes.with_path(path);
        }
        if let Some(relative) = non_empty(&raw.project_relative_path) {
            let scm_path = match non_empty(&self.config.scm_base_path) {
                Some(base) => format!("{base}/{relative}"),
                None => relative.to_string(),
            };
            attributes = attributes.with_scm_path(scm_path);
        }
        attributes
    }
}

fn file_attributes_of(raw: &RawComponent) -> Result<FileAttributes> {
    let lines = u32::try_from(raw.lines)
        .ok()
        .filter(|lines| *lines > 0)
        .ok_or_else(|| TreeBuildError::FileWithoutLines(raw.path.clone()))?;
    let mut attributes = FileAttributes::new(lines).with_unit_test(raw.is_test);
    if let Some(language) = non_empty(&raw.language) {
        attributes = attributes.with_language_key(language);
    }
    Ok(attributes)
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::InMemoryReport;
    use comptree_model::ComponentError;
    use comptree_repository::RepositoryError;
    use pretty_assertions::assert_eq;

    fn generated_key(module_key: &str, path: Option<&str>) -> String {
        format!("generated_{}", EffectiveKeyGenerator.generate_key(module_key, path))
    }

    fn uuid_of(key: &str) -> String {
        format!("{key}_uuid")
    }

    fn project_raw() -> RawComponent {
        RawComponent::new(1, RawComponentType::Project).with_key("K1")
    }

    fn report(components: impl IntoIterator<Item = RawComponent>) -> InMemoryReport {
        let mut report = InMemoryReport::new(1);
        for component in components {
            report.add(component).unwrap();
        }
        report
    }

    fn builder(report: &InMemoryReport) -> ComponentTreeBuilder<&InMemoryReport> {
        ComponentTreeBuilder::new(report, ProjectDescriptor::new("K1", "theProjectName"))
            .with_key_generator(generated_key)
            .with_uuid_supplier(uuid_of)
    }

    /// PROJECT(1) -> MODULE(2) "M" -> DIRECTORY(3) src/js -> FILE(4) src/js/Foo.js
    fn full_report() -> InMemoryReport {
        report([
            project_raw().with_child_refs([2]),
            RawComponent::new(2, RawComponentType::Module)
                .with_key("M")
                .with_child_refs([3]),
            RawComponent::new(3, RawComponentType::Directory)
                .with_path("src/js")
                .with_child_refs([4]),
            RawComponent::new(4, RawComponentType::File)
                .with_path("src/js/Foo.js")
                .with_lines(1),
        ])
    }

    fn only_child(component: &Component) -> &Component {
        assert_eq!(component.children().len(), 1);
        &component.children()[0]
    }

    #[test]
    fn project_fields_come_from_report() {
        let report = report([project_raw()
            .with_name("the name")
            .with_description("the desc")
            .with_version("6.5")]);
        let root = builder(&report).build().unwrap();
        assert_eq!(root.component_type(), ComponentType::Project);
        assert_eq!(root.key().unwrap(), "generated_K1");
        assert_eq!(root.uuid().unwrap(), "generated_K1_uuid");
        assert_eq!(root.name(), "the name");
        assert_eq!(root.description(), Some("the desc"));
        let attributes = root.report_attributes().unwrap();
        assert_eq!(attributes.reference(), 1);
        assert_eq!(attributes.path(), None);
        assert_eq!(attributes.version(), Some("6.5"));
        assert!(root.file_attributes().is_err());
    }

    #[test]
    fn project_name_falls_back_to_descriptor() {
        let report = report([project_raw()]);
        assert_eq!(builder(&report).build().unwrap().name(), "theProjectName");
    }

    #[test]
    fn project_version_falls_back_to_base_analysis_then_default() {
        let report = report([project_raw().with_version("")]);
        let root = builder(&report).build().unwrap();
        assert_eq!(root.report_attributes().unwrap().version(), Some("not provided"));

        let mut with_base = ComponentTreeBuilder::new(
            &report,
            ProjectDescriptor::new("K1", "p").with_base_version("6.5"),
        );
        let root = with_base.build().unwrap();
        assert_eq!(root.report_attributes().unwrap().version(), Some("6.5"));
    }

    #[test]
    fn project_description_is_absent_when_missing() {
        let report = report([project_raw()]);
        assert_eq!(builder(&report).build().unwrap().description(), None);
    }

    #[test]
    fn keys_and_uuids_of_module_directory_and_file_are_generated() {
        let report = full_report();
        let root = builder(&report).build().unwrap();
        let module = only_child(&root);
        let directory = only_child(module);
        let file = only_child(directory);
        assert_eq!(module.key().unwrap(), "generated_M");
        assert_eq!(directory.key().unwrap(), "generated_M:src/js");
        assert_eq!(file.key().unwrap(), "generated_M:src/js/Foo.js");
        assert_eq!(module.uuid().unwrap(), "generated_M_uuid");
        assert_eq!(file.uuid().unwrap(), "generated_M:src/js/Foo.js_uuid");
        assert!(file.children().is_empty());
    }

    #[test]
    fn keys_use_the_closest_module() {
        let report = report([
            project_raw().with_key("project 1").with_child_refs([11, 21]),
            RawComponent::new(11, RawComponentType::Module)
                .with_key("module 1")
                .with_child_refs([12, 22]),
            RawComponent::new(12, RawComponentType::Module)
                .with_key("module 2")
                .with_child_refs([23]),
            RawComponent::new(21, RawComponentType::Directory).with_path("dir in project"),
            RawComponent::new(22, RawComponentType::Directory).with_path("dir in module 1"),
            RawComponent::new(23, RawComponentType::File)
                .with_path("file in module 2")
                .with_lines(1),
        ]);
        let mut cache = RefCache::new();
        builder(&report).build_with_cache(&mut cache).unwrap();
        let key = |reference| cache.get(reference).unwrap().key.clone();
        // the project key comes from the descriptor, not the report
        assert_eq!(key(1), "generated_K1");
        assert_eq!(key(11), "generated_module 1");
        assert_eq!(key(12), "generated_module 2");
        assert_eq!(key(21), "generated_K1:dir in project");
        assert_eq!(key(22), "generated_module 1:dir in module 1");
        assert_eq!(key(23), "generated_module 2:file in module 2");
    }

    #[test]
    fn names_fall_back_to_keys() {
        let report = full_report();
        let root = builder(&report).build().unwrap();
        let directory = only_child(only_child(&root));
        assert_eq!(directory.name(), "generated_M:src/js");
    }

    #[test]
    fn descriptions_and_versions_below_project_are_absent_when_empty() {
        let report = full_report();
        let root = builder(&report).build().unwrap();
        let module = only_child(&root);
        assert_eq!(module.description(), None);
        assert_eq!(module.report_attributes().unwrap().version(), None);
    }

    #[test]
    fn descriptions_and_versions_below_project_come_from_report() {
        let report = report([
            project_raw().with_child_refs([2]),
            RawComponent::new(2, RawComponentType::Module)
                .with_key("M")
                .with_description("module desc")
                .with_version("1.0"),
        ]);
        let root = builder(&report).build().unwrap();
        let module = only_child(&root);
        assert_eq!(module.description(), Some("module desc"));
        assert_eq!(module.report_attributes().unwrap().version(), Some("1.0"));
    }

    fn scm_report() -> InMemoryReport {
        report([
            project_raw().with_project_relative_path("root").with_child_refs([2]),
            RawComponent::new(2, RawComponentType::Directory)
                .with_path("src")
                .with_project_relative_path("sub/src")
                .with_child_refs([3]),
            RawComponent::new(3, RawComponentType::File)
                .with_path("src/a.js")
                .with_lines(3),
        ])
    }

    #[test]
    fn scm_path_is_project_relative_path_without_base() {
        let report = scm_report();
        let root = builder(&report).build().unwrap();
        assert_eq!(root.report_attributes().unwrap().scm_path(), Some("root"));
        let directory = only_child(&root);
        assert_eq!(directory.report_attributes().unwrap().scm_path(), Some("sub/src"));
        assert_eq!(only_child(directory).report_attributes().unwrap().scm_path(), None);
    }

    #[test]
    fn scm_path_is_prefixed_by_base() {
        let report = scm_report();
        let root = builder(&report)
            .with_config(TreeBuilderConfig::new().with_scm_base_path("base"))
            .build()
            .unwrap();
        assert_eq!(root.report_attributes().unwrap().scm_path(), Some("base/root"));
        assert_eq!(
            only_child(&root).report_attributes().unwrap().scm_path(),
            Some("base/sub/src")
        );
    }

    #[test]
    fn file_attributes_default_to_lines_only() {
        let report = report([
            project_raw().with_child_refs([2]),
            RawComponent::new(2, RawComponentType::File)
                .with_path("src/js/Foo.js")
                .with_lines(1)
                .with_language(""),
        ]);
        let root = builder(&report).build().unwrap();
        let attributes = only_child(&root).file_attributes().unwrap().clone();
        assert_eq!(attributes, FileAttributes::new(1));
        assert_eq!(attributes.language_key(), None);
        assert!(!attributes.is_unit_test());
    }

    #[test]
    fn file_attributes_are_fully_loaded() {
        let report = report([
            project_raw().with_child_refs([2]),
            RawComponent::new(2, RawComponentType::File)
                .with_path("src/js/Foo.js")
                .with_lines(7)
                .with_language("js")
                .with_is_test(true),
        ]);
        let root = builder(&report).build().unwrap();
        let attributes = only_child(&root).file_attributes().unwrap();
        assert_eq!(attributes.lines(), 7);
        assert_eq!(attributes.language_key(), Some("js"));
        assert!(attributes.is_unit_test());
    }

    #[test]
    fn file_without_positive_lines_is_rejected() {
        for lines in [0, -1] {
            let report = report([
                project_raw().with_child_refs([2]),
                RawComponent::new(2, RawComponentType::File)
                    .with_path("src/js/Foo.js")
                    .with_lines(lines),
            ]);
            let err = builder(&report).build().unwrap_err();
            assert_eq!(err.to_string(), "File 'src/js/Foo.js' has no line");
        }
    }

    #[test]
    fn unsupported_types_are_rejected() {
        for raw_type in [RawComponentType::Unset, RawComponentType::Unrecognized] {
            let report = report([
                project_raw().with_child_refs([2]),
                RawComponent::new(2, raw_type).with_path("src").with_lines(1),
            ]);
            let err = builder(&report).build().unwrap_err();
            assert_eq!(err.to_string(), format!("Unsupported component type '{raw_type}'"));
        }
    }

    #[test]
    fn root_must_be_a_project() {
        let report = report([RawComponent::new(1, RawComponentType::Module).with_key("M")]);
        let err = builder(&report).build().unwrap_err();
        assert!(matches!(err, TreeBuildError::RootNotProject(RawComponentType::Module)));
    }

    #[test]
    fn project_below_module_breaks_the_model() {
        let report = report([
            project_raw().with_child_refs([2]),
            RawComponent::new(2, RawComponentType::Module)
                .with_key("M")
                .with_child_refs([3]),
            RawComponent::new(3, RawComponentType::Project),
        ]);
        let err = builder(&report).build().unwrap_err();
        assert!(matches!(
            err,
            TreeBuildError::Component(ComponentError::InvalidChild { .. })
        ));
    }

    #[test]
    fn missing_child_record_propagates_reader_error() {
        let report = report([project_raw().with_child_refs([5])]);
        let err = builder(&report).build().unwrap_err();
        assert_eq!(err.to_string(), "no component with ref '5' in report");
    }

    #[test]
    fn cache_receives_every_ref() {
        let report = full_report();
        let mut cache = RefCache::new();
        builder(&report).build_with_cache(&mut cache).unwrap();
        assert_eq!(cache.iter().map(|(r, _)| r).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(
            cache.get(3).unwrap(),
            &ComponentIdentity::new("generated_M:src/js", "generated_M:src/js_uuid")
        );

        let err = builder(&report).build_with_cache(&mut cache).unwrap_err();
        assert!(matches!(
            err,
            TreeBuildError::Repository(RepositoryError::RefAlreadyCached(1))
        ));
    }

    #[test]
    fn default_suppliers_issue_effective_keys_and_uuids() {
        let report = full_report();
        let root = ComponentTreeBuilder::new(&report, ProjectDescriptor::new("K1", "p"))
            .build()
            .unwrap();
        let module = only_child(&root);
        assert_eq!(root.key().unwrap(), "K1");
        assert_eq!(only_child(module).key().unwrap(), "M:src/js");
        assert!(uuid::Uuid::parse_str(root.uuid().unwrap()).is_ok());
        assert_ne!(root.uuid().unwrap(), module.uuid().unwrap());
    }
}
