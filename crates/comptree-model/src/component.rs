//! Component tree nodes
//!
//! A [`Component`] is immutable once built, apart from its `key` and `uuid`
//! which may be fed exactly once after construction. Children are shared
//! through [`Arc`] so lookup structures can hand out the very node the tree
//! holds.

use crate::attributes::{FileAttributes, ProjectViewAttributes, ReportAttributes};
use crate::component_type::{ComponentType, Hierarchy};
use crate::error::ComponentError;
use once_cell::sync::OnceCell;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Node of a component tree
///
/// Equality and hashing only consider the uuid: two components with the same
/// uuid are the same component whatever their key, ref or children.
#[derive(Debug, Clone)]
pub struct Component {
    component_type: ComponentType,
    key: OnceCell<String>,
    uuid: OnceCell<String>,
    name: String,
    description: Option<String>,
    report_attributes: Option<ReportAttributes>,
    file_attributes: Option<FileAttributes>,
    project_view_attributes: Option<ProjectViewAttributes>,
    children: Vec<Arc<Component>>,
}

impl Component {
    /// Start building a component of the given type
    #[inline]
    #[must_use]
    pub fn builder(component_type: ComponentType) -> ComponentBuilder {
        ComponentBuilder::new(component_type)
    }

    /// Start building a report component located at `reference`
    #[inline]
    #[must_use]
    pub fn report_builder(component_type: ComponentType, reference: u32) -> ComponentBuilder {
        ComponentBuilder::new(component_type).with_report_attributes(ReportAttributes::new(reference))
    }

    /// Type of the component
    #[inline]
    #[must_use]
    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// Hierarchy of the component
    #[inline]
    #[must_use]
    pub fn hierarchy(&self) -> Hierarchy {
        self.component_type.hierarchy()
    }

    /// Key of the component
    ///
    /// # Errors
    /// `AttributeNotFed` if the key was neither built in nor fed
    pub fn key(&self) -> Result<&str, ComponentError> {
        self.key
            .get()
            .map(String::as_str)
            .ok_or(ComponentError::AttributeNotFed { attribute: "key" })
    }

    /// Uuid of the component
    ///
    /// # Errors
    /// `AttributeNotFed` if the uuid was neither built in nor fed
    pub fn uuid(&self) -> Result<&str, ComponentError> {
        self.uuid
            .get()
            .map(String::as_str)
            .ok_or(ComponentError::AttributeNotFed { attribute: "uuid" })
    }

    /// Assign the key of a component built without one
    ///
    /// # Errors
    /// `AlreadyFed` if the key is already set
    pub fn feed_key(&self, key: impl Into<String>) -> Result<(), ComponentError> {
        self.key
            .set(key.into())
            .map_err(|_| ComponentError::AlreadyFed { attribute: "key" })
    }

    /// Assign the uuid of a component built without one
    ///
    /// # Errors
    /// `AlreadyFed` if the uuid is already set
    pub fn feed_uuid(&self, uuid: impl Into<String>) -> Result<(), ComponentError> {
        self.uuid
            .set(uuid.into())
            .map_err(|_| ComponentError::AlreadyFed { attribute: "uuid" })
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Report reference, absent for views components
    #[inline]
    #[must_use]
    pub fn reference(&self) -> Option<u32> {
        self.report_attributes.as_ref().map(ReportAttributes::reference)
    }

    /// Children in traversal order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Arc<Component>] {
        &self.children
    }

    /// Report attributes
    ///
    /// # Errors
    /// `InvalidForType` on views components
    pub fn report_attributes(&self) -> Result<&ReportAttributes, ComponentError> {
        self.report_attributes
            .as_ref()
            .ok_or(ComponentError::InvalidForType {
                attribute: "report attributes",
                component_type: self.component_type,
            })
    }

    /// File attributes
    ///
    /// # Errors
    /// `InvalidForType` unless the component is a `FILE`
    pub fn file_attributes(&self) -> Result<&FileAttributes, ComponentError> {
        self.file_attributes
            .as_ref()
            .ok_or(ComponentError::InvalidForType {
                attribute: "file attributes",
                component_type: self.component_type,
            })
    }

    /// Project view attributes
    ///
    /// # Errors
    /// `InvalidForType` unless the component is a `PROJECT_VIEW`
    pub fn project_view_attributes(&self) -> Result<&ProjectViewAttributes, ComponentError> {
        self.project_view_attributes
            .as_ref()
            .ok_or(ComponentError::InvalidForType {
                attribute: "project view attributes",
                component_type: self.component_type,
            })
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.uuid.get() == other.uuid.get()
    }
}

impl Eq for Component {}

impl Hash for Component {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.get().hash(state);
    }
}

impl Display for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.component_type)?;
        if let Some(reference) = self.reference() {
            write!(f, "({reference})")?;
        }
        match self.key.get() {
            Some(key) => write!(f, " {key}"),
            None => write!(f, " {}", self.name),
        }
    }
}

/// Builder for [`Component`]
///
/// Variant rules are checked by [`ComponentBuilder::build`]:
/// - report types need report attributes, views types must not have them
/// - views types need `key` and `uuid`
/// - file attributes only on `FILE` (defaulted when absent)
/// - project view attributes only on, and required by, `PROJECT_VIEW`
/// - children belong to the same hierarchy and are never higher than the parent
#[derive(Debug, Clone)]
pub struct ComponentBuilder {
    component_type: ComponentType,
    key: Option<String>,
    uuid: Option<String>,
    name: Option<String>,
    description: Option<String>,
    report_attributes: Option<ReportAttributes>,
    file_attributes: Option<FileAttributes>,
    project_view_attributes: Option<ProjectViewAttributes>,
    children: Vec<Arc<Component>>,
}

impl ComponentBuilder {
    /// New builder for `component_type`
    #[must_use]
    pub fn new(component_type: ComponentType) -> Self {
        Self {
            component_type,
            key: None,
            uuid: None,
            name: None,
            description: None,
            report_attributes: None,
            file_attributes: None,
            project_view_attributes: None,
            children: Vec::new(),
        }
    }

    /// With key
    #[inline]
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// With uuid
    #[inline]
    #[must_use]
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    /// With name; defaults to the key when absent
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With report attributes
    #[inline]
    #[must_use]
    pub fn with_report_attributes(mut self, attributes: ReportAttributes) -> Self {
        self.report_attributes = Some(attributes);
        self
    }

    /// With file attributes
    #[inline]
    #[must_use]
    pub fn with_file_attributes(mut self, attributes: FileAttributes) -> Self {
        self.file_attributes = Some(attributes);
        self
    }

    /// With project view attributes
    #[inline]
    #[must_use]
    pub fn with_project_view_attributes(mut self, attributes: ProjectViewAttributes) -> Self {
        self.project_view_attributes = Some(attributes);
        self
    }

    /// Append a child
    #[inline]
    #[must_use]
    pub fn add_child(mut self, child: impl Into<Arc<Component>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append children, keeping their order
    #[inline]
    #[must_use]
    pub fn add_children(mut self, children: impl IntoIterator<Item = Arc<Component>>) -> Self {
        self.children.extend(children);
        self
    }

    /// Build the component
    ///
    /// # Errors
    /// Any variant rule listed on [`ComponentBuilder`] that does not hold
    pub fn build(self) -> Result<Component, ComponentError> {
        let component_type = self.component_type;
        let missing = |attribute| ComponentError::MissingAttribute {
            attribute,
            component_type,
        };
        let invalid = |attribute| ComponentError::InvalidForType {
            attribute,
            component_type,
        };

        let name = match (self.name, &self.key) {
            (Some(name), _) => name,
            (None, Some(key)) => key.clone(),
            (None, None) => return Err(missing("name")),
        };

        match (component_type.hierarchy(), &self.report_attributes) {
            (Hierarchy::Report, None) => return Err(missing("report attributes")),
            (Hierarchy::Views, Some(_)) => return Err(invalid("report attributes")),
            _ => {}
        }

        if component_type.is_views_type() {
            if self.key.is_none() {
                return Err(missing("key"));
            }
            if self.uuid.is_none() {
                return Err(missing("uuid"));
            }
        }

        let file_attributes = match (component_type, self.file_attributes) {
            (ComponentType::File, attributes) => Some(attributes.unwrap_or_default()),
            (_, Some(_)) => return Err(invalid("file attributes")),
            (_, None) => None,
        };

        let project_view_attributes = match (component_type, self.project_view_attributes) {
            (ComponentType::ProjectView, None) => return Err(missing("project view attributes")),
            (ComponentType::ProjectView, attributes) => attributes,
            (_, Some(_)) => return Err(invalid("project view attributes")),
            (_, None) => None,
        };

        for child in &self.children {
            let child_type = child.component_type();
            if child_type.hierarchy() != component_type.hierarchy() {
                return Err(ComponentError::HierarchyMismatch {
                    parent: component_type,
                    child: child_type,
                });
            }
            if child_type.is_higher_than(component_type) {
                return Err(ComponentError::InvalidChild {
                    parent: component_type,
                    child: child_type,
                });
            }
        }

        Ok(Component {
            component_type,
            key: self.key.map_or_else(OnceCell::new, OnceCell::with_value),
            uuid: self.uuid.map_or_else(OnceCell::new, OnceCell::with_value),
            name,
            description: self.description,
            report_attributes: self.report_attributes,
            file_attributes,
            project_view_attributes,
            children: self.children,
        })
    }
}
