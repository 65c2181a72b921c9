//! Depth limits for crawlers
//!
//! A [`DepthLimit`] carries at most one bound per hierarchy. A component is in
//! scope when its hierarchy has a bound and its type is not deeper than it.

use crate::error::VisitError;
use comptree_model::{ComponentType, Hierarchy};
use serde::{Deserialize, Serialize};

/// Deepest component type a visitor is dispatched on, per hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepthLimit {
    report: Option<ComponentType>,
    views: Option<ComponentType>,
}

impl DepthLimit {
    /// Report projects only
    pub const PROJECT: Self = Self::of(ComponentType::Project);
    /// Report projects and modules
    pub const MODULE: Self = Self::of(ComponentType::Module);
    /// Report tree down to directories
    pub const DIRECTORY: Self = Self::of(ComponentType::Directory);
    /// Whole report tree
    pub const FILE: Self = Self::of(ComponentType::File);
    /// Views roots only
    pub const VIEW: Self = Self::of(ComponentType::View);
    /// Views tree down to subviews
    pub const SUBVIEW: Self = Self::of(ComponentType::Subview);
    /// Whole views tree
    pub const PROJECT_VIEW: Self = Self::of(ComponentType::ProjectView);
    /// Whole tree, whichever the hierarchy
    pub const LEAVES: Self = Self::of(ComponentType::File).and(ComponentType::ProjectView);
    /// Roots only, whichever the hierarchy
    pub const ROOTS: Self = Self::of(ComponentType::Project).and(ComponentType::View);

    /// Limit bounded at `max_depth` in its own hierarchy, nothing in scope in the other
    #[must_use]
    pub const fn of(max_depth: ComponentType) -> Self {
        Self {
            report: None,
            views: None,
        }
        .and(max_depth)
    }

    /// Set the bound of `max_depth`'s hierarchy, keeping the other one
    #[must_use]
    pub const fn and(mut self, max_depth: ComponentType) -> Self {
        match max_depth.hierarchy() {
            Hierarchy::Report => self.report = Some(max_depth),
            Hierarchy::Views => self.views = Some(max_depth),
        }
        self
    }

    /// Limit from explicit per-hierarchy bounds
    ///
    /// # Errors
    /// - `ArgumentRequired` when both bounds are absent
    /// - `InvalidArgument` when a bound belongs to the wrong hierarchy
    pub fn from_bounds(
        report: Option<ComponentType>,
        views: Option<ComponentType>,
    ) -> Result<Self, VisitError> {
        if report.is_none() && views.is_none() {
            return Err(VisitError::ArgumentRequired("max_depth"));
        }
        if let Some(t) = report.filter(|t| !t.is_report_type()) {
            return Err(VisitError::InvalidArgument(format!("{t} is not a report type")));
        }
        if let Some(t) = views.filter(|t| !t.is_views_type()) {
            return Err(VisitError::InvalidArgument(format!("{t} is not a views type")));
        }
        Ok(Self { report, views })
    }

    /// Bound for `hierarchy`, if any
    #[inline]
    #[must_use]
    pub fn bound(self, hierarchy: Hierarchy) -> Option<ComponentType> {
        match hierarchy {
            Hierarchy::Report => self.report,
            Hierarchy::Views => self.views,
        }
    }

    /// The bound of `component_type`'s hierarchy is exactly `component_type`
    #[inline]
    #[must_use]
    pub fn is_same_as(self, component_type: ComponentType) -> bool {
        self.bound(component_type.hierarchy()) == Some(component_type)
    }

    /// The bound of `component_type`'s hierarchy is strictly deeper than it
    #[inline]
    #[must_use]
    pub fn is_deeper_than(self, component_type: ComponentType) -> bool {
        self.bound(component_type.hierarchy())
            .is_some_and(|bound| bound.is_deeper_than(component_type))
    }

    /// Components of this type are dispatched to the visitor
    #[inline]
    #[must_use]
    pub fn is_in_scope(self, component_type: ComponentType) -> bool {
        self.is_same_as(component_type) || self.is_deeper_than(component_type)
    }
}
