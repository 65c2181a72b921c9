//! Component types and their depth ordering
//!
//! Provides [`ComponentType`] and [`Hierarchy`]. Types are partitioned into two
//! hierarchies which never compare with each other.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// The two mutually exclusive component hierarchies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Hierarchy {
    /// Built from an analysis report: project, module, directory, file
    Report,

    /// Rehydrated from persisted portfolios: view, subview, project view
    Views,
}

/// Type of a component
///
/// Within a hierarchy the types form a strict total order, the root-most
/// type being the shallowest:
///
/// - Report: `Project > Module > Directory > File`
/// - Views: `View > Subview > ProjectView`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    /// Root of a report tree
    Project,

    /// Module (possibly nested in another module)
    Module,

    /// Directory of a module or project
    Directory,

    /// Source file, deepest report type
    File,

    /// Root of a views tree
    View,

    /// View nested in a view or subview
    Subview,

    /// Reference to a project inside a view, deepest views type
    ProjectView,
}

impl ComponentType {
    /// All report hierarchy types, shallowest first
    pub const REPORT_TYPES: [Self; 4] = [Self::Project, Self::Module, Self::Directory, Self::File];

    /// All views hierarchy types, shallowest first
    pub const VIEWS_TYPES: [Self; 3] = [Self::View, Self::Subview, Self::ProjectView];

    /// Hierarchy this type belongs to
    #[inline]
    #[must_use]
    pub const fn hierarchy(self) -> Hierarchy {
        match self {
            Self::Project | Self::Module | Self::Directory | Self::File => Hierarchy::Report,
            Self::View | Self::Subview | Self::ProjectView => Hierarchy::Views,
        }
    }

    /// Position within the hierarchy, 0 being the root-most type
    #[inline]
    const fn rank(self) -> u8 {
        match self {
            Self::Project | Self::View => 0,
            Self::Module | Self::Subview => 1,
            Self::Directory | Self::ProjectView => 2,
            Self::File => 3,
        }
    }

    /// Whether this type belongs to the report hierarchy
    #[inline]
    #[must_use]
    pub const fn is_report_type(self) -> bool {
        matches!(self.hierarchy(), Hierarchy::Report)
    }

    /// Whether this type belongs to the views hierarchy
    #[inline]
    #[must_use]
    pub const fn is_views_type(self) -> bool {
        matches!(self.hierarchy(), Hierarchy::Views)
    }

    /// Strictly deeper than `other` in the same hierarchy
    ///
    /// Always false across hierarchies and for a type compared with itself.
    #[inline]
    #[must_use]
    pub fn is_deeper_than(self, other: Self) -> bool {
        self.hierarchy() == other.hierarchy() && self.rank() > other.rank()
    }

    /// Strictly higher (closer to the root) than `other` in the same hierarchy
    #[inline]
    #[must_use]
    pub fn is_higher_than(self, other: Self) -> bool {
        self.hierarchy() == other.hierarchy() && self.rank() < other.rank()
    }

    /// Wire name of the type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "PROJECT",
            Self::Module => "MODULE",
            Self::Directory => "DIRECTORY",
            Self::File => "FILE",
            Self::View => "VIEW",
            Self::Subview => "SUBVIEW",
            Self::ProjectView => "PROJECT_VIEW",
        }
    }
}

impl Display for ComponentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL: [ComponentType; 7] = [
        ComponentType::Project,
        ComponentType::Module,
        ComponentType::Directory,
        ComponentType::File,
        ComponentType::View,
        ComponentType::Subview,
        ComponentType::ProjectView,
    ];

    #[test]
    fn report_types_are_ordered_shallowest_first() {
        for window in ComponentType::REPORT_TYPES.windows(2) {
            assert!(window[1].is_deeper_than(window[0]));
            assert!(window[0].is_higher_than(window[1]));
        }
    }

    #[test]
    fn views_types_are_ordered_shallowest_first() {
        for window in ComponentType::VIEWS_TYPES.windows(2) {
            assert!(window[1].is_deeper_than(window[0]));
            assert!(window[0].is_higher_than(window[1]));
        }
    }

    #[test]
    fn type_is_never_deeper_or_higher_than_itself() {
        for t in ALL {
            assert!(!t.is_deeper_than(t));
            assert!(!t.is_higher_than(t));
        }
    }

    #[test]
    fn hierarchies_do_not_compare() {
        for report in ComponentType::REPORT_TYPES {
            for views in ComponentType::VIEWS_TYPES {
                assert!(!report.is_deeper_than(views));
                assert!(!report.is_higher_than(views));
                assert!(!views.is_deeper_than(report));
                assert!(!views.is_higher_than(report));
            }
        }
    }

    #[test]
    fn serde_uses_screaming_names() {
        let json = serde_json::to_string(&ComponentType::ProjectView).unwrap();
        assert_eq!(json, "\"PROJECT_VIEW\"");
        let parsed: ComponentType = serde_json::from_str("\"DIRECTORY\"").unwrap();
        assert_eq!(parsed, ComponentType::Directory);
        assert_eq!(ComponentType::ProjectView.to_string(), "PROJECT_VIEW");
    }

    proptest! {
        #[test]
        fn prop_deeper_is_antisymmetric(a in 0..7usize, b in 0..7usize) {
            let (a, b) = (ALL[a], ALL[b]);
            prop_assert!(!(a.is_deeper_than(b) && b.is_deeper_than(a)));
            prop_assert_eq!(a.is_deeper_than(b), b.is_higher_than(a));
        }

        #[test]
        fn prop_same_hierarchy_is_total(a in 0..7usize, b in 0..7usize) {
            let (a, b) = (ALL[a], ALL[b]);
            if a != b && a.hierarchy() == b.hierarchy() {
                prop_assert!(a.is_deeper_than(b) || b.is_deeper_than(a));
            }
        }
    }
}
