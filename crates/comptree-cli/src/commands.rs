//! Subcommand implementations
//!
//! Every command loads the report into a [`TreeRootHolder`] first, then
//! crawls the tree with a path-aware visitor and renders the result as text.

use crate::config::CliConfig;
use anyhow::Context;
use comptree_builder::{ComponentTreeBuilder, InMemoryReport, ProjectDescriptor, ReportReader};
use comptree_model::{Component, ComponentType};
use comptree_repository::{RefCache, TreeRootHolder};
use comptree_visitor::{
    DepthLimit, Order, Path, PathAwareCrawler, PathAwareVisitor, VisitError, VisitResult,
    VisitorSpec,
};
use serde::Serialize;
use std::fmt::Write as _;
use std::sync::Arc;

/// Project key used when neither the configuration nor the report has one
const FALLBACK_PROJECT_KEY: &str = "project";

/// Tree loaded from a report file, indexed by ref
#[derive(Debug)]
pub struct LoadedTree {
    holder: TreeRootHolder,
    cache: RefCache,
}

impl LoadedTree {
    /// Root of the tree
    ///
    /// # Errors
    /// When the holder is empty
    pub fn root(&self) -> anyhow::Result<&Arc<Component>> {
        Ok(self.holder.root()?)
    }

    /// Holder of the tree
    #[inline]
    #[must_use]
    pub fn holder(&self) -> &TreeRootHolder {
        &self.holder
    }

    /// Identities of the report components
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &RefCache {
        &self.cache
    }
}

/// Read the report at `path` and build its tree
///
/// The project key falls back to the key of the root record when the
/// configuration leaves it empty.
///
/// # Errors
/// When the report cannot be read or does not describe a valid tree
pub fn load_tree(path: &std::path::Path, config: &CliConfig) -> anyhow::Result<LoadedTree> {
    let report = InMemoryReport::from_json_file(path)?;
    let project = resolve_project(&report, &config.project)?;
    tracing::info!(report = %path.display(), project = %project.key, "building component tree");

    let mut cache = RefCache::new();
    let root = ComponentTreeBuilder::new(&report, project)
        .with_config(config.builder.clone())
        .build_with_cache(&mut cache)
        .with_context(|| format!("failed to build tree of '{}'", path.display()))?;

    let holder = TreeRootHolder::new();
    holder.set_root(root)?;
    tracing::debug!(components = holder.size()?, "tree indexed");
    Ok(LoadedTree { holder, cache })
}

fn resolve_project(
    report: &InMemoryReport,
    configured: &ProjectDescriptor,
) -> anyhow::Result<ProjectDescriptor> {
    let mut project = configured.clone();
    if project.key.is_empty() {
        let root = report.read_component(report.root_ref()?)?;
        project.key = if root.key.is_empty() {
            FALLBACK_PROJECT_KEY.to_string()
        } else {
            root.key
        };
    }
    if project.name.is_empty() {
        project.name.clone_from(&project.key);
    }
    Ok(project)
}

/// Parse a report depth limit name, case-insensitively
///
/// # Errors
/// When `name` is not a report component type
pub fn parse_depth(name: &str) -> anyhow::Result<DepthLimit> {
    ComponentType::REPORT_TYPES
        .into_iter()
        .find(|t| t.as_str().eq_ignore_ascii_case(name))
        .map(DepthLimit::of)
        .with_context(|| {
            format!("unknown depth '{name}', expected one of PROJECT, MODULE, DIRECTORY, FILE")
        })
}

/// Indented outline of the tree, parents first
struct TreeRenderer {
    max_depth: DepthLimit,
    out: String,
}

impl PathAwareVisitor for TreeRenderer {
    type Element = ();

    fn spec(&self) -> VisitorSpec {
        VisitorSpec::new(self.max_depth, Order::PreOrder)
    }

    fn create_element(&mut self, _component: &Component) {}

    fn visit_any(&mut self, component: &Component, path: &mut Path<()>) -> VisitResult {
        let indent = "  ".repeat(path.depth());
        let line = match component.component_type() {
            ComponentType::File => {
                let attributes = component.file_attributes()?;
                let test = if attributes.is_unit_test() { ", test" } else { "" };
                format!("{indent}{component} ({} lines{test})", attributes.lines())
            }
            _ => format!("{indent}{component}"),
        };
        writeln!(self.out, "{line}").map_err(|err| VisitError::Failed(err.to_string()))
    }
}

/// Outline of `root` down to `max_depth`
///
/// # Errors
/// When a component lacks the attributes of its type
pub fn render_tree(root: &Component, max_depth: DepthLimit) -> Result<String, VisitError> {
    let mut crawler = PathAwareCrawler::new(TreeRenderer {
        max_depth,
        out: String::new(),
    });
    crawler.visit(root)?;
    Ok(crawler.into_visitor().out)
}

/// File and line counts of a subtree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Number of files
    pub files: u32,
    /// Sum of the file line counts
    pub lines: u64,
    /// Number of unit test files
    pub test_files: u32,
}

impl Totals {
    fn add(&mut self, other: Self) {
        self.files += other.files;
        self.lines += other.lines;
        self.test_files += other.test_files;
    }
}

/// Totals of one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsRow {
    /// Component type
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Component key
    pub key: String,
    /// Number of ancestors
    pub depth: usize,
    /// Totals of the component subtree
    #[serde(flatten)]
    pub totals: Totals,
}

/// Per-component totals, parents first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    /// Totals of the whole tree
    pub totals: Totals,
    /// One row per crawled component
    pub components: Vec<StatsRow>,
}

impl StatsReport {
    /// Human readable table
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.components {
            let _ = writeln!(
                out,
                "{}{} {}: {} files, {} lines, {} test files",
                "  ".repeat(row.depth),
                row.component_type,
                row.key,
                row.totals.files,
                row.totals.lines,
                row.totals.test_files,
            );
        }
        out
    }
}

/// Element of [`StatsCollector`]: row to fill plus the totals gathered so far
struct Tally {
    row: usize,
    totals: Totals,
}

/// Sums file totals bottom-up
///
/// Rows are allocated when elements are created, which happens on the way
/// down, so they come out parents first although totals are final only on
/// the way up.
struct StatsCollector {
    max_depth: DepthLimit,
    rows: Vec<StatsRow>,
}

impl PathAwareVisitor for StatsCollector {
    type Element = Tally;

    fn spec(&self) -> VisitorSpec {
        VisitorSpec::new(self.max_depth, Order::PostOrder)
    }

    fn create_element(&mut self, component: &Component) -> Tally {
        let totals = component
            .file_attributes()
            .map(|attributes| Totals {
                files: 1,
                lines: u64::from(attributes.lines()),
                test_files: u32::from(attributes.is_unit_test()),
            })
            .unwrap_or_default();
        self.rows.push(StatsRow {
            component_type: component.component_type(),
            key: component.key().unwrap_or_else(|_| component.name()).to_string(),
            depth: 0,
            totals: Totals::default(),
        });
        Tally {
            row: self.rows.len() - 1,
            totals,
        }
    }

    fn visit_any(&mut self, _component: &Component, path: &mut Path<Tally>) -> VisitResult {
        let depth = path.depth();
        let current = path.current();
        let row = &mut self.rows[current.row];
        row.depth = depth;
        row.totals = current.totals;
        if let Ok((current, parent)) = path.current_and_parent_mut() {
            parent.totals.add(current.totals);
        }
        Ok(())
    }
}

/// Totals of every component of `root` down to `max_depth`
///
/// Components below `max_depth` are not crawled, so their files are not
/// counted either.
///
/// # Errors
/// When the crawl fails
pub fn collect_stats(root: &Component, max_depth: DepthLimit) -> Result<StatsReport, VisitError> {
    let mut crawler = PathAwareCrawler::new(StatsCollector {
        max_depth,
        rows: Vec::new(),
    });
    crawler.visit(root)?;
    let rows = crawler.into_visitor().rows;
    Ok(StatsReport {
        totals: rows.first().map(|row| row.totals).unwrap_or_default(),
        components: rows,
    })
}

/// Identity and attributes of the component with ref `reference`
///
/// # Errors
/// When no component has this ref
pub fn describe(tree: &LoadedTree, reference: u32) -> anyhow::Result<String> {
    let component = tree.holder().component_by_ref(reference)?;
    let mut out = String::new();
    writeln!(out, "{component}")?;
    writeln!(out, "name: {}", component.name())?;
    writeln!(out, "uuid: {}", component.uuid()?)?;
    let attributes = component.report_attributes()?;
    for (label, value) in [
        ("version", attributes.version()),
        ("path", attributes.path()),
        ("scm path", attributes.scm_path()),
        ("description", component.description()),
    ] {
        if let Some(value) = value {
            writeln!(out, "{label}: {value}")?;
        }
    }
    if let Ok(file) = component.file_attributes() {
        writeln!(out, "lines: {}", file.lines())?;
        writeln!(out, "unit test: {}", file.is_unit_test())?;
        if let Some(language) = file.language_key() {
            writeln!(out, "language: {language}")?;
        }
    }
    writeln!(out, "children: {}", component.children().len())?;
    Ok(out)
}
