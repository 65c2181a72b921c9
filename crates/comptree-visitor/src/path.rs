//! Accumulator stack exposed to path-aware visitors
//!
//! Provides [`Path`], one element per component from the crawled root down to
//! the component being visited.

use crate::error::PathError;

/// Elements of the components from the root to the current one
///
/// A `Path` is never empty: it always holds at least the root element, which
/// is the current element when the root itself is visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<T> {
    root: T,
    /// Elements below the root, shallowest first
    descendants: Vec<T>,
}

impl<T> Path<T> {
    fn new(root: T) -> Self {
        Self {
            root,
            descendants: Vec::new(),
        }
    }

    /// Element of the component being visited
    #[inline]
    #[must_use]
    pub fn current(&self) -> &T {
        self.descendants.last().unwrap_or(&self.root)
    }

    /// Element of the component being visited, mutably
    #[inline]
    pub fn current_mut(&mut self) -> &mut T {
        match self.descendants.last_mut() {
            Some(element) => element,
            None => &mut self.root,
        }
    }

    /// Element of the direct ancestor of the current component
    ///
    /// # Errors
    /// `NoSuchElement` when the current component is the root
    pub fn parent(&self) -> Result<&T, PathError> {
        match self.descendants.len() {
            0 => Err(PathError::NoSuchElement("root has no parent")),
            1 => Ok(&self.root),
            n => Ok(&self.descendants[n - 2]),
        }
    }

    /// Element of the direct ancestor of the current component, mutably
    ///
    /// # Errors
    /// `NoSuchElement` when the current component is the root
    pub fn parent_mut(&mut self) -> Result<&mut T, PathError> {
        self.current_and_parent_mut().map(|(_, parent)| parent)
    }

    /// Current element together with the parent one, for folding a result upwards
    ///
    /// # Errors
    /// `NoSuchElement` when the current component is the root
    pub fn current_and_parent_mut(&mut self) -> Result<(&T, &mut T), PathError> {
        match self.descendants.split_last_mut() {
            None => Err(PathError::NoSuchElement("root has no parent")),
            Some((current, [])) => Ok((&*current, &mut self.root)),
            Some((current, [.., parent])) => Ok((&*current, parent)),
        }
    }

    /// Element of the crawled root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &T {
        &self.root
    }

    /// Element of the crawled root, mutably
    #[inline]
    pub fn root_mut(&mut self) -> &mut T {
        &mut self.root
    }

    /// Whether the current component is the crawled root
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.descendants.is_empty()
    }

    /// Number of ancestors of the current component
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.descendants.len()
    }

    /// Elements from the current component up to the root
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.descendants
            .iter()
            .rev()
            .chain(std::iter::once(&self.root))
    }
}

/// Stack of elements maintained by a crawler around its recursive walk
#[derive(Debug)]
pub(crate) struct PathStack<T> {
    path: Option<Path<T>>,
}

impl<T> PathStack<T> {
    pub(crate) fn new() -> Self {
        Self { path: None }
    }

    pub(crate) fn push(&mut self, element: T) {
        match &mut self.path {
            Some(path) => path.descendants.push(element),
            None => self.path = Some(Path::new(element)),
        }
    }

    pub(crate) fn pop(&mut self) {
        if let Some(path) = &mut self.path {
            if path.descendants.pop().is_none() {
                self.path = None;
            }
        }
    }

    pub(crate) fn path_mut(&mut self) -> Option<&mut Path<T>> {
        self.path.as_mut()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.path.is_none()
    }
}
