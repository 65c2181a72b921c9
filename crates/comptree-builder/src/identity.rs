//! Key and uuid generation for report components

use std::collections::HashMap;

/// Generates the key of a component from the key of its closest module
pub trait KeyGenerator {
    /// Key for the component at `path` under the module keyed `module_key`;
    /// `path` is `None` for projects and modules
    fn generate_key(&self, module_key: &str, path: Option<&str>) -> String;
}

impl<F> KeyGenerator for F
where
    F: Fn(&str, Option<&str>) -> String,
{
    fn generate_key(&self, module_key: &str, path: Option<&str>) -> String {
        self(module_key, path)
    }
}

/// `module_key` alone, or `module_key:path` when a path is given
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectiveKeyGenerator;

impl KeyGenerator for EffectiveKeyGenerator {
    fn generate_key(&self, module_key: &str, path: Option<&str>) -> String {
        match path {
            Some(path) if !path.is_empty() => format!("{module_key}:{path}"),
            _ => module_key.to_string(),
        }
    }
}

/// Supplies the uuid of a component from its generated key
pub trait UuidSupplier {
    /// Uuid for `key`
    fn uuid_for(&mut self, key: &str) -> String;
}

impl<F> UuidSupplier for F
where
    F: FnMut(&str) -> String,
{
    fn uuid_for(&mut self, key: &str) -> String {
        self(key)
    }
}

/// Reuses the uuid already known for a key, issuing a random one otherwise
///
/// Issued uuids are remembered, so a key always gets the same uuid.
#[derive(Debug, Clone, Default)]
pub struct ExistingUuidSupplier {
    known: HashMap<String, String>,
}

impl ExistingUuidSupplier {
    /// Supplier knowing no key
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With the uuid of `key` known
    #[must_use]
    pub fn with_known(mut self, key: impl Into<String>, uuid: impl Into<String>) -> Self {
        self.known.insert(key.into(), uuid.into());
        self
    }
}

impl FromIterator<(String, String)> for ExistingUuidSupplier {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            known: iter.into_iter().collect(),
        }
    }
}

impl UuidSupplier for ExistingUuidSupplier {
    fn uuid_for(&mut self, key: &str) -> String {
        self.known
            .entry(key.to_string())
            .or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone()
    }
}
