//! Generator descriptors and the name-keyed catalog.
//!
//! ## Merge policy
//!
//! [`GeneratorCatalog::merge_local`] combines the built-in catalog with the
//! generators discovered in a project. When both define the same name the
//! **built-in wins**; the local generator is shadowed and reported back to the
//! caller so it can be logged.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One file of a compiled-in generator. Both fields may contain
/// `{{variable}}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedFile {
    pub path: &'static str,
    pub contents: &'static str,
}

impl EmbeddedFile {
    pub const fn new(path: &'static str, contents: &'static str) -> Self {
        Self { path, contents }
    }
}

/// Where a generator's files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorSource {
    /// Compiled into the binary.
    Embedded(&'static [EmbeddedFile]),
    /// A template directory inside the project.
    Directory(PathBuf),
}

/// Identifies one generator and how to invoke it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorDescriptor {
    name: String,
    description: String,
    source: GeneratorSource,
}

impl GeneratorDescriptor {
    pub fn builtin(
        name: impl Into<String>,
        description: impl Into<String>,
        files: &'static [EmbeddedFile],
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            source: GeneratorSource::Embedded(files),
        }
    }

    pub fn local(
        name: impl Into<String>,
        description: impl Into<String>,
        template_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            source: GeneratorSource::Directory(template_dir.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source(&self) -> &GeneratorSource {
        &self.source
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.source, GeneratorSource::Embedded(_))
    }

    /// Template directory of a local generator.
    pub fn template_dir(&self) -> Option<&Path> {
        match &self.source {
            GeneratorSource::Directory(dir) => Some(dir),
            GeneratorSource::Embedded(_) => None,
        }
    }

    /// `"builtin"` or `"local"`, for listings.
    pub fn origin(&self) -> &'static str {
        if self.is_builtin() { "builtin" } else { "local" }
    }
}

/// Generators keyed by name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorCatalog {
    entries: BTreeMap<String, GeneratorDescriptor>,
}

impl GeneratorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor under its own name, returning any replaced entry.
    pub fn insert(&mut self, descriptor: GeneratorDescriptor) -> Option<GeneratorDescriptor> {
        self.entries.insert(descriptor.name.clone(), descriptor)
    }

    pub fn get(&self, name: &str) -> Option<&GeneratorDescriptor> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratorDescriptor> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge locally discovered generators into `self` (the built-ins).
    ///
    /// Returns the merged catalog and the names of local generators that were
    /// shadowed by a built-in of the same name.
    pub fn merge_local(self, local: GeneratorCatalog) -> (GeneratorCatalog, Vec<String>) {
        let mut merged = local;
        let mut shadowed = Vec::new();

        for (name, builtin) in self.entries {
            if merged.entries.insert(name.clone(), builtin).is_some() {
                shadowed.push(name);
            }
        }

        (merged, shadowed)
    }
}

impl FromIterator<GeneratorDescriptor> for GeneratorCatalog {
    fn from_iter<I: IntoIterator<Item = GeneratorDescriptor>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for descriptor in iter {
            catalog.insert(descriptor);
        }
        catalog
    }
}
