//! Project-local generator discovery.
//!
//! Scans a project for generators shipped alongside its code. Discovery only
//! catalogs what it finds; nothing inside a generator directory is executed.
//!
//! # Directory layout expected
//!
//! ```text
//! <project_root>/
//! └── lib/generators/
//!     ├── widget/
//!     │   ├── generator.toml      ← manifest (required)
//!     │   └── template/           ← files to render (required)
//!     │       └── {{package_name}}/widgets/{{name}}.py
//!     └── report/
//!         ├── generator.toml
//!         └── template/
//! ```
//!
//! # `generator.toml` format
//!
//! ```toml
//! [generator]
//! name        = "widget"             # optional; defaults to the directory name
//! description = "Creates a widget."  # optional
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use forge_core::application::ApplicationError;
use forge_core::application::ports::GeneratorDiscovery;
use forge_core::domain::{GeneratorCatalog, GeneratorDescriptor};
use forge_core::error::ForgeResult;

/// Default generator directory, relative to the project root.
pub const DEFAULT_GENERATORS_DIR: &str = "lib/generators";

const MANIFEST_FILE: &str = "generator.toml";
const TEMPLATE_DIR: &str = "template";

// ── Manifest types ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
struct GeneratorManifest {
    #[serde(default)]
    generator: GeneratorSection,
}

#[derive(Debug, Deserialize, Default)]
struct GeneratorSection {
    name: Option<String>,
    description: Option<String>,
}

/// Why a generator directory was skipped.
#[derive(Debug, Error)]
enum LoadError {
    #[error("missing generator.toml")]
    MissingManifest,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing 'template' directory")]
    MissingTemplate,

    #[error("invalid generator name '{0}': use letters, digits, '-' and '_'")]
    InvalidName(String),
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Discovers generators under `<project_root>/<generators_dir>`.
///
/// Each immediate subdirectory with a valid manifest and a `template/`
/// directory is one generator. Invalid subdirectories emit a `WARN` log and
/// are skipped. Subdirectories are visited in name order; when two declare the
/// same generator name the first one wins.
#[derive(Debug, Clone)]
pub struct LocalGeneratorLoader {
    generators_dir: PathBuf,
}

impl LocalGeneratorLoader {
    pub fn new(generators_dir: impl Into<PathBuf>) -> Self {
        Self {
            generators_dir: generators_dir.into(),
        }
    }

    fn load_one(&self, dir: &Path) -> Result<GeneratorDescriptor, LoadError> {
        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(LoadError::MissingManifest);
        }

        let raw = fs::read_to_string(&manifest_path).map_err(|source| LoadError::Read {
            path: manifest_path.clone(),
            source,
        })?;
        let manifest: GeneratorManifest =
            toml::from_str(&raw).map_err(|source| LoadError::Parse {
                path: manifest_path.clone(),
                source,
            })?;

        let template_dir = dir.join(TEMPLATE_DIR);
        if !template_dir.is_dir() {
            return Err(LoadError::MissingTemplate);
        }

        let name = match manifest.generator.name {
            Some(name) => name.trim().to_string(),
            None => dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        if !is_valid_name(&name) {
            return Err(LoadError::InvalidName(name));
        }

        Ok(GeneratorDescriptor::local(
            name,
            manifest.generator.description.unwrap_or_default(),
            template_dir,
        ))
    }
}

impl Default for LocalGeneratorLoader {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATORS_DIR)
    }
}

impl GeneratorDiscovery for LocalGeneratorLoader {
    #[instrument(skip(self), fields(dir = %self.generators_dir.display()))]
    fn discover(&self, project_root: &Path) -> ForgeResult<GeneratorCatalog> {
        let root = project_root.join(&self.generators_dir);
        if !root.is_dir() {
            debug!(path = %root.display(), "No generator directory");
            return Ok(GeneratorCatalog::new());
        }

        let filesystem_error = |reason: String| ApplicationError::FilesystemError {
            path: root.clone(),
            reason,
        };

        let mut dirs = Vec::new();
        for entry in fs::read_dir(&root).map_err(|e| filesystem_error(e.to_string()))? {
            let path = entry.map_err(|e| filesystem_error(e.to_string()))?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();

        let mut catalog = GeneratorCatalog::new();
        for dir in dirs {
            match self.load_one(&dir) {
                Ok(descriptor) if catalog.contains(descriptor.name()) => {
                    warn!(
                        dir = %dir.display(),
                        generator = %descriptor.name(),
                        "Skipping duplicate local generator"
                    );
                }
                Ok(descriptor) => {
                    debug!(generator = %descriptor.name(), "Discovered local generator");
                    catalog.insert(descriptor);
                }
                Err(e) => {
                    warn!(
                        dir = %dir.display(),
                        error = %e,
                        "Skipping generator directory due to load error"
                    );
                }
            }
        }

        debug!(count = catalog.len(), "Finished discovering generators");
        Ok(catalog)
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(root: &Path, dir: &str, manifest: &str) -> PathBuf {
        let gen_dir = root.join(DEFAULT_GENERATORS_DIR).join(dir);
        fs::create_dir_all(gen_dir.join(TEMPLATE_DIR)).unwrap();
        fs::write(gen_dir.join(MANIFEST_FILE), manifest).unwrap();
        gen_dir
    }

    #[test]
    fn missing_generator_dir_yields_empty_catalog() {
        let temp = TempDir::new().unwrap();

        let catalog = LocalGeneratorLoader::default()
            .discover(temp.path())
            .unwrap();

        assert!(catalog.is_empty());
    }

    #[test]
    fn discovers_generators_with_manifest_defaults() {
        let temp = TempDir::new().unwrap();
        let widget = seed(temp.path(), "widget", "");
        seed(
            temp.path(),
            "report",
            "[generator]\nname = \"monthly-report\"\ndescription = \"Reports\"\n",
        );

        let catalog = LocalGeneratorLoader::default()
            .discover(temp.path())
            .unwrap();

        assert_eq!(catalog.names(), vec!["monthly-report", "widget"]);
        let descriptor = catalog.get("widget").unwrap();
        assert!(!descriptor.is_builtin());
        assert_eq!(descriptor.template_dir(), Some(widget.join(TEMPLATE_DIR).as_path()));
        assert_eq!(catalog.get("monthly-report").unwrap().description(), "Reports");
    }

    #[test]
    fn continues_when_one_generator_is_invalid() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), "good", "");
        seed(temp.path(), "broken", "[generator\nname = ");
        let no_template = temp.path().join(DEFAULT_GENERATORS_DIR).join("no-template");
        fs::create_dir_all(&no_template).unwrap();
        fs::write(no_template.join(MANIFEST_FILE), "").unwrap();
        fs::create_dir_all(temp.path().join(DEFAULT_GENERATORS_DIR).join("no-manifest"))
            .unwrap();

        let catalog = LocalGeneratorLoader::default()
            .discover(temp.path())
            .unwrap();

        assert_eq!(catalog.names(), vec!["good"]);
    }

    #[test]
    fn first_directory_wins_on_duplicate_names() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), "a-widget", "[generator]\nname = \"widget\"\ndescription = \"first\"\n");
        seed(temp.path(), "b-widget", "[generator]\nname = \"widget\"\ndescription = \"second\"\n");

        let catalog = LocalGeneratorLoader::default()
            .discover(temp.path())
            .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("widget").unwrap().description(), "first");
    }

    #[test]
    fn rejects_names_with_path_separators() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), "sneaky", "[generator]\nname = \"../up\"\n");

        let catalog = LocalGeneratorLoader::default()
            .discover(temp.path())
            .unwrap();

        assert!(catalog.is_empty());
    }

    #[test]
    fn ignores_plain_files_in_generator_dir() {
        let temp = TempDir::new().unwrap();
        let gen_root = temp.path().join(DEFAULT_GENERATORS_DIR);
        fs::create_dir_all(&gen_root).unwrap();
        fs::write(gen_root.join(".gitkeep"), "").unwrap();

        let catalog = LocalGeneratorLoader::default()
            .discover(temp.path())
            .unwrap();

        assert!(catalog.is_empty());
    }
}
