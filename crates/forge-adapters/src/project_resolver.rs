//! Project descriptor resolution.
//!
//! A forge project is marked by an INI descriptor (`forge.ini` by default) at
//! its root:
//!
//! ```ini
//! [project]
//! project_name = my-app   ; optional, defaults to the directory name
//! package_name = my_app
//! script_name  = my-app
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use serde::Deserialize;
use tracing::{debug, instrument};

use forge_core::application::ports::ProjectResolver;
use forge_core::domain::{ProjectContext, ProjectError};

pub const DEFAULT_DESCRIPTOR: &str = "forge.ini";

#[derive(Debug, Deserialize)]
struct ProjectSection {
    project_name: Option<String>,
    package_name: String,
    script_name: String,
}

/// Reads the `[project]` section of an INI descriptor.
#[derive(Debug, Clone)]
pub struct IniProjectResolver {
    descriptor: PathBuf,
}

impl IniProjectResolver {
    /// `descriptor` is resolved against the directory passed to
    /// [`ProjectResolver::resolve`]; an absolute path is used as-is.
    pub fn new(descriptor: impl Into<PathBuf>) -> Self {
        Self {
            descriptor: descriptor.into(),
        }
    }

    fn parse(&self, path: &Path, raw: &str) -> Result<ProjectSection, ProjectError> {
        let malformed = |reason: String| ProjectError::DescriptorMalformed {
            path: path.to_path_buf(),
            reason,
        };

        let mut section: ProjectSection = Config::builder()
            .add_source(File::from_str(raw, FileFormat::Ini))
            .build()
            .and_then(|cfg| cfg.get("project"))
            .map_err(|e| malformed(e.to_string()))?;

        section.package_name = strip_inline_comment(&section.package_name).to_string();
        section.script_name = strip_inline_comment(&section.script_name).to_string();
        section.project_name = section
            .project_name
            .map(|name| strip_inline_comment(&name).to_string());

        for (key, value) in [
            ("package_name", &section.package_name),
            ("script_name", &section.script_name),
        ] {
            if value.trim().is_empty() {
                return Err(malformed(format!("'{key}' must not be empty")));
            }
        }

        Ok(section)
    }
}

/// Drop a trailing `; ...` or `# ...` comment. The marker must open the
/// value or follow whitespace, so `a;b` stays intact.
fn strip_inline_comment(value: &str) -> &str {
    let end = value
        .char_indices()
        .find(|&(i, c)| {
            (c == ';' || c == '#') && (i == 0 || value[..i].ends_with(char::is_whitespace))
        })
        .map_or(value.len(), |(i, _)| i);
    value[..end].trim()
}

impl Default for IniProjectResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DESCRIPTOR)
    }
}

impl ProjectResolver for IniProjectResolver {
    #[instrument(skip(self), fields(descriptor = %self.descriptor.display()))]
    fn resolve(&self, dir: &Path) -> Result<ProjectContext, ProjectError> {
        let path = dir.join(&self.descriptor);
        if !path.is_file() {
            return Err(ProjectError::DescriptorNotFound { path });
        }

        let raw = fs::read_to_string(&path).map_err(|e: io::Error| {
            ProjectError::DescriptorUnreadable {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;

        let section = self.parse(&path, &raw)?;
        debug!(
            package = %section.package_name,
            script = %section.script_name,
            "Descriptor parsed"
        );

        let root = path.parent().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
        let project = ProjectContext::new(
            root,
            section.package_name.trim(),
            section.script_name.trim(),
        );

        Ok(match section.project_name {
            Some(name) if !name.trim().is_empty() => project.with_project_name(name.trim()),
            _ => project,
        })
    }
}
