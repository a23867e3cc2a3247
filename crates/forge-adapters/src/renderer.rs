//! Placeholder-substituting renderer that writes straight to disk.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use forge_core::{
    application::{ApplicationError, ports::GeneratorRenderer},
    domain::{GeneratorDescriptor, GeneratorSource, RenderRequest, RenderVariables},
    error::{ForgeError, ForgeResult},
};

/// One entry of the write plan, relative path already rendered.
#[derive(Debug)]
enum Planned {
    Dir(PathBuf),
    File { path: PathBuf, contents: Vec<u8> },
}

/// Renders generator files into the request's destination.
///
/// Both paths and contents have `{{variable}}` placeholders substituted.
/// Non-UTF-8 files from a template directory are copied verbatim. The whole
/// plan is computed and checked before anything is written, so a conflict
/// leaves the destination untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRenderer;

impl FileRenderer {
    pub fn new() -> Self {
        Self
    }

    fn plan(
        &self,
        generator: &GeneratorDescriptor,
        vars: &RenderVariables,
    ) -> ForgeResult<Vec<Planned>> {
        let mut plan = Vec::new();

        match generator.source() {
            GeneratorSource::Embedded(files) => {
                for file in *files {
                    plan.push(Planned::File {
                        path: relative(generator, &vars.render(file.path))?,
                        contents: vars.render(file.contents).into_bytes(),
                    });
                }
            }
            GeneratorSource::Directory(dir) => {
                for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
                    let entry = entry.map_err(|e| {
                        let path = e.path().unwrap_or(dir.as_path()).to_path_buf();
                        map_io_error(&path, e.into(), "walk template directory")
                    })?;

                    let rel = entry.path().strip_prefix(dir).map_err(|_| {
                        ApplicationError::PathEscapesDestination {
                            generator: generator.name().to_string(),
                            path: entry.path().display().to_string(),
                        }
                    })?;
                    let path = relative(generator, &vars.render(&rel.to_string_lossy()))?;

                    if entry.file_type().is_dir() {
                        plan.push(Planned::Dir(path));
                    } else if entry.file_type().is_file() {
                        let raw = fs::read(entry.path())
                            .map_err(|e| map_io_error(entry.path(), e, "read template file"))?;
                        let contents = match String::from_utf8(raw) {
                            Ok(text) => vars.render(&text).into_bytes(),
                            Err(binary) => binary.into_bytes(),
                        };
                        plan.push(Planned::File { path, contents });
                    }
                }
            }
        }

        Ok(plan)
    }
}

impl GeneratorRenderer for FileRenderer {
    #[instrument(skip_all, fields(generator = %generator.name(), destination = %request.destination.display()))]
    fn render(
        &self,
        generator: &GeneratorDescriptor,
        request: &RenderRequest,
    ) -> ForgeResult<Vec<PathBuf>> {
        let plan = self.plan(generator, &request.variables)?;
        let root = &request.destination;

        if !request.overwrite {
            for entry in &plan {
                if let Planned::File { path, .. } = entry {
                    let target = root.join(path);
                    if target.exists() {
                        return Err(ApplicationError::DestinationExists { path: target }.into());
                    }
                }
            }
        }

        let mut written = Vec::new();
        for entry in plan {
            match entry {
                Planned::Dir(path) => {
                    let target = root.join(path);
                    fs::create_dir_all(&target)
                        .map_err(|e| map_io_error(&target, e, "create directory"))?;
                }
                Planned::File { path, contents } => {
                    let target = root.join(path);
                    if let Some(parent) = target.parent() {
                        fs::create_dir_all(parent)
                            .map_err(|e| map_io_error(parent, e, "create directory"))?;
                    }
                    fs::write(&target, contents)
                        .map_err(|e| map_io_error(&target, e, "write file"))?;
                    debug!(path = %target.display(), "Wrote file");
                    written.push(target);
                }
            }
        }

        Ok(written)
    }
}

/// Accept only plain relative paths that stay below the destination.
fn relative(generator: &GeneratorDescriptor, rendered: &str) -> ForgeResult<PathBuf> {
    let path = PathBuf::from(rendered);
    let plain = !rendered.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    if plain {
        Ok(path)
    } else {
        Err(ApplicationError::PathEscapesDestination {
            generator: generator.name().to_string(),
            path: rendered.to_string(),
        }
        .into())
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ForgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
