//! Subcommand handlers.
//!
//! Each handler turns parsed arguments into work on a [`SharedContext`]:
//! it asks the context for what it needs, enqueues commands, and executes.

use std::path::PathBuf;

use forge_adapters::{
    FileRenderer, IniProjectResolver, LocalGeneratorLoader, SystemProcessRunner, builtin_catalog,
};
use forge_core::{application::SharedContext, domain::RenderVariables, domain::ProjectContext};

use crate::{config::AppConfig, error::CliResult};

pub mod generate;
pub mod list;
pub mod new;
pub mod run;

/// Wire the production adapters into a context rooted at `working_dir`.
pub fn build_context(config: &AppConfig, working_dir: PathBuf) -> CliResult<SharedContext> {
    let ctx = SharedContext::builder()
        .working_dir(working_dir)
        .resolver(IniProjectResolver::new(&config.project.descriptor))
        .runner(SystemProcessRunner)
        .discovery(LocalGeneratorLoader::new(&config.generators.dir))
        .renderer(FileRenderer::new())
        .builtin_generators(builtin_catalog())
        .settings(config.context_settings())
        .build()?;
    Ok(ctx)
}

/// Variables every generator sees inside a resolved project.
pub(crate) fn project_variables(project: &ProjectContext) -> RenderVariables {
    RenderVariables::new()
        .with("project_name", project.project_name())
        .with("package_name", project.package_name())
        .with("script_name", project.script_name())
}
