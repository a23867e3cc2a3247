//! Implementation of the `forge generate` command.

use tracing::{debug, instrument};

use forge_core::{application::GenerateFiles, domain::RenderRequest};

use crate::{
    cli::{GenerateArgs, GlobalArgs},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(generator = %args.generator, name = %args.name))]
pub fn execute(
    args: GenerateArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let working_dir = std::env::current_dir().with_cli_context(|| "reading current directory")?;
    let ctx = super::build_context(&config, working_dir)?;

    let project = ctx.require_project()?;
    ctx.load_generators()?;
    let generator = ctx.generator(&args.generator)?;
    debug!(origin = generator.origin(), "Generator selected");

    if args.force {
        output.warning("Existing files will be overwritten")?;
    }

    let name = normalize_name(&args.name);
    let variables = super::project_variables(&project).with("name", name.as_str());

    ctx.enqueue(GenerateFiles::new(
        generator,
        RenderRequest::new(project.project_root(), variables).overwrite(args.force),
    ))?;
    ctx.execute()?;

    output.success(&format!("Generated {} '{}'", args.generator, name))?;
    Ok(())
}

/// Names become snake_case identifiers: `User-Accounts` → `user_accounts`.
fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace('-', "_")
}
