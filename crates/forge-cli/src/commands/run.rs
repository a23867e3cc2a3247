//! Implementation of the `forge run` command.

use tracing::instrument;

use forge_core::application::RunShell;

use crate::{
    cli::{GlobalArgs, RunArgs},
    config::AppConfig,
    error::{CliResult, IntoCli},
};

/// Verify the installation once, then run the project's script with the
/// forwarded arguments and inherited output.
#[instrument(skip_all, fields(args = args.args.len()))]
pub fn execute(args: RunArgs, _global: GlobalArgs, config: AppConfig) -> CliResult<()> {
    let working_dir = std::env::current_dir().with_cli_context(|| "reading current directory")?;
    let ctx = super::build_context(&config, working_dir)?;

    ctx.require_installed()?;
    let project = ctx.require_project()?;

    ctx.enqueue(RunShell::new(ctx.script_invocation(&project, args.args)))?;
    ctx.execute()?;
    Ok(())
}
