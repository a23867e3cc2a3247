//! Implementation of the `forge list` command.

use serde::Serialize;
use tracing::instrument;

use forge_core::domain::GeneratorCatalog;

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// One catalog entry as printed by `--format json`.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct GeneratorEntry<'a> {
    name: &'a str,
    description: &'a str,
    origin: &'static str,
}

#[instrument(skip_all, fields(format = ?args.format))]
pub fn execute(
    args: ListArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let working_dir = std::env::current_dir().with_cli_context(|| "reading current directory")?;
    let ctx = super::build_context(&config, working_dir)?;

    ctx.load_generators()?;
    let catalog = ctx.generators()?;

    match args.format {
        ListFormat::Table => {
            output.header("Available Generators:")?;
            let width = catalog.iter().map(|g| g.name().len()).max().unwrap_or(0);
            for generator in catalog.iter() {
                output.print(&format!(
                    "  {:<width$}  {}  {}",
                    generator.name(),
                    generator.description(),
                    output.dim(&format!("({})", generator.origin())),
                ))?;
            }
        }
        ListFormat::List => {
            for name in catalog.names() {
                output.data(&name)?;
            }
        }
        // JSON goes through `data` so it stays parseable in pipes and --quiet.
        ListFormat::Json => output.data(&to_json(&catalog)?)?,
    }

    Ok(())
}

fn to_json(catalog: &GeneratorCatalog) -> CliResult<String> {
    let entries: Vec<GeneratorEntry<'_>> = catalog
        .iter()
        .map(|g| GeneratorEntry {
            name: g.name(),
            description: g.description(),
            origin: g.origin(),
        })
        .collect();

    serde_json::to_string_pretty(&entries).map_err(|e| CliError::IoError {
        message: "serializing generator list".into(),
        source: e.into(),
    })
}
