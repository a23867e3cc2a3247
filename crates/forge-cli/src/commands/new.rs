//! Implementation of the `forge new` command.

use std::path::Path;

use tracing::{debug, instrument};

use forge_adapters::project_generator;
use forge_core::{
    application::{GenerateFiles, RunShell, ports::Invocation},
    domain::{RenderRequest, RenderVariables},
    error::ForgeError,
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `forge new` command.
///
/// 1. Derive and validate the project name from the target path
/// 2. Refuse a non-empty target unless `--force`
/// 3. Enqueue the skeleton render, then the install command
/// 4. Execute the queue and print next steps
#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let project_name = project_name_from_path(&args.path)?;
    validate_project_name(&project_name)?;
    let package_name = package_name_for(&project_name);

    if !args.force && !is_empty_target(&args.path)? {
        return Err(CliError::ProjectExists { path: args.path });
    }

    let working_dir = std::env::current_dir().with_cli_context(|| "reading current directory")?;
    let ctx = super::build_context(&config, working_dir)?;

    let variables = RenderVariables::new()
        .with("project_name", project_name.as_str())
        .with("package_name", package_name.as_str())
        .with("script_name", project_name.as_str());
    debug!(%project_name, %package_name, "Project identity derived");

    ctx.enqueue(GenerateFiles::new(
        project_generator(),
        RenderRequest::new(&args.path, variables).overwrite(args.force),
    ))?;

    if !args.skip_install {
        let install = Invocation::from_parts(ctx.settings().install_command.iter().cloned())
            .ok_or_else(|| ForgeError::Configuration {
                message: "install command is empty".into(),
            })?
            .cwd(&args.path);
        ctx.enqueue(RunShell::new(install))?;
    }

    ctx.execute()?;

    output.success(&format!("Project '{project_name}' created!"))?;
    if args.skip_install {
        output.info(&format!(
            "Install skipped; run `{}` inside the project before `forge run`",
            ctx.settings().install_hint()
        ))?;
    }

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", args.path.display()))?;
        output.print("  forge generate controller <name>")?;
        output.print("  forge run")?;
    }

    Ok(())
}

fn project_name_from_path(path: &Path) -> CliResult<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| CliError::InvalidProjectName {
            name: path.display().to_string(),
            reason: "cannot extract a project name from the path".into(),
        })
}

fn validate_project_name(name: &str) -> CliResult<()> {
    let invalid = |reason: &str| {
        Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        })
    };

    match name.chars().next() {
        None => return invalid("name cannot be empty"),
        Some(c) if !c.is_ascii_alphabetic() => return invalid("name must start with a letter"),
        _ => {}
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return invalid("only letters, digits, '-' and '_' are allowed");
    }
    Ok(())
}

/// `my-app` becomes the importable package `my_app`.
fn package_name_for(project_name: &str) -> String {
    project_name.replace('-', "_")
}

fn is_empty_target(path: &Path) -> CliResult<bool> {
    if !path.exists() {
        return Ok(true);
    }
    if !path.is_dir() {
        return Ok(false);
    }
    let mut entries =
        std::fs::read_dir(path).with_cli_context(|| format!("reading {}", path.display()))?;
    Ok(entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn project_name_is_last_component() {
        assert_eq!(
            project_name_from_path(Path::new("../services/billing-api")).unwrap(),
            "billing-api"
        );
        assert!(project_name_from_path(Path::new("..")).is_err());
    }

    #[test]
    fn validates_project_names() {
        assert!(validate_project_name("my-app").is_ok());
        assert!(validate_project_name("app_2").is_ok());

        for bad in ["", "2fast", "-app", "my app", "caf\u{e9}"] {
            let err = validate_project_name(bad).unwrap_err();
            assert_eq!(err.exit_code(), Some(2), "{bad:?}");
        }
    }

    #[test]
    fn package_name_replaces_hyphens() {
        assert_eq!(package_name_for("my-cool-app"), "my_cool_app");
        assert_eq!(package_name_for("plain"), "plain");
    }

    #[test]
    fn empty_target_detection() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("fresh");
        assert!(is_empty_target(&dir).unwrap());

        std::fs::create_dir(&dir).unwrap();
        assert!(is_empty_target(&dir).unwrap());

        std::fs::write(dir.join("README.md"), "hi").unwrap();
        assert!(!is_empty_target(&dir).unwrap());

        let file = temp.path().join("file.txt");
        std::fs::write(&file, "").unwrap();
        assert!(!is_empty_target(&file).unwrap());
    }
}
