//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "forge",
    bin_name = "forge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Project scaffolding with project-local generators",
    long_about = "Forge creates new projects and generates code inside them, \
                  using built-in generators and generators shipped with the project.",
    after_help = "EXAMPLES:\n\
        \x20 forge new my-app\n\
        \x20 forge generate controller users\n\
        \x20 forge list --format json\n\
        \x20 forge run -- --port 8080",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 forge new my-app\n\
            \x20 forge new ../services/billing --skip-install"
    )]
    New(NewArgs),

    /// Run a generator inside the current project.
    #[command(
        visible_alias = "g",
        about = "Run a generator",
        after_help = "EXAMPLES:\n\
            \x20 forge generate controller users\n\
            \x20 forge g model invoice --force"
    )]
    Generate(GenerateArgs),

    /// List the generators available in the current project.
    #[command(
        visible_alias = "ls",
        about = "List available generators",
        after_help = "EXAMPLES:\n\
            \x20 forge list\n\
            \x20 forge list --format json"
    )]
    List(ListArgs),

    /// Run the project's entry-point script.
    #[command(
        about = "Run the project's script",
        after_help = "EXAMPLES:\n\
            \x20 forge run\n\
            \x20 forge run -- --port 8080"
    )]
    Run(RunArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `forge new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project directory.  Its final component is the project name.
    #[arg(value_name = "PATH", help = "Directory to create the project in")]
    pub path: PathBuf,

    /// Do not run the install command after generating.
    #[arg(long = "skip-install", help = "Skip running the install command")]
    pub skip_install: bool,

    /// Generate into an existing, non-empty directory (destructive).
    #[arg(long = "force", help = "Overwrite files in an existing directory")]
    pub force: bool,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `forge generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Generator to run (see `forge list`).
    #[arg(value_name = "GENERATOR", help = "Generator name")]
    pub generator: String,

    /// Name of the thing to generate, e.g. a controller name.
    #[arg(value_name = "NAME", help = "Name passed to the generator")]
    pub name: String,

    /// Overwrite files that already exist.
    #[arg(long = "force", help = "Overwrite existing files")]
    pub force: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `forge list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Table,
    List,
    Json,
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Arguments for `forge run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Arguments forwarded to the script.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "Arguments passed through to the script"
    )]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_alias_parses() {
        let cli = Cli::try_parse_from(["forge", "g", "controller", "users", "--force"]).unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.generator, "controller");
                assert_eq!(args.name, "users");
                assert!(args.force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn run_forwards_hyphenated_args() {
        let cli = Cli::try_parse_from(["forge", "run", "--port", "8080"]).unwrap();
        match cli.command {
            Commands::Run(args) => assert_eq!(args.args, vec!["--port", "8080"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["forge", "-q", "-v", "list"]).is_err());
    }

    #[test]
    fn list_format_defaults_to_table() {
        let cli = Cli::try_parse_from(["forge", "ls"]).unwrap();
        match cli.command {
            Commands::List(args) => assert_eq!(args.format, ListFormat::Table),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
