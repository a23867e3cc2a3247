//! Application layer errors.
//!
//! These errors represent failures in orchestration, not in the project
//! itself. Project validation errors are [`ProjectError`](crate::domain::ProjectError).

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The installation probe failed.
    #[error("Project is not installed: '{script}' could not be run")]
    NotInstalled { script: String, install_hint: String },

    /// No generator with that name in the catalog.
    #[error("Generator '{name}' not found")]
    GeneratorNotFound { name: String, available: Vec<String> },

    /// Rendering would overwrite an existing file.
    #[error("Refusing to overwrite existing file {path}")]
    DestinationExists { path: PathBuf },

    /// A generator tried to write outside its destination.
    #[error("Generator '{generator}' produced a path outside the destination: {path}")]
    PathEscapesDestination { generator: String, path: String },

    /// A queued shell step exited non-zero.
    #[error("Command `{command}` failed with {}", status_text(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// A process could not be started at all.
    #[error("Failed to start `{command}`: {reason}")]
    SpawnFailed { command: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared context state is unusable after a panic in another holder.
    #[error("Shared context lock poisoned")]
    ContextLockPoisoned,

    /// Port/Adapter not configured.
    #[error("Required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },
}

fn status_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "no exit status (terminated by signal)".into(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotInstalled { install_hint, .. } => {
                vec![format!("To install run: $ {install_hint}")]
            }
            Self::GeneratorNotFound { available, .. } => {
                let mut lines = vec!["Available generators:".to_string()];
                lines.extend(available.iter().map(|name| format!("  • {name}")));
                lines.push("List them with origins: forge list".into());
                lines
            }
            Self::DestinationExists { path } => vec![
                format!("File already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("`{command}` reported an error"),
                "Check the command output above for details".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotInstalled { .. } => ErrorCategory::Installation,
            Self::GeneratorNotFound { .. } => ErrorCategory::NotFound,
            Self::DestinationExists { .. } | Self::PathEscapesDestination { .. } => {
                ErrorCategory::UserError
            }
            Self::CommandFailed { .. } => ErrorCategory::ExternalCommand,
            Self::SpawnFailed { .. }
            | Self::FilesystemError { .. }
            | Self::ContextLockPoisoned
            | Self::AdapterNotConfigured { .. } => ErrorCategory::Internal,
        }
    }
}
