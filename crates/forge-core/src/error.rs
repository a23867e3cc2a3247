//! Unified error handling for Forge Core.
//!
//! [`ForgeError`] wraps domain and application errors. Every error maps to an
//! [`ErrorCategory`], and the category decides the process exit code. A
//! category without an exit code is an unclassified failure: the CLI treats
//! it as a bug and produces a diagnostic report.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::ProjectError;

/// Root error type for Forge Core operations.
#[derive(Debug, Error, Clone)]
pub enum ForgeError {
    /// The working directory is not a valid project.
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Errors from the application layer (orchestration failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ForgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Project(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in forge".into()],
        }
    }

    /// Get error category for display and exit-code purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Project(_) => ErrorCategory::Project,
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code declared by this error's kind, or `None` when unclassified.
    pub fn exit_code(&self) -> Option<u8> {
        self.category().exit_code()
    }
}

/// Error kinds, each carrying the exit code the process terminates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Descriptor missing, unreadable, malformed, or package directory absent.
    Project,
    /// The project's entry-point script could not be run.
    Installation,
    /// Bad user input.
    UserError,
    /// A named resource (generator) does not exist.
    NotFound,
    /// Configuration could not be loaded or is inconsistent.
    Configuration,
    /// An external step exited with a non-zero status.
    ExternalCommand,
    /// Anything unexpected.
    Internal,
}

impl ErrorCategory {
    /// | Category         | Code |
    /// |------------------|------|
    /// | Project          |  1   |
    /// | Installation     |  1   |
    /// | User error       |  2   |
    /// | Not found        |  3   |
    /// | Configuration    |  4   |
    /// | External command |  5   |
    /// | Internal         | none |
    pub fn exit_code(self) -> Option<u8> {
        match self {
            Self::Project | Self::Installation => Some(1),
            Self::UserError => Some(2),
            Self::NotFound => Some(3),
            Self::Configuration => Some(4),
            Self::ExternalCommand => Some(5),
            Self::Internal => None,
        }
    }
}

/// Convenient result type alias.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Extension trait for turning foreign errors into internal errors with context.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> ForgeResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> ForgeResult<T> {
        self.map_err(|e| ForgeError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
