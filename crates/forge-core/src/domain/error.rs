//! Domain-level errors raised while resolving a project.

use std::path::PathBuf;
use thiserror::Error;

/// Why a directory is not a usable project.
///
/// All variants are project-validation failures: the process exits with 1 and
/// no diagnostic report is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectError {
    #[error("Not a forge project: no descriptor at {path}")]
    DescriptorNotFound { path: PathBuf },

    #[error("Not a forge project: cannot read {path}: {reason}")]
    DescriptorUnreadable { path: PathBuf, reason: String },

    #[error("Not a forge project: {path} is malformed: {reason}")]
    DescriptorMalformed { path: PathBuf, reason: String },

    #[error("Could not find required project files: package '{package}' is missing")]
    PackageMissing { package: String, root: PathBuf },
}

impl ProjectError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DescriptorNotFound { .. }
            | Self::DescriptorUnreadable { .. }
            | Self::DescriptorMalformed { .. } => vec![
                "Run this command from the root of a forge project".into(),
                "Try 'forge new --help' for details on how to create one".into(),
            ],
            Self::PackageMissing { root, .. } => vec![
                "Most likely the project or its descriptor is corrupted".into(),
                format!("Check 'package_name' in the descriptor under {}", root.display()),
            ],
        }
    }
}
