//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `forge-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{
    GeneratorCatalog, GeneratorDescriptor, ProjectContext, ProjectError, RenderRequest,
};
use crate::error::ForgeResult;

/// Port for locating and parsing a project descriptor.
///
/// Implemented by:
/// - `forge_adapters::IniProjectResolver` (production)
#[cfg_attr(test, mockall::automock)]
pub trait ProjectResolver: Send + Sync {
    /// Resolve the project whose descriptor lives in `dir`.
    fn resolve(&self, dir: &Path) -> Result<ProjectContext, ProjectError>;
}

/// Port for running subprocesses to completion.
///
/// Implemented by:
/// - `forge_adapters::SystemProcessRunner` (production)
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run `invocation` and block until it exits.
    ///
    /// A process that starts and exits non-zero is `Ok` with a failing
    /// status; only a process that cannot be started is an error.
    fn run(&self, invocation: &Invocation) -> ForgeResult<ProcessStatus>;
}

/// Port for cataloging project-local generators.
///
/// Implementations must not execute any generator code; they only map names
/// to descriptors.
///
/// Implemented by:
/// - `forge_adapters::LocalGeneratorLoader` (production)
#[cfg_attr(test, mockall::automock)]
pub trait GeneratorDiscovery: Send + Sync {
    /// Generators defined under `project_root`. A project without a generator
    /// directory yields an empty catalog.
    fn discover(&self, project_root: &Path) -> ForgeResult<GeneratorCatalog>;
}

/// Port for writing a generator's output.
///
/// Implemented by:
/// - `forge_adapters::FileRenderer` (production)
#[cfg_attr(test, mockall::automock)]
pub trait GeneratorRenderer: Send + Sync {
    /// Render `generator` as described by `request`, returning the paths
    /// written.
    fn render(
        &self,
        generator: &GeneratorDescriptor,
        request: &RenderRequest,
    ) -> ForgeResult<Vec<PathBuf>>;
}

/// A program, its arguments, and where to run it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// Discard stdout and stderr.
    pub quiet: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            quiet: false,
        }
    }

    /// Build from `argv`-style parts; `None` when `parts` is empty.
    pub fn from_parts<I, S>(parts: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parts = parts.into_iter().map(Into::<String>::into);
        let program = parts.next()?;
        Some(Self::new(program).args(parts))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a finished process exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ProcessStatus {
    pub fn from_code(code: Option<i32>) -> Self {
        Self { code }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}
