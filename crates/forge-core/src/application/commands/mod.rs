//! Queued units of work.
//!
//! Callers build commands, hand them to [`SharedContext::enqueue`], and run
//! the whole queue with [`SharedContext::execute`]. A command receives the
//! context when it runs, so it can reach the adapters and enqueue follow-up
//! work of its own.

use std::fmt;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, SharedContext,
        ports::Invocation,
    },
    domain::{GeneratorDescriptor, RenderRequest},
    error::ForgeResult,
};

/// A unit of work executed against the shared context.
pub trait Command: Send + Sync {
    /// Perform the work. An error aborts the rest of the queue.
    fn execute(&self, ctx: &SharedContext) -> ForgeResult<()>;

    /// Short human-readable label used in logs.
    fn describe(&self) -> String;
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Render one generator into a destination directory.
#[derive(Debug, Clone)]
pub struct GenerateFiles {
    generator: GeneratorDescriptor,
    request: RenderRequest,
}

impl GenerateFiles {
    pub fn new(generator: GeneratorDescriptor, request: RenderRequest) -> Self {
        Self { generator, request }
    }
}

impl Command for GenerateFiles {
    #[instrument(skip_all, fields(generator = %self.generator.name()))]
    fn execute(&self, ctx: &SharedContext) -> ForgeResult<()> {
        let written = ctx.renderer().render(&self.generator, &self.request)?;
        for path in &written {
            debug!(path = %path.display(), "File written");
        }
        info!(
            files = written.len(),
            destination = %self.request.destination.display(),
            "Generator rendered"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "generate {} into {}",
            self.generator.name(),
            self.request.destination.display()
        )
    }
}

/// Run an external program; a non-zero exit fails the command.
#[derive(Debug, Clone)]
pub struct RunShell {
    invocation: Invocation,
}

impl RunShell {
    pub fn new(invocation: Invocation) -> Self {
        Self { invocation }
    }
}

impl Command for RunShell {
    #[instrument(skip_all, fields(command = %self.invocation))]
    fn execute(&self, ctx: &SharedContext) -> ForgeResult<()> {
        let status = ctx.runner().run(&self.invocation)?;
        if !status.success() {
            return Err(ApplicationError::CommandFailed {
                command: self.invocation.to_string(),
                code: status.code,
            }
            .into());
        }
        debug!("Command succeeded");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("run `{}`", self.invocation)
    }
}
