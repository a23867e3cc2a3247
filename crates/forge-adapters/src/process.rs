//! Subprocess execution via `std::process`.

use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use forge_core::application::ApplicationError;
use forge_core::application::ports::{Invocation, ProcessRunner, ProcessStatus};
use forge_core::error::ForgeResult;

/// Runs programs on the host, blocking until they exit.
///
/// Output is inherited from the parent unless the invocation is quiet, in
/// which case stdout and stderr are discarded. Stdin is always inherited.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    #[instrument(skip_all, fields(command = %invocation))]
    fn run(&self, invocation: &Invocation) -> ForgeResult<ProcessStatus> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        if let Some(cwd) = &invocation.cwd {
            cmd.current_dir(cwd);
        }
        if invocation.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = cmd.status().map_err(|e| ApplicationError::SpawnFailed {
            command: invocation.to_string(),
            reason: e.to_string(),
        })?;

        debug!(code = ?status.code(), "Process exited");
        Ok(ProcessStatus::from_code(status.code()))
    }
}
