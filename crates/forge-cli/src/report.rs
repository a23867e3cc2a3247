//! The top-level error boundary.
//!
//! Failures with a declared exit code end the process quietly with that
//! code. Anything else is a bug: it is logged in full and followed by a
//! ready-to-paste issue report.

use std::backtrace::Backtrace;
use std::fmt;
use std::io::IsTerminal as _;
use std::panic::PanicHookInfo;
use std::process::ExitCode;

use tracing::{Level, debug, info};

use crate::error::CliError;

const ISSUES_URL: &str = concat!(env!("CARGO_PKG_REPOSITORY"), "/issues/new");

/// Everything a maintainer needs to reproduce an unexpected failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugReport {
    details: String,
    argv: String,
    rustc: &'static str,
    os: String,
    version: &'static str,
}

impl BugReport {
    /// Report for the current process, using its own command line.
    pub fn new(details: impl Into<String>) -> Self {
        Self::with_args(
            details,
            std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
    }

    pub fn with_args<I, S>(details: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            details: details.into(),
            argv: args
                .into_iter()
                .map(Into::into)
                .collect::<Vec<String>>()
                .join(" "),
            rustc: env!("FORGE_RUSTC_VERSION"),
            os: format!(
                "{}-{} ({})",
                std::env::consts::OS,
                std::env::consts::ARCH,
                std::env::consts::FAMILY
            ),
            version: forge_core::VERSION,
        }
    }
}

impl fmt::Display for BugReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Help improve forge :)

It does not have to be a defect immediately. But if you think this should not
happen or it would make a nice feature, feel free to create an issue:
{issues}

Below is copy-paste markdown with details to make things easier.
Add or edit whatever you see fit.

-----------------------------------------------------------------------------

**Describe the bug**
<!-- A clear and concise description of what the bug is. -->
```shell
{details}
```

**Expected behavior**
<!-- A clear and concise description of what you expected to happen. -->

**To Reproduce**
<!-- Steps to reproduce the behavior. -->
```shell
forge {argv}
```

**Environment**
* Rust version: `{rustc}`
* Operating System: `{os}`
* forge version: `{version}`

**Additional context**
<!-- Add any other context about the problem here. -->
",
            issues = ISSUES_URL,
            details = self.details,
            argv = self.argv,
            rustc = self.rustc,
            os = self.os,
            version = self.version,
        )
    }
}

/// Turn a failed run into the process exit code.
pub fn handle_error(err: CliError, verbose: bool, no_color: bool) -> ExitCode {
    match err.exit_code() {
        Some(code) => {
            if tracing::enabled!(Level::DEBUG) {
                debug!(error = %err.chain(), "Reason error occurred");
            }
            let msg = if !no_color && std::io::stderr().is_terminal() {
                err.format_colored(verbose)
            } else {
                err.format_plain(verbose)
            };
            eprint!("{msg}");
            ExitCode::from(code)
        }
        None => {
            err.log();
            info!("{}", BugReport::new(err.chain()));
            ExitCode::FAILURE
        }
    }
}

/// Route panics through the same report. The runtime still exits with 101.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let report = panic_report(panic_info);
        tracing::error!("Unhandled panic occurred during runtime.\n{}", report.details);
        info!("{report}");
    }));
}

/// Message, location and a forced backtrace of a panic.
fn panic_report(panic_info: &PanicHookInfo<'_>) -> BugReport {
    BugReport::new(format!(
        "{panic_info}\n\nstack backtrace:\n{}",
        Backtrace::force_capture()
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn sample() -> BugReport {
        BugReport::with_args("Internal error: boom", ["generate", "api", "users"])
    }

    #[test]
    fn report_contains_reproduction_details() {
        let text = sample().to_string();

        assert!(text.contains("/issues/new"));
        assert!(text.contains("Internal error: boom"));
        assert!(text.contains("forge generate api users"));
        assert!(text.contains(&format!("forge version: `{}`", forge_core::VERSION)));
        assert!(text.contains("Operating System: `"));
        assert!(text.contains(std::env::consts::OS));
        assert!(text.contains("Rust version: `"));
    }

    #[test]
    fn report_without_args_still_names_the_tool() {
        let report = BugReport::with_args("x", Vec::<String>::new());
        assert!(report.to_string().contains("```shell\nforge \n```"));
    }

    #[test]
    fn panic_report_carries_message_location_and_backtrace() {
        let captured = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&captured);
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            *sink.lock().unwrap() = Some(panic_report(info));
        }));

        let line = line!() + 2;
        let result: std::thread::Result<()> =
            std::panic::catch_unwind(|| panic!("renderer exploded"));
        std::panic::set_hook(previous);

        assert!(result.is_err());
        let text = captured.lock().unwrap().take().unwrap().to_string();
        assert!(text.contains("renderer exploded"));
        assert!(text.contains(&format!("{}:{line}:", file!())));
        assert!(text.contains("stack backtrace:"));
        assert!(text.contains("/issues/new"));
    }
}
