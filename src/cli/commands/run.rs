use std::process::Command;

use anyhow::{Context, bail};

use crate::capture::{CaptureSession, Report};
use crate::notify::Notifier;
use crate::streams::{self, Stream};

/// Exit code reported when the child was killed by a signal.
const SIGNALLED_EXIT_CODE: i32 = 1;

/// Runs `command` inside a capture scope and returns the child's exit code.
pub fn handle_run(
    label: Option<String>,
    command: &[String],
    notifier: &dyn Notifier,
) -> anyhow::Result<i32> {
    let Some((program, args)) = command.split_first() else {
        bail!("no command given");
    };
    let label = label.unwrap_or_else(|| command.join(" "));

    let mut session = CaptureSession::enter(label, notifier);
    let output = match Command::new(program).args(args).output() {
        Ok(output) => output,
        Err(err) => {
            session.fault(format!("failed to start {program}: {err}"));
            session.finish();
            return Err(err).with_context(|| format!("failed to start {program}"));
        }
    };

    streams::write_all(Stream::Output, &output.stdout)?;
    streams::write_all(Stream::Error, &output.stderr)?;
    if !output.status.success() {
        session.fault(format!("{program} exited with {}", output.status));
    }
    let report: Report = session.finish();
    tracing::debug!(title = %report.title, "Run reported");

    Ok(output.status.code().unwrap_or(SIGNALLED_EXIT_CODE))
}
