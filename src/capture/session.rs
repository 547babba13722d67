use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::capture::outcome::{Report, classify, title};
use crate::notify::Notifier;
use crate::notify::channel::send_logged;
use crate::streams::{self, Destinations, SharedBuffer};
use crate::unwind::panic_message;

/// An active output capture.
///
/// Entering installs two in-memory sinks in the process-wide destination
/// slot. The scope ends when the session is [finished](Self::finish) or
/// dropped, whichever comes first; either way the saved destinations are
/// put back, the outcome is classified, echoed to the restored stream, and
/// sent to the notifier.
///
/// Dropping during a panic marks the scope as faulted, so an unwinding body
/// that wrote nothing to the error sink still reports a failure. A panic
/// raised while reporting from that drop is caught and logged, since a
/// second panic during unwinding would abort the process.
pub struct CaptureSession<'n, N: Notifier + ?Sized = dyn Notifier> {
    label: String,
    started: Instant,
    saved: Option<Destinations>,
    output: SharedBuffer,
    error: SharedBuffer,
    fault: Option<String>,
    notifier: &'n N,
}

impl<'n, N: Notifier + ?Sized> CaptureSession<'n, N> {
    pub fn enter(label: impl Into<String>, notifier: &'n N) -> Self {
        let label = label.into();
        let output = SharedBuffer::new();
        let error = SharedBuffer::new();
        let saved = streams::install(Destinations::new(
            Box::new(output.clone()),
            Box::new(error.clone()),
        ));
        debug!(label = %label, "Capture started");

        Self {
            label,
            started: Instant::now(),
            saved: Some(saved),
            output,
            error,
            fault: None,
            notifier,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Text captured from the output stream so far.
    pub fn output(&self) -> String {
        self.output.contents()
    }

    /// Text captured from the error stream so far.
    pub fn error(&self) -> String {
        self.error.contents()
    }

    /// Marks the scope as failed. Only used as the report message when
    /// nothing was written to the error stream.
    pub fn fault(&mut self, description: impl Into<String>) {
        self.fault = Some(description.into());
    }

    pub fn finish(mut self) -> Report {
        self.close()
    }

    fn close(&mut self) -> Report {
        if let Some(saved) = self.saved.take() {
            drop(streams::install(saved));
        }
        let elapsed = self.started.elapsed();

        let (outcome, message) = classify(
            &self.output.contents(),
            &self.error.contents(),
            self.fault.as_deref(),
        );

        if !message.is_empty() {
            let echoed = streams::write_all(outcome.stream(), message.as_bytes())
                .and_then(|()| streams::flush(outcome.stream()));
            if let Err(err) = echoed {
                warn!(
                    label = %self.label,
                    stream = %outcome.stream(),
                    error = %err,
                    "Failed to echo captured text"
                );
            }
        }

        let title = title(&self.label, outcome, elapsed);
        send_logged(self.notifier, &message, &title);
        info!(
            label = %self.label,
            outcome = %outcome,
            elapsed_ms = elapsed.as_millis() as u64,
            "Capture finished"
        );

        Report {
            label: self.label.clone(),
            outcome,
            message,
            title,
            elapsed,
        }
    }
}

impl<N: Notifier + ?Sized> Drop for CaptureSession<'_, N> {
    fn drop(&mut self) {
        if self.saved.is_none() {
            return;
        }
        if !thread::panicking() {
            self.close();
            return;
        }

        if self.fault.is_none() {
            self.fault = Some(format!("{} panicked", self.label));
        }
        if panic::catch_unwind(AssertUnwindSafe(|| self.close())).is_err() {
            warn!(label = %self.label, "Capture report panicked while unwinding");
        }
    }
}

impl<N: Notifier + ?Sized> fmt::Debug for CaptureSession<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureSession")
            .field("label", &self.label)
            .field("active", &self.saved.is_some())
            .field("fault", &self.fault)
            .finish_non_exhaustive()
    }
}

/// Runs `body` inside a capture scope and returns its value.
///
/// A panicking body is reported as failed with the panic message, then the
/// panic continues with its original payload.
pub fn capture<N: Notifier + ?Sized, T>(
    label: impl Into<String>,
    notifier: &N,
    body: impl FnOnce() -> T,
) -> T {
    let mut session = CaptureSession::enter(label, notifier);
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => {
            session.finish();
            value
        }
        Err(payload) => {
            session.fault(panic_message(&*payload));
            session.finish();
            panic::resume_unwind(payload)
        }
    }
}

/// Like [`capture`], for bodies that report failure through `Err`.
///
/// An `Err` counts as a fault: when the body wrote nothing to the error
/// stream the error's text becomes the report message. The `Err` itself is
/// returned unchanged.
pub fn capture_result<N: Notifier + ?Sized, T, E: fmt::Display>(
    label: impl Into<String>,
    notifier: &N,
    body: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    let mut session = CaptureSession::enter(label, notifier);
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => {
            if let Err(err) = &result {
                session.fault(err.to_string());
            }
            session.finish();
            result
        }
        Err(payload) => {
            session.fault(panic_message(&*payload));
            session.finish();
            panic::resume_unwind(payload)
        }
    }
}
