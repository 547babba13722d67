//! Push notifications for instrumented code.
//!
//! - [`wrap`]: wrap a function so a failure (or a success) is pushed to a
//!   [`Notifier`], with the call's run time in the title.
//! - [`capture`]: run a block with its output and error streams captured,
//!   then push whichever one tells the story.
//! - [`notify`]: the notifier trait and its Pushover and ntfy channels.

pub mod capture;
pub mod cli;
pub mod config;
pub mod duration;
pub mod notify;
pub mod streams;
pub mod telemetry;
pub mod wrap;

mod unwind;

#[cfg(test)]
mod test_utils;

pub use capture::{CaptureSession, Outcome, Report, capture, capture_result};
pub use duration::{format_elapsed, format_hms};
pub use notify::{Notifier, NotifyError};
pub use wrap::{
    CallSite, push_completion, push_errors, push_panics, push_success, report_completion,
    report_errors, report_panics, report_success,
};
