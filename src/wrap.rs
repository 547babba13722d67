//! Function wrappers that report failure or success.
//!
//! Each wrapper comes in two forms: `report_*` runs a closure once, and
//! `push_*` turns a function into a new one with the same argument and
//! return types. Functions of several arguments take them as a tuple.
//!
//! `*_errors` and `*_success` treat `Err` as failure. Functions returning
//! anything else use `*_panics` and `*_completion`, where only a panic
//! counts as failure.
//!
//! ```
//! use pushwrappers::notify::RecordingNotifier;
//! use pushwrappers::{call_site, push_errors};
//!
//! let notifier = RecordingNotifier::new();
//! let parse = push_errors(&notifier, call_site!("parse"), |text: &str| text.parse::<u32>());
//!
//! assert_eq!(parse("42"), Ok(42));
//! assert!(parse("forty-two").is_err());
//! assert_eq!(notifier.len(), 1);
//! ```

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crate::duration::format_elapsed;
use crate::notify::Notifier;
use crate::notify::channel::send_logged;
use crate::unwind::panic_message;

pub const SUCCESS_TITLE: &str = "Success!";

/// Names a wrapped function in notifications as `module:name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    pub module: &'static str,
    pub name: &'static str,
}

impl CallSite {
    pub const fn new(module: &'static str, name: &'static str) -> Self {
        Self { module, name }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.name)
    }
}

/// Builds a [`CallSite`] for `name` in the calling module.
#[macro_export]
macro_rules! call_site {
    ($name:expr) => {
        $crate::wrap::CallSite::new(module_path!(), $name)
    };
}

/// Runs `f`, notifying if it panics. The panic then resumes with its
/// original payload.
///
/// This is the error wrapper for functions that do not return `Result`.
pub fn report_panics<N, R, F>(notifier: &N, site: CallSite, f: F) -> R
where
    N: Notifier + ?Sized,
    F: FnOnce() -> R,
{
    let started = Instant::now();
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => {
            notify_error(notifier, site, started.elapsed(), &panic_message(&*payload));
            panic::resume_unwind(payload)
        }
    }
}

/// Runs `f`, notifying if it returns `Err` or panics.
///
/// The error is returned unchanged and a panic resumes with its original
/// payload. Nothing is sent when `f` succeeds.
pub fn report_errors<N, T, E, F>(notifier: &N, site: CallSite, f: F) -> Result<T, E>
where
    N: Notifier + ?Sized,
    E: fmt::Display,
    F: FnOnce() -> Result<T, E>,
{
    let started = Instant::now();
    let result = report_panics(notifier, site, f);
    if let Err(err) = &result {
        notify_error(notifier, site, started.elapsed(), &err.to_string());
    }
    result
}

/// Runs `f`, notifying with its run time if it returns `Ok`.
///
/// Errors and panics pass through without a notification.
pub fn report_success<N, T, E, F>(notifier: &N, site: CallSite, f: F) -> Result<T, E>
where
    N: Notifier + ?Sized,
    F: FnOnce() -> Result<T, E>,
{
    let started = Instant::now();
    let result = f();
    if result.is_ok() {
        let message = success_message(site, started.elapsed());
        send_logged(notifier, &message, SUCCESS_TITLE);
    }
    result
}

/// Runs `f` and notifies with its run time once it returns.
///
/// Any return value counts as success. A panic passes through without a
/// notification.
pub fn report_completion<N, R, F>(notifier: &N, site: CallSite, f: F) -> R
where
    N: Notifier + ?Sized,
    F: FnOnce() -> R,
{
    let started = Instant::now();
    let value = f();
    send_logged(notifier, &success_message(site, started.elapsed()), SUCCESS_TITLE);
    value
}

/// Wraps `f` so every failing call is reported through `notifier`.
pub fn push_errors<N, A, T, E, F>(
    notifier: N,
    site: CallSite,
    f: F,
) -> impl Fn(A) -> Result<T, E>
where
    N: Notifier,
    E: fmt::Display,
    F: Fn(A) -> Result<T, E>,
{
    move |args| report_errors(&notifier, site, || f(args))
}

/// Wraps `f` so every successful call is reported through `notifier`.
pub fn push_success<N, A, T, E, F>(
    notifier: N,
    site: CallSite,
    f: F,
) -> impl Fn(A) -> Result<T, E>
where
    N: Notifier,
    F: Fn(A) -> Result<T, E>,
{
    move |args| report_success(&notifier, site, || f(args))
}

/// Wraps `f` so every call that panics is reported through `notifier`.
pub fn push_panics<N, A, R, F>(notifier: N, site: CallSite, f: F) -> impl Fn(A) -> R
where
    N: Notifier,
    F: Fn(A) -> R,
{
    move |args| report_panics(&notifier, site, || f(args))
}

/// Wraps `f` so every call that returns is reported through `notifier`.
pub fn push_completion<N, A, R, F>(notifier: N, site: CallSite, f: F) -> impl Fn(A) -> R
where
    N: Notifier,
    F: Fn(A) -> R,
{
    move |args| report_completion(&notifier, site, || f(args))
}

fn notify_error<N: Notifier + ?Sized>(notifier: &N, site: CallSite, elapsed: Duration, message: &str) {
    let title = error_title(site, elapsed);
    send_logged(notifier, message, &title);
}

fn error_title(site: CallSite, elapsed: Duration) -> String {
    format!("Error in {site} after {}", format_elapsed(elapsed))
}

fn success_message(site: CallSite, elapsed: Duration) -> String {
    format!("Completed {site} after {}", format_elapsed(elapsed))
}
