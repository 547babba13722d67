//! Scoped capture of the process-wide output and error streams.

pub mod outcome;
pub mod session;

pub use outcome::{Outcome, Report};
pub use session::{CaptureSession, capture, capture_result};
