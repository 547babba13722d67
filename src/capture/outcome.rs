use std::fmt;
use std::time::Duration;

use crate::duration::format_hms_duration;
use crate::streams::Stream;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// The stream a report of this outcome is echoed to.
    pub fn stream(self) -> Stream {
        match self {
            Self::Succeeded => Stream::Output,
            Self::Failed => Stream::Error,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a finished capture scope reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub label: String,
    pub outcome: Outcome,
    pub message: String,
    pub title: String,
    pub elapsed: Duration,
}

/// Anything written to the error sink means failure, whether or not the
/// body also failed. A fault only decides the outcome when the error sink
/// is empty.
pub(crate) fn classify(output: &str, error: &str, fault: Option<&str>) -> (Outcome, String) {
    if !error.is_empty() {
        return (Outcome::Failed, error.to_string());
    }
    match fault {
        Some(fault) => (Outcome::Failed, fault.to_string()),
        None => (Outcome::Succeeded, output.to_string()),
    }
}

pub(crate) fn title(label: &str, outcome: Outcome, elapsed: Duration) -> String {
    format!(
        "{label} {outcome} after {}",
        format_hms_duration(elapsed)
    )
}
