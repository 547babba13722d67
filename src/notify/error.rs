use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification send failed: {message}")]
    SendFailed { message: String },
    #[error("Notification timed out after {duration:?}")]
    Timeout { duration: Duration },
}

impl NotifyError {
    pub(crate) fn from_request(channel: &str, err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout { duration: timeout }
        } else {
            Self::SendFailed {
                message: format!("{channel} request error: {err}"),
            }
        }
    }
}
