use std::sync::{Mutex, PoisonError};

use crate::notify::channel::Notifier;
use crate::notify::error::NotifyError;

/// One delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub title: String,
}

/// Keeps every notification in memory instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that still records but reports every send as failed.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn send(&self, message: &str, title: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                message: message.to_string(),
                title: title.to_string(),
            });
        if self.fail {
            return Err(NotifyError::SendFailed {
                message: "recording notifier set to fail".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let recorder = RecordingNotifier::new();
        recorder.send("first", "one").unwrap();
        recorder.send("second", "two").unwrap();

        let sent = recorder.notifications();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].message, "first");
        assert_eq!(sent[1].title, "two");
    }

    #[test]
    fn failing_recorder_still_records() {
        let recorder = RecordingNotifier::failing();
        let err = recorder.send("msg", "title").unwrap_err();

        assert!(matches!(err, NotifyError::SendFailed { .. }));
        assert_eq!(recorder.len(), 1);
    }
}
