use tracing::info;

use crate::notify::channel::Notifier;
use crate::notify::error::NotifyError;

/// Emits notifications as log events. Stands in for real channels when
/// notifications are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    fn send(&self, message: &str, title: &str) -> Result<(), NotifyError> {
        info!(channel = self.name(), title, body = message, "Notification");
        Ok(())
    }
}
