use tracing::error;

use crate::config::schema::NotificationsConfig;
use crate::notify::channel::Notifier;
use crate::notify::error::NotifyError;
use crate::notify::log::LogNotifier;
use crate::notify::ntfy::NtfyChannel;
use crate::notify::pushover::PushoverChannel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSummary {
    pub total: usize,
    pub successes: usize,
    pub failures: usize,
    pub failed_channels: Vec<String>,
}

impl DispatchSummary {
    fn new(total: usize, failures: Vec<String>) -> Self {
        let failures_count = failures.len();
        Self {
            total,
            successes: total.saturating_sub(failures_count),
            failures: failures_count,
            failed_channels: failures,
        }
    }
}

/// Fans a notification out to every enabled channel.
pub struct Dispatcher {
    channels: Vec<Box<dyn Notifier>>,
}

impl Dispatcher {
    pub fn new(channels: Vec<Box<dyn Notifier>>) -> Self {
        Self { channels }
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|channel| channel.name()).collect()
    }

    pub fn dispatch(&self, message: &str, title: &str) -> DispatchSummary {
        let enabled: Vec<&dyn Notifier> = self
            .channels
            .iter()
            .map(|channel| channel.as_ref())
            .filter(|channel| channel.is_enabled())
            .collect();

        let mut failures = Vec::new();
        for channel in &enabled {
            if let Err(err) = channel.send(message, title) {
                error!(
                    channel = channel.name(),
                    title,
                    error = %err,
                    "Notification channel send failed"
                );
                failures.push(channel.name().to_string());
            }
        }

        DispatchSummary::new(enabled.len(), failures)
    }
}

impl Notifier for Dispatcher {
    fn name(&self) -> &'static str {
        "dispatcher"
    }

    fn send(&self, message: &str, title: &str) -> Result<(), NotifyError> {
        let summary = self.dispatch(message, title);
        if summary.total > 0 && summary.successes == 0 {
            return Err(NotifyError::SendFailed {
                message: format!(
                    "all channels failed: {}",
                    summary.failed_channels.join(", ")
                ),
            });
        }
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.channels.iter().any(|channel| channel.is_enabled())
    }
}

/// Builds the channels named in the notifications config.
///
/// Disabled notifications, or an enabled section with no channel configured,
/// fall back to a [`LogNotifier`] so instrumented code still leaves a trace.
pub fn from_config(config: &NotificationsConfig) -> Dispatcher {
    let mut channels: Vec<Box<dyn Notifier>> = Vec::new();

    if config.enabled {
        if let Some(pushover) = &config.pushover {
            channels.push(Box::new(PushoverChannel::new(pushover)));
        }
        if let Some(ntfy) = &config.ntfy {
            channels.push(Box::new(NtfyChannel::new(ntfy)));
        }
    }

    if channels.is_empty() {
        channels.push(Box::new(LogNotifier));
    }

    Dispatcher::new(channels)
}
