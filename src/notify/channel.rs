use std::sync::Arc;

use crate::notify::error::NotifyError;

/// A destination for push notifications.
///
/// Callers treat delivery as fire-and-forget: the instrumentation helpers log
/// a returned error and carry on.
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;
    fn send(&self, message: &str, title: &str) -> Result<(), NotifyError>;
    fn is_enabled(&self) -> bool {
        true
    }
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn send(&self, message: &str, title: &str) -> Result<(), NotifyError> {
        (**self).send(message, title)
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

impl<T: Notifier + ?Sized> Notifier for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn send(&self, message: &str, title: &str) -> Result<(), NotifyError> {
        (**self).send(message, title)
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn send(&self, message: &str, title: &str) -> Result<(), NotifyError> {
        (**self).send(message, title)
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

/// Sends a notification, logging instead of returning a delivery failure.
pub(crate) fn send_logged<N: Notifier + ?Sized>(notifier: &N, message: &str, title: &str) {
    if !notifier.is_enabled() {
        tracing::debug!(channel = notifier.name(), title, "Notifier disabled; skipping");
        return;
    }
    if let Err(err) = notifier.send(message, title) {
        tracing::warn!(
            channel = notifier.name(),
            title,
            error = %err,
            "Notification delivery failed"
        );
    }
}
