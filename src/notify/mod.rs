//! Push notification channels.

pub mod channel;
pub mod dispatcher;
pub mod error;
pub mod log;
pub mod ntfy;
pub mod pushover;
pub mod recording;

pub use channel::Notifier;
pub use dispatcher::{DispatchSummary, Dispatcher, from_config};
pub use error::NotifyError;
pub use log::LogNotifier;
pub use ntfy::NtfyChannel;
pub use pushover::PushoverChannel;
pub use recording::{Notification, RecordingNotifier};
