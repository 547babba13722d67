use serde::{Deserialize, Serialize};

/// Root configuration for pushwrappers.
///
/// Example:
/// ```toml
/// [logging]
/// level = "info"
///
/// [notifications]
/// enabled = true
///
/// [notifications.pushover]
/// token = "app-token"
/// user = "user-key"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Diagnostic logging configuration section.
    /// Example: [logging]
    pub logging: LoggingConfig,
    /// Notification channel configuration section.
    /// Example: [notifications]
    pub notifications: NotificationsConfig,
}

/// Diagnostic logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    /// Example: level = "info"
    pub level: String,
    /// Emit JSON lines instead of plain text.
    /// Example: json = false
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Notification channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Enable push delivery. When off, notifications are only logged.
    /// Example: enabled = true
    pub enabled: bool,
    /// Pushover notification configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pushover: Option<PushoverConfig>,
    /// ntfy.sh notification configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ntfy: Option<NtfyConfig>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pushover: None,
            ntfy: None,
        }
    }
}

/// Pushover application credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PushoverConfig {
    /// Application API token.
    pub token: String,
    /// User or group key receiving the notification.
    pub user: String,
    /// Restrict delivery to one device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Message priority, -2 (lowest) to 2 (emergency).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i8>,
    /// Seconds between re-alerts of an emergency message. Required at
    /// priority 2, at least 30.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<u32>,
    /// Seconds an emergency message keeps re-alerting. Required at
    /// priority 2, at most 10800.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire: Option<u32>,
    /// Override the messages endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

/// ntfy.sh notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NtfyConfig {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}
