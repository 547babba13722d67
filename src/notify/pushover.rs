use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::config::schema::PushoverConfig;
use crate::notify::channel::Notifier;
use crate::notify::error::NotifyError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_API_URL: &str = "https://api.pushover.net/1/messages.json";
const MAX_MESSAGE_CHARS: usize = 1024;
const MAX_TITLE_CHARS: usize = 250;
const EMPTY_MESSAGE: &str = "(no output)";
const EMERGENCY_PRIORITY: i8 = 2;

/// Pushover channel.
///
/// Uses the blocking HTTP client, so it must not be called from inside an
/// async runtime worker.
pub struct PushoverChannel {
    token: String,
    user: String,
    device: Option<String>,
    priority: Option<i8>,
    retry: Option<u32>,
    expire: Option<u32>,
    api_url: String,
    client: Client,
    timeout: Duration,
    enabled: bool,
}

impl PushoverChannel {
    pub fn new(config: &PushoverConfig) -> Self {
        Self {
            token: config.token.clone(),
            user: config.user.clone(),
            device: config.device.clone(),
            priority: config.priority,
            retry: config.retry,
            expire: config.expire,
            api_url: config
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            client: build_client(REQUEST_TIMEOUT),
            timeout: REQUEST_TIMEOUT,
            enabled: true,
        }
    }

    /// Replaces the default ten second request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self.timeout = timeout;
        self
    }

    fn form_body(&self, message: &str, title: &str) -> Result<String, NotifyError> {
        let mut fields = vec![
            ("token", self.token.clone()),
            ("user", self.user.clone()),
            ("message", clamp_message(message)),
            ("title", clamp_title(title)),
        ];
        if let Some(device) = &self.device {
            fields.push(("device", device.clone()));
        }
        if let Some(priority) = self.priority {
            fields.push(("priority", priority.to_string()));
            // Emergency messages are refused without a re-alert schedule.
            if priority == EMERGENCY_PRIORITY {
                let (Some(retry), Some(expire)) = (self.retry, self.expire) else {
                    return Err(NotifyError::SendFailed {
                        message: "pushover emergency priority needs retry and expire".to_string(),
                    });
                };
                fields.push(("retry", retry.to_string()));
                fields.push(("expire", expire.to_string()));
            }
        }

        serde_urlencoded::to_string(&fields).map_err(|err| NotifyError::SendFailed {
            message: format!("pushover form encoding failed: {err}"),
        })
    }
}

impl Notifier for PushoverChannel {
    fn name(&self) -> &'static str {
        "pushover"
    }

    fn send(&self, message: &str, title: &str) -> Result<(), NotifyError> {
        let body = self.form_body(message, title)?;

        let response = self
            .client
            .post(&self.api_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .map_err(|err| NotifyError::from_request("pushover", err, self.timeout))?;

        if !response.status().is_success() {
            return Err(NotifyError::SendFailed {
                message: format!("pushover returned status {}", response.status()),
            });
        }

        debug!(channel = self.name(), title, "pushover notification sent");
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Pushover rejects empty and over-long messages. Captured output is most
/// useful at its end, so the tail is kept.
fn clamp_message(message: &str) -> String {
    if message.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }
    let count = message.chars().count();
    if count <= MAX_MESSAGE_CHARS {
        return message.to_string();
    }
    let tail: String = message.chars().skip(count - (MAX_MESSAGE_CHARS - 1)).collect();
    format!("…{tail}")
}

fn clamp_title(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_string();
    }
    let head: String = title.chars().take(MAX_TITLE_CHARS - 1).collect();
    format!("{head}…")
}

fn build_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Failed to build pushover client; using defaults");
        Client::new()
    })
}
