use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::schema::NtfyConfig;
use crate::notify::channel::Notifier;
use crate::notify::error::NotifyError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_SERVER: &str = "https://ntfy.sh";

pub struct NtfyChannel {
    topic: String,
    server: String,
    priority: Option<String>,
    client: Client,
    timeout: Duration,
    enabled: bool,
}

impl NtfyChannel {
    pub fn new(config: &NtfyConfig) -> Self {
        Self {
            topic: config.topic.clone(),
            server: config
                .server
                .clone()
                .unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            priority: config.priority.clone(),
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

    fn url(&self) -> String {
        format!(
            "{}/{}",
            self.server.trim_end_matches('/'),
            self.topic.trim_start_matches('/')
        )
    }
}

impl Notifier for NtfyChannel {
    fn name(&self) -> &'static str {
        "ntfy"
    }

    fn send(&self, message: &str, title: &str) -> Result<(), NotifyError> {
        let mut request = self
            .client
            .post(self.url())
            .header("Title", header_safe(title))
            .body(message.to_string());

        if let Some(priority) = &self.priority {
            request = request.header("Priority", priority);
        }

        let response = request
            .send()
            .map_err(|err| NotifyError::from_request("ntfy", err, self.timeout))?;

        if !response.status().is_success() {
            return Err(NotifyError::SendFailed {
                message: format!("ntfy returned status {}", response.status()),
            });
        }

        debug!(channel = self.name(), title, "ntfy notification sent");
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

// Header values cannot carry line breaks.
fn header_safe(title: &str) -> String {
    title.replace(['\r', '\n'], " ")
}

fn build_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Failed to build ntfy client; using defaults");
        Client::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::serve_once;

    #[test]
    fn url_joins_server_and_topic() {
        let channel = NtfyChannel::new(&NtfyConfig {
            topic: "/builds".to_string(),
            server: Some("https://ntfy.example.com/".to_string()),
            priority: None,
        });

        assert_eq!(channel.url(), "https://ntfy.example.com/builds");
    }

    #[test]
    fn defaults_to_public_server() {
        let channel = NtfyChannel::new(&NtfyConfig {
            topic: "builds".to_string(),
            server: None,
            priority: Some("high".to_string()),
        });

        assert_eq!(channel.url(), "https://ntfy.sh/builds");
    }

    #[test]
    fn titles_are_flattened_to_one_line() {
        assert_eq!(header_safe("job\nfailed\r\n"), "job failed  ");
    }

    fn local_channel(server: String, priority: Option<&str>) -> NtfyChannel {
        NtfyChannel::new(&NtfyConfig {
            topic: "builds".to_string(),
            server: Some(server),
            priority: priority.map(str::to_string),
        })
    }

    #[test]
    fn send_posts_message_with_headers() {
        let (base_url, server) = serve_once(200, Duration::ZERO);

        local_channel(base_url, Some("high"))
            .send("disk full", "backup failed\nafter 00:02:00")
            .expect("send");

        let request = server.join().expect("server thread");
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/builds");
        assert_eq!(request.header("title"), Some("backup failed after 00:02:00"));
        assert_eq!(request.header("priority"), Some("high"));
        assert_eq!(request.body, "disk full");
    }

    #[test]
    fn priority_header_is_optional() {
        let (base_url, server) = serve_once(200, Duration::ZERO);

        local_channel(base_url, None).send("ok", "t").expect("send");

        let request = server.join().expect("server thread");
        assert_eq!(request.header("priority"), None);
    }

    #[test]
    fn error_status_is_send_failure() {
        let (base_url, server) = serve_once(500, Duration::ZERO);

        let err = local_channel(base_url, None).send("m", "t").unwrap_err();

        server.join().expect("server thread");
        assert!(matches!(err, NotifyError::SendFailed { .. }));
        assert!(err.to_string().contains("500"));
    }
}
