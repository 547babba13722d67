use crate::config::schema::Config;

const PUSHOVER_MIN_RETRY: u32 = 30;
const PUSHOVER_MAX_EXPIRE: u32 = 10_800;
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const NTFY_PRIORITIES: [&str; 10] = [
    "1", "2", "3", "4", "5", "min", "low", "default", "high", "max",
];

#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

#[derive(Debug)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

pub fn validate_config(config: &Config) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError {
            field: "logging.level".to_string(),
            message: format!("Unknown log level '{}'", config.logging.level),
            suggestion: Some(format!("Use one of: {}", LOG_LEVELS.join(", "))),
        });
    }

    let notifications = &config.notifications;

    if let Some(ref pushover) = notifications.pushover {
        if pushover.token.trim().is_empty() {
            errors.push(ValidationError {
                field: "notifications.pushover.token".to_string(),
                message: "Pushover API token cannot be empty".to_string(),
                suggestion: Some("Set PUSHOVER_API_TOKEN or fill in the token".to_string()),
            });
        }
        if pushover.user.trim().is_empty() {
            errors.push(ValidationError {
                field: "notifications.pushover.user".to_string(),
                message: "Pushover user key cannot be empty".to_string(),
                suggestion: Some("Set PUSHOVER_USER_KEY or fill in the user key".to_string()),
            });
        }
        if let Some(priority) = pushover.priority {
            if !(-2..=2).contains(&priority) {
                errors.push(ValidationError {
                    field: "notifications.pushover.priority".to_string(),
                    message: format!("Priority {priority} is out of range"),
                    suggestion: Some("Use a value between -2 and 2".to_string()),
                });
            }
            if priority == 2 {
                validate_emergency(pushover.retry, pushover.expire, &mut errors);
            }
        }
        if let Some(ref api_url) = pushover.api_url {
            if !is_http_url(api_url) {
                errors.push(ValidationError {
                    field: "notifications.pushover.api_url".to_string(),
                    message: "Pushover API URL must start with http:// or https://".to_string(),
                    suggestion: None,
                });
            }
        }
    }

    if let Some(ref ntfy) = notifications.ntfy {
        if ntfy.topic.trim().is_empty() {
            errors.push(ValidationError {
                field: "notifications.ntfy.topic".to_string(),
                message: "ntfy topic cannot be empty".to_string(),
                suggestion: None,
            });
        }
        if let Some(ref server) = ntfy.server {
            if !is_http_url(server) {
                errors.push(ValidationError {
                    field: "notifications.ntfy.server".to_string(),
                    message: "ntfy server must start with http:// or https://".to_string(),
                    suggestion: None,
                });
            }
        }
        if let Some(ref priority) = ntfy.priority {
            if !NTFY_PRIORITIES.contains(&priority.as_str()) {
                errors.push(ValidationError {
                    field: "notifications.ntfy.priority".to_string(),
                    message: format!("Unknown ntfy priority '{priority}'"),
                    suggestion: Some("Use min, low, default, high, max or 1-5".to_string()),
                });
            }
        }
    }

    if notifications.enabled && notifications.pushover.is_none() && notifications.ntfy.is_none()
    {
        warnings.push(ValidationWarning {
            field: "notifications".to_string(),
            message: "Notifications enabled but no channel configured; messages will only be logged"
                .to_string(),
        });
    }

    ValidationResult { errors, warnings }
}

fn validate_emergency(retry: Option<u32>, expire: Option<u32>, errors: &mut Vec<ValidationError>) {
    match retry {
        None => errors.push(ValidationError {
            field: "notifications.pushover.retry".to_string(),
            message: "Emergency priority requires retry".to_string(),
            suggestion: Some(format!("Set retry to {PUSHOVER_MIN_RETRY} seconds or more")),
        }),
        Some(retry) if retry < PUSHOVER_MIN_RETRY => errors.push(ValidationError {
            field: "notifications.pushover.retry".to_string(),
            message: format!("Retry {retry}s is below the {PUSHOVER_MIN_RETRY}s minimum"),
            suggestion: None,
        }),
        Some(_) => {}
    }
    match expire {
        None => errors.push(ValidationError {
            field: "notifications.pushover.expire".to_string(),
            message: "Emergency priority requires expire".to_string(),
            suggestion: Some(format!("Set expire to at most {PUSHOVER_MAX_EXPIRE} seconds")),
        }),
        Some(expire) if expire > PUSHOVER_MAX_EXPIRE => errors.push(ValidationError {
            field: "notifications.pushover.expire".to_string(),
            message: format!("Expire {expire}s exceeds the {PUSHOVER_MAX_EXPIRE}s maximum"),
            suggestion: None,
        }),
        Some(_) => {}
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
