//! Configuration management module.

pub mod loader;
pub mod paths;
pub mod schema;
pub mod validation;

pub use loader::{ConfigError, ConfigSource, LoadedConfig, load_config};
pub use paths::Paths;
pub use schema::{Config, LoggingConfig, NotificationsConfig, NtfyConfig, PushoverConfig};
pub use validation::{ValidationError, ValidationResult, ValidationWarning, validate_config};
