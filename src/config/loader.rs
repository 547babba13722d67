use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::paths::Paths;
use crate::config::schema::{Config, PushoverConfig};

pub const PUSHOVER_TOKEN_ENV: &str = "PUSHOVER_API_TOKEN";
pub const PUSHOVER_USER_ENV: &str = "PUSHOVER_USER_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Loads the config at `path`, or the platform default path when `None`.
///
/// A missing file yields defaults. Pushover credentials from the
/// environment replace the file's, creating the section when both are set.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(Paths::config_file);

    let mut loaded = match fs::read_to_string(&path) {
        Ok(contents) => {
            let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
            LoadedConfig {
                config,
                source: ConfigSource::File(path),
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Config file not found; using defaults");
            LoadedConfig {
                config: Config::default(),
                source: ConfigSource::Defaults,
            }
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    apply_env_overrides(&mut loaded.config);
    Ok(loaded)
}

fn apply_env_overrides(config: &mut Config) {
    let token = env::var(PUSHOVER_TOKEN_ENV).ok().filter(|v| !v.is_empty());
    let user = env::var(PUSHOVER_USER_ENV).ok().filter(|v| !v.is_empty());

    if let Some(pushover) = config.notifications.pushover.as_mut() {
        if let Some(token) = token {
            pushover.token = token;
        }
        if let Some(user) = user {
            pushover.user = user;
        }
        return;
    }

    if let (Some(token), Some(user)) = (token, user) {
        config.notifications.pushover = Some(PushoverConfig {
            token,
            user,
            device: None,
            priority: None,
            api_url: None,
            retry: None,
            expire: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ENV_LOCK;

    fn set_env_var(key: &str, value: impl AsRef<std::ffi::OsStr>) {
        unsafe {
            env::set_var(key, value);
        }
    }

    fn remove_env_var(key: &str) {
        unsafe {
            env::remove_var(key);
        }
    }

    fn clear_pushover_env() {
        remove_env_var(PUSHOVER_TOKEN_ENV);
        remove_env_var(PUSHOVER_USER_ENV);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_pushover_env();
        let temp = tempfile::tempdir().unwrap();

        let loaded = load_config(Some(&temp.path().join("missing.toml"))).unwrap();

        assert_eq!(loaded.source, ConfigSource::Defaults);
        assert_eq!(loaded.config, Config::default());
    }

    #[test]
    fn reads_existing_file() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_pushover_env();
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let loaded = load_config(Some(&path)).unwrap();

        assert_eq!(loaded.source, ConfigSource::File(path));
        assert_eq!(loaded.config.logging.level, "warn");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_pushover_env();
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[logging\nlevel = ").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_credentials_create_pushover_section() {
        let _lock = ENV_LOCK.lock().unwrap();
        let temp = tempfile::tempdir().unwrap();
        set_env_var(PUSHOVER_TOKEN_ENV, "env-token");
        set_env_var(PUSHOVER_USER_ENV, "env-user");

        let loaded = load_config(Some(&temp.path().join("missing.toml"))).unwrap();
        clear_pushover_env();

        let pushover = loaded.config.notifications.pushover.expect("pushover");
        assert_eq!(pushover.token, "env-token");
        assert_eq!(pushover.user, "env-user");
    }

    #[test]
    fn env_token_overrides_file_token() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_pushover_env();
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[notifications.pushover]\ntoken = \"file\"\nuser = \"file-user\"\n",
        )
        .unwrap();
        set_env_var(PUSHOVER_TOKEN_ENV, "env-token");

        let loaded = load_config(Some(&path)).unwrap();
        clear_pushover_env();

        let pushover = loaded.config.notifications.pushover.expect("pushover");
        assert_eq!(pushover.token, "env-token");
        assert_eq!(pushover.user, "file-user");
    }
}
