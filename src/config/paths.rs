use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Names the config file to use, overriding the platform location.
pub const CONFIG_ENV: &str = "PUSHWRAPPERS_CONFIG";

const APP_DIR: &str = "pushwrappers";
const CONFIG_FILE: &str = "config.toml";

/// Locates the configuration file.
pub struct Paths;

impl Paths {
    /// `$PUSHWRAPPERS_CONFIG` when set and non-empty, otherwise
    /// `pushwrappers/config.toml` under the platform config directory
    /// (`~/.config` on Linux, `~/Library/Application Support` on macOS).
    pub fn config_file() -> PathBuf {
        resolve(env::var_os(CONFIG_ENV), dirs::config_dir())
    }
}

fn resolve(override_path: Option<OsString>, platform_dir: Option<PathBuf>) -> PathBuf {
    if let Some(path) = override_path.filter(|path| !path.is_empty()) {
        return PathBuf::from(path);
    }
    platform_dir
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}
