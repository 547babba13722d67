use std::fs;
use std::path::{Path, PathBuf};

use anyhow::bail;

use crate::config::{
    Config, ConfigSource, LoadedConfig, Paths, ValidationResult, load_config, validate_config,
};

pub fn handle_init(force: bool, custom_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path = custom_path.unwrap_or_else(Paths::config_file);

    if config_path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
        set_dir_permissions(parent);
    }

    fs::write(&config_path, generate_default_config_toml())?;
    set_file_permissions(&config_path);

    println!("Config created at {}", config_path.display());
    Ok(())
}

pub fn handle_show(loaded: &LoadedConfig, json: bool) -> anyhow::Result<()> {
    if loaded.source == ConfigSource::Defaults {
        eprintln!("Using default configuration (no config file found)");
    }

    let rendered = render_config(&loaded.config, json)?;
    println!("{rendered}");
    Ok(())
}

pub fn handle_validate(path: Option<&Path>) -> anyhow::Result<()> {
    let loaded = load_config(path)?;
    let result = validate_config(&loaded.config);
    print_validation(&result);

    if !result.is_valid() {
        bail!("Configuration has {} error(s)", result.errors.len());
    }
    match loaded.source {
        ConfigSource::File(path) => println!("Configuration valid: {}", path.display()),
        ConfigSource::Defaults => println!("Configuration valid (defaults)"),
    }
    Ok(())
}

fn render_config(config: &Config, json: bool) -> anyhow::Result<String> {
    let mut shown = config.clone();
    if let Some(pushover) = shown.notifications.pushover.as_mut() {
        pushover.token = mask_secret(&pushover.token);
        pushover.user = mask_secret(&pushover.user);
    }

    if json {
        Ok(serde_json::to_string_pretty(&shown)?)
    } else {
        Ok(toml::to_string_pretty(&shown)?)
    }
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        return "****".to_string();
    }
    format!("{visible}****")
}

fn print_validation(result: &ValidationResult) {
    for error in &result.errors {
        println!("error: {}: {}", error.field, error.message);
        if let Some(suggestion) = &error.suggestion {
            println!("  hint: {suggestion}");
        }
    }
    for warning in &result.warnings {
        println!("warning: {}: {}", warning.field, warning.message);
    }
}

fn set_dir_permissions(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(err) = fs::set_permissions(path, fs::Permissions::from_mode(0o700)) {
            eprintln!("Warning: failed to set directory permissions: {err}");
        }
    }
}

fn set_file_permissions(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(err) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
            eprintln!("Warning: failed to set config file permissions: {err}");
        }
    }
}

fn generate_default_config_toml() -> String {
    r#"# pushwrappers configuration file

# Diagnostic logging
[logging]
# Log level: trace, debug, info, warn, error
level = "info"
# Emit JSON lines instead of plain text
json = false

# Notification configuration
[notifications]
# Deliver push notifications (when false they are only logged)
enabled = true

# Pushover notifications
# PUSHOVER_API_TOKEN and PUSHOVER_USER_KEY override these values
# [notifications.pushover]
# token = "your-application-token"
# user = "your-user-key"
# device = "phone"  # optional
# priority = 0  # -2 to 2
# retry = 60     # emergency (2) only, seconds between re-alerts
# expire = 3600  # emergency (2) only, at most 10800

# ntfy.sh notifications
# [notifications.ntfy]
# topic = "your-topic"
# server = "https://ntfy.sh"  # optional, default is ntfy.sh
# priority = "default"  # min, low, default, high, max
"#
    .to_string()
}
