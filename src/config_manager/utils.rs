use std::path::PathBuf;

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config.ini";

/// Resolve the configuration file path.
///
/// Order: `CONFIG_PATH`, `config.ini` in the working directory, then
/// `config.ini` next to the executable. Falls back to the working-directory
/// path even when it does not exist so the loader can warn about it.
pub fn resolve_config_path() -> String {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return path;
    }

    if PathBuf::from(DEFAULT_CONFIG_PATH).exists() {
        return DEFAULT_CONFIG_PATH.to_string();
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|dir| dir.join(DEFAULT_CONFIG_PATH)))
        .filter(|p| p.exists())
        .and_then(|p| p.to_str().map(|s| s.to_string()));

    beside_exe.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

/// Render a secret for logs without leaking it
pub fn mask_secret(secret: Option<&str>) -> &'static str {
    match secret {
        Some(s) if !s.is_empty() => "***",
        _ => "<unset>",
    }
}
