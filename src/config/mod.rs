mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./posterctl.toml",
        "~/.config/posterctl/config.toml",
        "/etc/posterctl/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Overlay connection credentials from the environment. Environment variables
/// win over values from the config file.
pub fn apply_env(config: &mut Config) {
    if let Ok(url) = std::env::var("PLEX_URL") {
        if !url.is_empty() {
            config.server.url = Some(url);
        }
    }
    if let Ok(token) = std::env::var("PLEX_TOKEN") {
        if !token.is_empty() {
            config.server.token = Some(token);
        }
    }
}

/// Resolve the required connection credentials. Missing either value is a
/// fatal startup condition.
pub fn credentials(config: &Config) -> Result<Credentials> {
    let url = config
        .server
        .url
        .clone()
        .filter(|s| !s.is_empty())
        .context("PLEX_URL is not set and the config file has no [server] url")?;

    let token = config
        .server
        .token
        .clone()
        .filter(|s| !s.is_empty())
        .context("PLEX_TOKEN is not set and the config file has no [server] token")?;

    Ok(Credentials { url, token })
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.server.timeout_secs == 0 {
        anyhow::bail!("Request timeout cannot be 0");
    }

    if config.selection.replace_providers.is_empty() {
        tracing::warn!("No replace_providers configured; only unselected posters will change");
    }

    Ok(())
}
