use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Plex base URL (the PLEX_URL environment variable overrides this)
    #[serde(default)]
    pub url: Option<String>,

    /// Plex authentication token (the PLEX_TOKEN environment variable overrides this)
    #[serde(default)]
    pub token: Option<String>,

    /// Verify the server's TLS certificate (default: true)
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_verify_tls() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            verify_tls: default_verify_tls(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionConfig {
    /// Providers to prefer when choosing a replacement, in preference order
    #[serde(default = "default_preferred_providers")]
    pub preferred_providers: Vec<String>,

    /// Providers whose current selection should be replaced
    #[serde(default = "default_replace_providers")]
    pub replace_providers: Vec<String>,
}

fn default_preferred_providers() -> Vec<String> {
    vec!["tmdb".to_string()]
}
fn default_replace_providers() -> Vec<String> {
    vec!["gracenote".to_string()]
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            preferred_providers: default_preferred_providers(),
            replace_providers: default_replace_providers(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Append-mode log file; set to an empty string to disable file logging
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_file() -> String {
    "posterctl.log".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
        }
    }
}

impl LogConfig {
    pub fn path(&self) -> Option<PathBuf> {
        if self.file.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.file))
        }
    }
}

/// Resolved connection credentials after layering the config file and
/// environment variables.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub url: String,
    pub token: String,
}
