use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::api::endpoints;

const CONFIG_FILE: &str = "config.toml";

/// Client configuration loaded from config.toml, all fields optional.
/// `AMO_API_BASE_URL` (env or .env) overrides the backend address.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_file")]
    pub cache_file: String,
    /// Local snapshots older than this are flagged as stale when displayed.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_base_url() -> String {
    endpoints::DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_cache_file() -> String {
    "weather_cache.json".to_string()
}
fn default_cache_ttl() -> u64 {
    600
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            cache_file: default_cache_file(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

impl AppConfig {
    /// Load from config.toml if present, else defaults, then apply the env
    /// override.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).context("Failed to read config.toml")?;
            toml::from_str(&raw).context("Failed to parse config.toml")?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("AMO_API_BASE_URL") {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }

        Ok(config)
    }
}
