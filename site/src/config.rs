//! Site configuration loading and parsing

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "/etc/aitools/config.toml";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub site: SiteSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_password")]
    pub password: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: default_admin_password(),
            session_ttl_minutes: default_session_ttl(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingConfig {
    #[serde(default = "default_processing_delay")]
    pub delay_ms: u64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_processing_delay(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_tools_per_page")]
    pub tools_per_page: u32,
    #[serde(default = "default_featured_count")]
    pub featured_tools_count: u32,
    #[serde(default = "default_recent_count")]
    pub recent_tools_count: usize,
    /// Optional directory served under /static
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            tools_per_page: default_tools_per_page(),
            featured_tools_count: default_featured_count(),
            recent_tools_count: default_recent_count(),
            static_dir: None,
        }
    }
}

// Default value functions
fn default_bind_address() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8080 }
fn default_log_level() -> String { "info".into() }
fn default_log_format() -> String { "compact".into() }
fn default_admin_password() -> String { "admin".into() }
fn default_session_ttl() -> u64 { 60 }
fn default_sweep_interval() -> u64 { 60 }
fn default_processing_delay() -> u64 { 2000 }
fn default_tools_per_page() -> u32 { 12 }
fn default_featured_count() -> u32 { 6 }
fn default_recent_count() -> usize { 5 }

/// Load configuration from $AITOOLS_CONFIG or /etc/aitools/config.toml
pub fn load_config() -> Result<SiteConfig> {
    let config_path = std::env::var("AITOOLS_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config_from(Path::new(&config_path))
}

/// Load configuration from a path, falling back to defaults if it is missing
pub fn load_config_from(path: &Path) -> Result<SiteConfig> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: SiteConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    } else {
        tracing::warn!("Config file not found at {}, using defaults", path.display());
        Ok(SiteConfig::default())
    }
}
