//! Configuration for the waitlist service.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Waitlist storage configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Lead notification configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the waitlist snapshot file
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Enable persistence (if false, the waitlist is in-memory only)
    #[serde(default = "default_true")]
    pub persist: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Mail relay REST API URL
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    /// Sender address for lead notifications
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Operator addresses that receive lead notifications.
    /// Empty disables notification entirely.
    #[serde(default)]
    pub recipients: Vec<String>,

    /// Base URL of the administrative UI, used to link each lead
    #[serde(default = "default_admin_base_url")]
    pub admin_base_url: String,

    /// Relay request timeout
    #[serde(default = "default_mail_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Signup submissions allowed per originating IP per hour
    #[serde(default = "default_submissions_per_hour")]
    pub submissions_per_hour: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            persist: true,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            from_address: default_from_address(),
            recipients: Vec::new(),
            admin_base_url: default_admin_base_url(),
            timeout: default_mail_timeout(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            submissions_per_hour: default_submissions_per_hour(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_store_path() -> PathBuf {
    PathBuf::from("/data/waitlist.json")
}

fn default_true() -> bool {
    true
}

fn default_relay_url() -> String {
    "http://mail-relay:8025".into()
}

fn default_from_address() -> String {
    "noreply@localhost".into()
}

fn default_admin_base_url() -> String {
    "http://localhost:8080/admin".into()
}

fn default_mail_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_submissions_per_hour() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
