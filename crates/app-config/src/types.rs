// In crates/app-config/src/types.rs

use serde::Deserialize;
use strategies::SmaCrossoverSettings;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub server: ServerSettings,
    /// Where candles are fetched from.
    #[serde(default)]
    pub upstream: UpstreamSettings,
    /// Window lengths for the crossover.
    #[serde(default)]
    pub strategy: SmaCrossoverSettings,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct UpstreamSettings {
    /// Base URL of the candle ticker API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout when talking to the ticker API.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// Helper functions for serde defaults.
fn default_environment() -> String { "development".into() }
fn default_log_level() -> String { "info".into() }
fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8080 }
fn default_base_url() -> String {
    "http://cryptohopper-ticker-frontend.us-east-1.elasticbeanstalk.com".into()
}
fn default_timeout_secs() -> u64 { 10 }
