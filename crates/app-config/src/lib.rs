// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, ServerSettings, Settings, UpstreamSettings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from an optional `config/base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables (`APP_SERVER__PORT=9000`).
/// 4. Applies the hosting platform's bare `PORT` variable, if present.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = load_settings_from(Path::new("config"), &environment)?;
    apply_port_override(settings, std::env::var("PORT").ok())
}

/// Loads settings from `base` and `{environment}` files inside `config_dir`,
/// then layers `APP_*` environment variables on top.
pub fn load_settings_from(config_dir: &Path, environment: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::from(config_dir.join("base")).required(false))
        .add_source(File::from(config_dir.join(environment)).required(false))
        // The prefix is `APP`, separator is `__`.
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    settings.strategy.validate()?;

    Ok(settings)
}

/// Overrides `server.port` with the value of a bare `PORT` variable.
pub fn apply_port_override(mut settings: Settings, port: Option<String>) -> Result<Settings> {
    if let Some(port) = port.filter(|p| !p.trim().is_empty()) {
        settings.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::InvalidEnvVar { name: "PORT", value: port.clone() })?;
    }
    Ok(settings)
}
