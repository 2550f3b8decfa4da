// In crates/app-config/src/lib.rs

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{ApiSettings, AppSettings, Settings};

const CONFIG_DIR: &str = "config";

/// Loads the application settings from the `config/` directory.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(CONFIG_DIR)
}

/// Same as [`load_settings`], reading the TOML files from `dir`.
pub fn load_settings_from(dir: impl AsRef<Path>) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = file_sources(dir.as_ref(), &environment)?
        // Settings from environment variables (e.g., `APP_API__API_KEY=...`).
        .add_source(app_environment())
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// The file layers for `environment`. `app.environment` always reports the
/// environment whose file was picked.
fn file_sources(dir: &Path, environment: &str) -> Result<ConfigBuilder<DefaultState>> {
    let builder = Config::builder()
        .add_source(File::from(dir.join("base")).required(false))
        .add_source(File::from(dir.join(environment)).required(false))
        .set_override("app.environment", environment)?;
    Ok(builder)
}

fn app_environment() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
}
