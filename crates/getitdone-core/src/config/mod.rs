use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub data: DataConfig,
    pub user: UserConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// JSON dataset holding task, exception and completion rows.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Returns a configuration builder pre-populated with every default value.
    ///
    /// ## Errors
    /// Returns an error if a default cannot be registered.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("data.path", "tasks.json")?
            .set_default("user.slug", "me")?
            .set_default("logging.level", "info")?)
    }

    /// ## Summary
    /// Loads configuration from `GETITDONE_`-prefixed environment variables
    /// (`GETITDONE_DATA_PATH`, `GETITDONE_USER_SLUG`, ...) and an optional
    /// `config.toml` into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(
                config::Environment::with_prefix("GETITDONE")
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(error) = dotenvy::dotenv() {
        tracing::trace!(%error, "No .env file loaded");
    }

    Settings::load()
}
