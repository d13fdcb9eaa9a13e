use config::{Config, ConfigError, File};

use super::{Environment, Settings};

/// Reads `APP_ENVIRONMENT` (default `local`), then layers
/// `appsettings.{environment}.toml` under `APP_*` variables. Nested keys use a
/// double underscore, e.g. `APP_LLM__CHAT_MODEL`.
pub fn load_settings() -> Result<(Environment, Settings), ConfigError> {
    dotenvy::dotenv().ok();

    let environment = match std::env::var("APP_ENVIRONMENT") {
        Ok(raw) => raw.parse::<Environment>().map_err(ConfigError::Message)?,
        Err(_) => Environment::default(),
    };

    let settings = Config::builder()
        .add_source(
            File::with_name(&environment.settings_file()).required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    Ok((environment, settings))
}
