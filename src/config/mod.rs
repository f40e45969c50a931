mod settings;

use config::{Config, ConfigError, Environment, File};
use tracing::debug;

use settings::PartialSettings;

pub use settings::{LoggingSettings, ServerSettings, Settings, TopicSettings};

/// Prefix for environment overrides, e.g. `VOTETOPIC__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "VOTETOPIC";

/// Loads the configuration from `config/default` and the environment,
/// merged over the default values.
///
/// A `.env` file in the working directory is read first when present.
pub fn load_config() -> Result<Settings, ConfigError> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }
    load_config_from("config/default")
}

/// Same as [`load_config`] but reads the given file (without extension)
/// and skips `.env` handling.
pub fn load_config_from(file: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(partial.merge(Settings::default()))
}
