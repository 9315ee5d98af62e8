use std::path::Path;

use config::{Config, ConfigBuilder, Environment, File};
use herald_error::{ConfigError, HeraldResult, ResultExt};
use serde::{Deserialize, Serialize};

use crate::logging::{filters::parse_directive, LoggingConfig};

/// Publisher tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Inserted between event and scope in effective names. Empty by
    /// default, which makes the effective name a plain concatenation.
    pub scope_separator: String,
}

/// Application settings.
///
/// Sources, lowest priority first: built-in defaults, an optional settings
/// file, then `HERALD_*` environment variables. Nested keys use `__`, e.g.
/// `HERALD_LOGGING__LEVEL=debug` or `HERALD_PUBLISHER__SCOPE_SEPARATOR=:`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub publisher: PublisherConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Loads defaults overridden by the environment.
    pub fn load() -> HeraldResult<Self> {
        Self::build(Self::defaults()?)
    }

    /// Same as [`Settings::load`] with a settings file layered between the
    /// defaults and the environment. The format follows the file extension.
    pub fn load_from<P: AsRef<Path>>(path: P) -> HeraldResult<Self> {
        let path = path.as_ref();
        let builder = Self::defaults()?.add_source(File::from(path));
        Self::build(builder).with_context(|| format!("reading {}", path.display()))
    }

    fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let defaults = Settings::default();
        Config::builder()
            // Adding default values
            .set_default(
                "publisher.scope_separator",
                defaults.publisher.scope_separator,
            )
            .and_then(|b| b.set_default("logging.level", defaults.logging.level))
            .and_then(|b| b.set_default("logging.format", "compact"))
            .and_then(|b| b.set_default("logging.with_ansi", defaults.logging.with_ansi))
            .and_then(|b| b.set_default("logging.with_target", defaults.logging.with_target))
            .map_err(|e| ConfigError::Load(e.to_string()))
    }

    fn build(builder: ConfigBuilder<config::builder::DefaultState>) -> HeraldResult<Self> {
        let settings: Settings = builder
            // Add environment variables with the HERALD_ prefix
            .add_source(
                Environment::with_prefix("HERALD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Rejects settings that would only fail later, at logging setup.
    pub fn validate(&self) -> HeraldResult<()> {
        parse_directive(&self.logging.level)?;
        Ok(())
    }
}
