#[cfg(test)]
pub(crate) mod capture;
pub mod config;
pub mod filters;
mod formatter;

pub use self::config::{LogFormat, LoggingConfig};
use herald_error::{ConfigError, HeraldResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global `tracing` subscriber described by `config`.
///
/// Logs go to stderr. Fails with [`ConfigError::Init`] if a global subscriber
/// is already installed.
pub fn init_logging(config: &LoggingConfig) -> HeraldResult<()> {
    let env_filter = filters::build_filter_from_config(config);
    let layer = formatter::build_formatter_from_config(config, std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()
        .map_err(|e| ConfigError::Init(e.to_string()))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        format = ?config.format,
        "Logging system initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use herald_error::StatusCode;
    use serial_test::serial;

    use super::*;

    /// Повторная установка возвращает ошибку, а не паникует.
    #[test]
    #[serial]
    fn test_second_init_fails() {
        let config = LoggingConfig::default();
        let _ = init_logging(&config);

        let err = init_logging(&config).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::InitFailed);
    }
}
