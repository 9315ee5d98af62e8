use herald_error::ConfigError;
use tracing_subscriber::EnvFilter;

use crate::logging::config::LoggingConfig;

/// Разбирает директиву `EnvFilter`.
pub fn parse_directive(directive: &str) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(directive).map_err(|e| ConfigError::InvalidFilter {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Строит фильтр для подписчика логов.
///
/// Если задан `RUST_LOG`, используется он. Иначе берётся уровень из
/// конфигурации, а некорректная директива заменяется на `info`.
pub fn build_filter_from_config(config: &LoggingConfig) -> EnvFilter {
    if let Ok(env_filter) = EnvFilter::try_from_default_env() {
        return env_filter;
    }

    match parse_directive(&config.level) {
        Ok(filter) => filter,
        Err(e) => {
            // подписчик ещё не установлен, остаётся только stderr
            eprintln!("{e}; falling back to 'info'");
            EnvFilter::new("info")
        }
    }
}
