use std::any::Any;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибки загрузки настроек и установки подписчика логов.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(String),

    #[error("invalid log filter directive '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("failed to initialize logging: {0}")]
    Init(String),
}

impl ErrorExt for ConfigError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Load(_) => StatusCode::ConfigLoadFailed,
            Self::InvalidFilter { .. } => StatusCode::InvalidConfig,
            Self::Init(_) => StatusCode::InitFailed,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_codes() {
        assert_eq!(
            ConfigError::Load("missing".into()).status_code(),
            StatusCode::ConfigLoadFailed
        );
        assert_eq!(
            ConfigError::InvalidFilter {
                directive: "=".into(),
                reason: "bad".into()
            }
            .status_code(),
            StatusCode::InvalidConfig
        );
        assert_eq!(
            ConfigError::Init("twice".into()).status_code(),
            StatusCode::InitFailed
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidFilter {
            directive: "herald=loud".into(),
            reason: "unknown level".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid log filter directive 'herald=loud': unknown level"
        );
    }
}
