use std::any::Any;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Причины отказа в изменении подписки.
///
/// Булев API публикатора сводит их к `false`; варианты `try_*` возвращают
/// их вызывающему.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscribeError {
    /// `max_call_count` равен нулю.
    #[error("max call count must be a positive number")]
    InvalidMaxCallCount,

    /// Подписчик уже зарегистрирован под этим эффективным именем.
    #[error("subscriber is already registered for event '{event}'")]
    AlreadySubscribed { event: String },

    /// Подписчик не зарегистрирован под этим эффективным именем.
    #[error("subscriber is not registered for event '{event}'")]
    NotSubscribed { event: String },
}

impl SubscribeError {
    /// Эффективное имя события, если оно есть.
    pub fn event(&self) -> Option<&str> {
        match self {
            Self::InvalidMaxCallCount => None,
            Self::AlreadySubscribed { event } | Self::NotSubscribed { event } => Some(event),
        }
    }
}

impl ErrorExt for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidMaxCallCount => StatusCode::InvalidArgs,
            Self::AlreadySubscribed { .. } => StatusCode::AlreadyExists,
            Self::NotSubscribed { .. } => StatusCode::NotFound,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn metrics_tags(&self) -> Vec<(&'static str, String)> {
        let mut tags = vec![
            ("error_type", "pubsub_subscribe".to_string()),
            ("status_code", self.status_code().to_string()),
        ];
        if let Some(event) = self.event() {
            tags.push(("event", event.to_string()));
        }
        tags
    }
}
