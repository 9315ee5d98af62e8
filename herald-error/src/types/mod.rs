pub mod config;
pub mod pubsub;

// Реэкспорт всех типов ошибок из корня крейта.
pub use config::*;
pub use pubsub::*;

use crate::{ErrorExt, StatusCode};

/// Универсальная ошибка: код и сообщение.
///
/// Её создают `bail!`/`ensure!`; обычный способ для подписчика сообщить о
/// сбое без собственного типа ошибки.
#[derive(Debug, Clone)]
pub struct GenericError {
    code: StatusCode,
    message: String,
}

impl GenericError {
    pub fn new(
        code: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for GenericError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GenericError {}

impl ErrorExt for GenericError {
    fn status_code(&self) -> StatusCode {
        self.code
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_error() {
        let err = GenericError::new(StatusCode::SubscriberFailed, "disk full");
        assert_eq!(err.status_code(), StatusCode::SubscriberFailed);
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(err.message(), "disk full");
    }

    /// `as_any()` позволяет привести обратно к `GenericError`.
    #[test]
    fn test_generic_error_as_any_downcast() {
        let err = GenericError::new(StatusCode::NotFound, "not found");
        let down = err.as_any().downcast_ref::<GenericError>();
        assert_eq!(down.map(|e| e.status_code()), Some(StatusCode::NotFound));
    }

    #[test]
    fn test_generic_error_into_stack() {
        let stack: crate::StackError = GenericError::new(StatusCode::InvalidArgs, "bad").into();
        assert_eq!(stack.status_code(), StatusCode::InvalidArgs);
        assert_eq!(stack.to_string(), "bad");
    }
}
