use std::{any::Any, error::Error};

use crate::StatusCode;

/// Расширение для ошибок herald (object-safe).
///
/// Даёт код статуса, downcast через [`Any`] и набор тегов, которые
/// публикатор пишет в лог при отказе подписки или падении подписчика.
pub trait ErrorExt: Error + Send + Sync + 'static {
    /// Код статуса ошибки. По умолчанию [`StatusCode::Internal`].
    fn status_code(&self) -> StatusCode {
        StatusCode::Internal
    }

    fn as_any(&self) -> &dyn Any;

    /// Пары ключ/значение для структурированного лога.
    fn metrics_tags(&self) -> Vec<(&'static str, String)> {
        let error_type = std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");
        vec![
            ("error_type", error_type.to_string()),
            ("status_code", self.status_code().to_string()),
        ]
    }
}
