use std::fmt;

use num_enum::TryFromPrimitive;

/// Коды статуса для классификации ошибок.
///
/// # Диапазоны:
/// - 0xxx: успех
/// - 1xxx: общие ошибки
/// - 2xxx: реестр подписок
/// - 3xxx: конфигурация и инициализация
/// - 4xxx: ошибки подписчиков во время доставки
///
/// `num_enum::TryFromPrimitive` даёт `TryFrom<u32>`, так что код из логов
/// можно превратить обратно в вариант.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    // === 0xxx: Success ===
    Success = 0,

    // === 1xxx: General ===
    Unknown = 1000,
    Internal = 1003,
    InvalidArgs = 1004,

    // === 2xxx: Registry ===
    NotFound = 2000,
    AlreadyExists = 2001,

    // === 3xxx: Configuration ===
    InvalidConfig = 3000,
    ConfigLoadFailed = 3001,
    InitFailed = 3002,

    // === 4xxx: Subscribers ===
    SubscriberFailed = 4000,
    SubscriberRejected = 4001,
}

impl StatusCode {
    /// Числовое значение кода.
    pub const fn code(self) -> u32 {
        self as u32
    }
}

impl From<StatusCode> for u32 {
    fn from(c: StatusCode) -> Self {
        c.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
