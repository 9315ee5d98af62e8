pub mod ext;
pub mod macros;
pub mod stack;
pub mod status_code;
pub mod types;

// Публично реэкспортируем все типы ошибок и функции из подмодулей,
// чтобы упростить доступ из внешнего кода.
pub use ext::*;
pub use macros::*;
pub use stack::*;
pub use status_code::*;
pub use types::*;

pub type HeraldResult<T> = Result<T, StackError>;
