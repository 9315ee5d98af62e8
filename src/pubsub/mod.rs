//! Подсистема publish/subscribe (observer).
//!
//! Лёгкая синхронная шина событий внутри процесса:
//!
//! - `action`: значение, которое получают подписчики, с возможностью отмены.
//! - `publisher`: реестр подписок и цикл доставки.
//! - `scope`: эффективные имена событий и проверка пустого scope.
//! - `subscriber`: дескрипторы подписчиков и опции subscribe/publish.

pub mod action;
pub mod publisher;
pub mod scope;
pub mod subscriber;

pub use action::*;
pub use publisher::*;
pub use scope::*;
pub(crate) use subscriber::Subscription;
pub use subscriber::{PublishOptions, SubscribeOptions, Subscriber};
