//! Herald: a synchronous, in-process publish/subscribe event bus.
//!
//! Code that wants to announce something creates an event by name, optionally
//! qualified by a scope, and hands a payload to every callback registered for
//! that name. Subscribers can be limited to a number of deliveries and, when
//! the publisher allows it, can cancel the action that triggered the event.

/// Settings loading (defaults, file, `HERALD_*` environment).
pub mod config;
/// Structured logging setup (filters, formats).
pub mod logging;
/// Pub/Sub: Publisher, Subscriber, Action.
pub mod pubsub;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Settings.
pub use self::config::{PublisherConfig, Settings};
/// Error types shared with the subscriber callbacks.
pub use herald_error::{ConfigError, ErrorExt, HeraldResult, StackError, StatusCode, SubscribeError};
/// Logging.
pub use logging::{init_logging, LogFormat, LoggingConfig};
/// Pub/Sub API.
pub use pubsub::{
    effective_name, is_blank, Action, PublishOptions, Publisher, PublisherStats, SubscribeOptions,
    Subscriber,
};
