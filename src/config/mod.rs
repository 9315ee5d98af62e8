pub mod settings;

pub use settings::{PublisherConfig, Settings};
