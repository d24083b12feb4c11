//! Configuration loading for the diagram client.
//!
//! Reads `config.toml` from the platform config directory. Every field has
//! a default, so a missing file or a partial file is always usable.

mod credentials;
mod loader;
mod types;

pub use credentials::SecureString;
pub use loader::ConfigError;
pub use types::{
    ApiConfig, Config, Defaults, ExportConfig, NotificationConfig, RendererConfig,
};
