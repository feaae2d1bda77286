//! # Xublit Core Configuration
//!
//! Turns raw, possibly partial [`AppOptions`] into the immutable
//! [`Configuration`] an application shell is built from.
//!
//! - [`options`]: the raw option set, its builder and file loading
//!   (JSON always, YAML and TOML behind the `yaml-config`/`toml-config` features).
//! - [`configuration`]: default substitution, validation and the derived
//!   include-directory list.
//! - [`error`]: [`ConfigError`].
pub mod configuration;
pub mod error;
pub mod options;

pub use configuration::Configuration;
pub use error::ConfigError;
pub use options::{AppOptions, ConfigFormat};

#[cfg(test)]
mod tests;
