//! # Xublit Core Configuration Errors
//!
//! [`ConfigError`] covers missing required options and failures while
//! reading or parsing a configuration file. Invalid include directories are
//! reported by the injector's validator, not here.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing \"{option}\" option")]
    MissingOption { option: &'static str },

    #[error("I/O error reading configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} configuration: {source}")]
    Parse {
        format: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),
}
