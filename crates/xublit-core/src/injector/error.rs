//! # Xublit Core Injector Errors
//!
//! [`InjectorError`] is what the validator and `bootstrap()` fail with. The
//! shell passes it through unchanged.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InjectorError {
    #[error("Invalid include directory '{path}': {reason}")]
    InvalidIncludeDir { path: PathBuf, reason: String },

    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Module manifest error for '{path}': {message}")]
    Manifest {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Module '{module}' requires '{dependency}', which was not found")]
    MissingDependency { module: String, dependency: String },

    #[error("Circular module dependency detected: {}", .0.join(" -> "))]
    CyclicDependency(Vec<String>),

    /// Failures that fit no other variant
    #[error("Injector error: {0}")]
    Other(String),
}

impl InjectorError {
    pub(crate) fn io(source: std::io::Error, operation: &'static str, path: impl Into<PathBuf>) -> Self {
        InjectorError::Io {
            path: path.into(),
            operation,
            source,
        }
    }
}
