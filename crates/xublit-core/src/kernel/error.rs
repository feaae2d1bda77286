//! # Xublit Core Kernel Errors
//!
//! Defines [`Error`], the error returned by every public operation of the
//! application shell, and the matching [`Result`] alias.
//!
//! Subsystem errors are wrapped unchanged: configuration problems
//! ([`ConfigError`]), injector failures from the include-dir validator or from
//! `bootstrap()` ([`InjectorError`]), and listener failures
//! ([`EventSystemError`]). Misuse of the public surface and lifecycle guard
//! violations are kernel-level variants.
use std::result::Result as StdResult;

use crate::config::error::ConfigError;
use crate::event::error::EventSystemError;
use crate::injector::error::InjectorError;
use crate::kernel::LifecycleState;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Missing or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Raised unchanged by the injector collaborator
    #[error("Injector error: {0}")]
    Injector(#[from] InjectorError),

    /// A lifecycle listener failed
    #[error("Event system error: {0}")]
    Event(#[from] EventSystemError),

    /// A public operation that must never be called from outside
    #[error("{message}")]
    Misuse {
        operation: &'static str,
        message: String,
    },

    /// Operation not allowed in the current lifecycle state
    #[error("Cannot {operation} while {state}: {message}")]
    Lifecycle {
        operation: &'static str,
        state: LifecycleState,
        message: String,
    },
}

impl Error {
    /// Whether this error was raised while validating startup configuration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::Injector(InjectorError::InvalidIncludeDir { .. })
        )
    }
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;
