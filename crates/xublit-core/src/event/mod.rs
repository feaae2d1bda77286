//! # Xublit Core Event System
//!
//! Named, synchronous publish/subscribe used by the lifecycle shell.
//!
//! Listeners are registered by event name and invoked in registration order.
//! The emitting half lives in the crate-private [`emitter`] module: only the
//! kernel's lifecycle operations can fire events. Everything outside the crate
//! (including discovered modules, through [`AppHandle`](crate::injector::AppHandle))
//! can subscribe but never emit.
pub(crate) mod emitter;
pub mod error;

use std::fmt;

pub use error::EventSystemError;

/// Identifier handed out for every registered listener
pub type ListenerId = u64;

/// Error type a listener may fail with
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a single listener invocation
pub type ListenerResult = std::result::Result<(), ListenerError>;

/// Events fired by the application shell.
///
/// The four lifecycle variants are the only events the shell ever emits.
/// `Custom` exists so collaborators can subscribe under their own names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Fired by `start()` before the injector bootstraps
    BeforeStart,
    /// Fired once every module has been bootstrapped
    Bootstrapped,
    /// Fired as the last step of `start()`
    Started,
    /// Fired by `stop()` right before the host halts
    Stop,
    /// Any other event name
    Custom(String),
}

impl LifecycleEvent {
    pub const BEFORE_START: &'static str = "before:start";
    pub const BOOTSTRAPPED: &'static str = "bootstrapped";
    pub const STARTED: &'static str = "started";
    pub const STOP: &'static str = "stop";

    /// Get the wire name of this event
    pub fn name(&self) -> &str {
        match self {
            LifecycleEvent::BeforeStart => Self::BEFORE_START,
            LifecycleEvent::Bootstrapped => Self::BOOTSTRAPPED,
            LifecycleEvent::Started => Self::STARTED,
            LifecycleEvent::Stop => Self::STOP,
            LifecycleEvent::Custom(name) => name,
        }
    }

    /// Map an event name to its variant; lifecycle names never become `Custom`.
    pub fn from_name(name: &str) -> Self {
        match name {
            Self::BEFORE_START => LifecycleEvent::BeforeStart,
            Self::BOOTSTRAPPED => LifecycleEvent::Bootstrapped,
            Self::STARTED => LifecycleEvent::Started,
            Self::STOP => LifecycleEvent::Stop,
            other => LifecycleEvent::Custom(other.to_string()),
        }
    }

    /// Whether this is one of the four events the shell emits
    pub fn is_lifecycle(&self) -> bool {
        !matches!(self, LifecycleEvent::Custom(_))
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for LifecycleEvent {
    fn from(name: &str) -> Self {
        LifecycleEvent::from_name(name)
    }
}

impl From<String> for LifecycleEvent {
    fn from(name: String) -> Self {
        LifecycleEvent::from_name(&name)
    }
}

// Test module declaration
#[cfg(test)]
mod tests;
