//! # Xublit Core Event System Errors
//!
//! Defines [`EventSystemError`], raised when delivering an event fails.
//! A listener failure aborts the emission it happened in; listeners after the
//! failing one are not invoked.
use crate::event::{ListenerError, ListenerId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventSystemError {
    #[error("Listener {listener_id} for event '{event}' failed: {source}")]
    ListenerFailed {
        event: String,
        listener_id: ListenerId,
        #[source]
        source: ListenerError,
    },
}

impl EventSystemError {
    /// Name of the event whose delivery failed
    pub fn event_name(&self) -> &str {
        match self {
            EventSystemError::ListenerFailed { event, .. } => event,
        }
    }
}
