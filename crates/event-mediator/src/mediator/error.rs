//! # Event Mediator Errors
//!
//! Defines the error types raised by the listener registry and dispatch
//! engine.
//!
//! [`MediatorError`] covers precondition violations at registration time
//! (bad event names, malformed listeners, unknown priority tokens, malformed
//! batch declarations), listener failures during dispatch, and resolution
//! failures propagated unchanged from the service container.
use thiserror::Error;

use crate::container::error::ContainerError;
use crate::mediator::priority::Priority;

/// Error type listeners hand back to abort a dispatch
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum MediatorError {
    #[error("Event name can NOT be empty")]
    EmptyEventName,

    #[error("Event name '{}' contains non-printable characters", .event_name.escape_debug())]
    InvalidEventName { event_name: String },

    #[error("Invalid listener for event '{event_name}': {reason}")]
    InvalidListener { event_name: String, reason: String },

    #[error("Invalid service listener for event '{event_name}': {reason}")]
    InvalidServiceListener { event_name: String, reason: String },

    #[error("Unknown priority '{0}', expected an integer, 'first' or 'last'")]
    UnknownPriority(String),

    #[error("Event '{event_name}' must declare at least one priority")]
    EmptyPriorityList { event_name: String },

    #[error("Priority '{priority}' of event '{event_name}' must declare at least one listener")]
    EmptyListenerList { event_name: String, priority: Priority },

    #[error("Listener for event '{event_name}' failed: {source}")]
    ListenerFailed {
        event_name: String,
        #[source]
        source: ListenerError,
    },

    /// Resolution failure reported by the service container, passed through as is
    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("Attempted to operate on a poisoned mediator lock: {component}")]
    Poisoned { component: String },
}

/// Result type for mediator operations
pub type Result<T> = std::result::Result<T, MediatorError>;
