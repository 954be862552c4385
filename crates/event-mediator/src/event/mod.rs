//! # Event Mediator Events
//!
//! An event is the value threaded through a single `trigger` call. The only
//! state the mediator itself cares about is the "handled" flag: once a
//! listener calls [`Event::event_handled`], dispatch stops.
//!
//! Callers that want to carry data alongside the flag can either use
//! [`DataEvent`] or implement [`Event`] on their own type and downcast inside
//! their listeners.
pub mod types;

use std::any::Any;
use std::fmt;

/// Core event trait
pub trait Event: Any + fmt::Debug + Send {
    /// Let the mediator know this event has been handled
    fn event_handled(&mut self);

    /// Check if a listener has claimed this event
    fn has_been_handled(&self) -> bool;

    /// Cast to Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Cast to mutable Any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Event {
    /// Downcast to a concrete event type
    pub fn downcast_ref<E: Event>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }

    /// Mutably downcast to a concrete event type
    pub fn downcast_mut<E: Event>(&mut self) -> Option<&mut E> {
        self.as_any_mut().downcast_mut::<E>()
    }
}

/// Type alias for boxed event
pub type BoxedEvent = Box<dyn Event>;

/// Re-export important types
pub use types::{BasicEvent, DataEvent};
