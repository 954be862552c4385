//! # Event Mediator Core
//!
//! The listener registry and the synchronous dispatch engine.
//!
//! ## Key Components:
//!
//! - [`MediatorInterface`]: the object safe contract every mediator
//!   implements; listeners receive `&mut dyn MediatorInterface` so they can
//!   call back into whichever mediator dispatched them.
//! - [`Mediator`](dispatcher::Mediator): the plain registry.
//! - [`Listener`](listener::Listener) / [`Service`](listener::Service):
//!   listener shapes and the object-with-methods contract.
//! - [`Priority`](priority::Priority): concrete or symbolic (`first`/`last`)
//!   priorities.
//! - [`Subscriber`](subscriber::Subscriber): declarative batches.
//! - [`SharedMediator`](shared::SharedMediator): a single lock around a
//!   mediator for multi-threaded hosts.
//!
//! Dispatch walks priorities from highest to lowest, calls listeners in the
//! order they were added, and stops as soon as the event reports it has been
//! handled.
pub mod dispatcher;
pub mod error;
pub mod listener;
pub mod priority;
pub mod shared;
pub mod subscriber;
pub mod table;
pub(crate) mod validation;

use crate::event::BoxedEvent;

pub use dispatcher::Mediator;
pub use error::{ListenerError, MediatorError, Result};
pub use listener::{Listener, ListenerFn, ListenerResult, Service, ServiceRef};
pub use priority::Priority;
pub use shared::SharedMediator;
pub use subscriber::{EventListenerMap, PriorityListeners, StaticSubscriber, Subscriber};
pub use table::{Buckets, ListenerMap, ListenerTable};

/// Registry and dispatch contract shared by every mediator
pub trait MediatorInterface: Send {
    /// Register `listener` for `event_name`. Adding a listener that already
    /// occupies the resolved bucket is a no-op.
    fn add_listener(&mut self, event_name: &str, listener: Listener, priority: Priority) -> Result<()>;

    /// Register a whole declaration; nothing is applied if any part is malformed
    fn add_listeners_by_event_list(&mut self, events: &EventListenerMap) -> Result<()>;

    fn add_subscriber(&mut self, subscriber: &dyn Subscriber) -> Result<()> {
        self.add_listeners_by_event_list(&subscriber.subscribed_events())
    }

    /// Sorted snapshot of one event's buckets, highest priority first
    fn get_listeners(&mut self, event_name: &str) -> Result<Buckets>;

    /// Sorted snapshot of every event's buckets
    fn get_all_listeners(&mut self) -> Result<ListenerMap>;

    fn has_listeners(&mut self, event_name: &str) -> Result<bool> {
        Ok(!self.get_listeners(event_name)?.is_empty())
    }

    fn has_any_listeners(&mut self) -> Result<bool> {
        Ok(!self.get_all_listeners()?.is_empty())
    }

    /// Remove one copy of `listener`; see [`ListenerTable::remove`] for how
    /// `priority` picks the bucket(s) searched
    fn remove_listener(&mut self, event_name: &str, listener: &Listener, priority: Priority) -> Result<()>;

    fn remove_listeners_by_event_list(&mut self, events: &EventListenerMap) -> Result<()>;

    fn remove_subscriber(&mut self, subscriber: &dyn Subscriber) -> Result<()> {
        self.remove_listeners_by_event_list(&subscriber.subscribed_events())
    }

    /// Dispatch `event` (or a fresh [`BasicEvent`](crate::event::BasicEvent))
    /// to the listeners of `event_name` and hand it back
    fn trigger(&mut self, event_name: &str, event: Option<BoxedEvent>) -> Result<BoxedEvent>;
}

// Test module declaration
#[cfg(test)]
mod tests;
