//! # Event Mediator
//!
//! An in-process publish/subscribe dispatcher. Listeners are registered
//! against event names with priorities; triggering an event calls them from
//! the highest priority down, in registration order within a priority, until
//! one of them marks the event handled.
//!
//! ```rust,ignore
//! use event_mediator::{Listener, Mediator, MediatorInterface, Priority};
//!
//! let mut mediator = Mediator::new();
//! mediator.add_listener(
//!     "user.created",
//!     Listener::closure(|event, _name, _mediator| {
//!         event.event_handled();
//!         Ok(())
//!     }),
//!     Priority::First,
//! )?;
//! let event = mediator.trigger("user.created", None)?;
//! assert!(event.has_been_handled());
//! ```
//!
//! [`ContainerMediator`] adds service listeners: `(service, method)` pairs
//! that are only resolved through a [`ServiceContainer`] when their event is
//! first looked up.
pub mod config;
pub mod container;
pub mod event;
pub mod logging;
pub mod mediator;

// Re-export key public types/traits
pub use config::{ConfigError, ConfigFormat, MediatorConfig};
pub use container::{
    ContainerError, ContainerMediator, ContainerMediatorInterface, ServiceContainer, ServiceRegistry,
};
pub use event::{BasicEvent, BoxedEvent, DataEvent, Event};
pub use logging::{LoggingConfig, init_logging};
pub use mediator::{
    Listener, Mediator, MediatorError, MediatorInterface, Priority, Result, Service, ServiceRef, SharedMediator,
    StaticSubscriber, Subscriber,
};

#[cfg(test)]
mod tests;
