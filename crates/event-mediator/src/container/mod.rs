//! # Container Backed Mediation
//!
//! Service listeners name a method on a service by identifier instead of
//! holding the object. The [`ContainerMediator`] keeps them in a separate
//! table and only asks its [`ServiceContainer`] for the objects when the
//! event is first queried or triggered, then folds the bound methods into
//! the ordinary listener table exactly once per event.
//!
//! [`ServiceRegistry`] is the bundled container: named factories whose
//! services are built on first lookup and shared afterwards.
pub mod error;
pub mod mediator;
pub mod registry;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::mediator::{Buckets, EventListenerMap, Listener, Priority, Result, Service, ServiceRef, Subscriber};

pub use error::ContainerError;
pub use mediator::ContainerMediator;
pub use registry::{ServiceFactory, ServiceRegistry};

/// Adapter resolving service identifiers to live services
pub trait ServiceContainer: Send {
    fn get_service_by_name(&mut self, service_id: &str) -> std::result::Result<Arc<dyn Service>, ContainerError>;
}

/// Service listener operations layered over [`MediatorInterface`](crate::mediator::MediatorInterface)
pub trait ContainerMediatorInterface: crate::mediator::MediatorInterface {
    type Container: ServiceContainer;

    /// Register a `Listener::Service` reference; `first`/`last` account for
    /// both plain and service listeners of the event
    fn add_service_listener(&mut self, event_name: &str, listener: Listener, priority: Priority) -> Result<()>;

    fn add_service_listeners_by_event_list(&mut self, events: &EventListenerMap) -> Result<()>;

    fn add_service_subscriber(&mut self, subscriber: &dyn Subscriber) -> Result<()> {
        self.add_service_listeners_by_event_list(&subscriber.subscribed_events())
    }

    /// Raw, possibly unresolved, service listeners of one event
    fn get_service_listeners(&self, event_name: &str) -> Buckets<ServiceRef>;

    fn get_all_service_listeners(&self) -> BTreeMap<String, Buckets<ServiceRef>>;

    fn remove_service_listener(&mut self, event_name: &str, listener: &Listener, priority: Priority) -> Result<()>;

    fn remove_service_listeners_by_event_list(&mut self, events: &EventListenerMap) -> Result<()>;

    fn remove_service_subscriber(&mut self, subscriber: &dyn Subscriber) -> Result<()> {
        self.remove_service_listeners_by_event_list(&subscriber.subscribed_events())
    }

    /// Swap in a different container
    fn set_service_container(&mut self, container: Self::Container);

    fn get_service_by_name(&mut self, service_id: &str) -> Result<Arc<dyn Service>>;
}
