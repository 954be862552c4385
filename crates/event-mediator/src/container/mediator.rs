use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::container::{ContainerMediatorInterface, ServiceContainer};
use crate::event::BoxedEvent;
use crate::mediator::dispatcher::dispatch;
use crate::mediator::subscriber::apply_event_list;
use crate::mediator::validation::{check_allowed_listener, check_allowed_service_listener, check_event_name};
use crate::mediator::{
    Buckets, EventListenerMap, Listener, ListenerMap, ListenerTable, Mediator, MediatorInterface, Priority,
    Result, Service, ServiceRef,
};

/// Mediator whose service listeners are resolved through a [`ServiceContainer`]
/// the first time their event is looked up.
///
/// Per event the container layer moves through
/// `Unregistered -> Declared -> Loaded`: declaring a service listener makes an
/// event `Declared`; the first [`get_listeners`](MediatorInterface::get_listeners)
/// or [`trigger`](MediatorInterface::trigger) touching it resolves every
/// declared service and makes it `Loaded`. There is no unload; removing the
/// last service listener returns the event to `Unregistered`.
pub struct ContainerMediator<C> {
    mediator: Mediator,
    service_listeners: ListenerTable<ServiceRef>,
    loaded_services: BTreeSet<String>,
    /// The listener each loaded service entry was folded into, so removal
    /// never depends on the container handing back the same instance again
    resolved: BTreeMap<ResolvedKey, Listener>,
    container: C,
}

/// `(event name, concrete priority, service reference)`
type ResolvedKey = (String, i64, ServiceRef);

/// Everything a batch may change, restored when the batch fails midway
type Snapshot = (Mediator, ListenerTable<ServiceRef>, BTreeSet<String>, BTreeMap<ResolvedKey, Listener>);

// Manual Debug implementation, the container itself is opaque
impl<C> fmt::Debug for ContainerMediator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerMediator")
            .field("mediator", &self.mediator)
            .field("service_listener_count", &self.service_listeners.total_count())
            .field("loaded_services", &self.loaded_services)
            .finish_non_exhaustive()
    }
}

impl<C: ServiceContainer + Default> Default for ContainerMediator<C> {
    fn default() -> Self {
        Self::with_container(C::default())
    }
}

impl<C: ServiceContainer> ContainerMediator<C> {
    /// Create a mediator backed by a fresh default container
    pub fn new() -> Self
    where
        C: Default,
    {
        Self::default()
    }

    pub fn with_container(container: C) -> Self {
        Self {
            mediator: Mediator::new(),
            service_listeners: ListenerTable::new(),
            loaded_services: BTreeSet::new(),
            resolved: BTreeMap::new(),
            container,
        }
    }

    pub fn service_container(&self) -> &C {
        &self.container
    }

    pub fn service_container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// Whether the event's service listeners have been folded into the listener table
    pub fn is_loaded(&self, event_name: &str) -> bool {
        self.loaded_services.contains(event_name)
    }

    pub fn loaded_services(&self) -> impl Iterator<Item = &str> {
        self.loaded_services.iter().map(String::as_str)
    }

    /// Resolve service listeners that have not been loaded yet, for one event
    /// or (with `None`) for every event.
    ///
    /// This is the read-with-side-effect step behind `get_listeners` and
    /// `trigger`. It is idempotent: a loaded event is never resolved again.
    /// An event is only marked loaded once all of its services resolved, and
    /// nothing is added to the listener table for it if any one fails.
    pub fn resolve_services(&mut self, event_name: Option<&str>) -> Result<()> {
        let pending: Vec<String> = match event_name {
            Some(event_name) => {
                if self.service_listeners.contains_event(event_name) && !self.is_loaded(event_name) {
                    vec![event_name.to_string()]
                } else {
                    Vec::new()
                }
            }
            None => self
                .service_listeners
                .event_names()
                .filter(|event_name| !self.loaded_services.contains(*event_name))
                .map(str::to_string)
                .collect(),
        };

        for event_name in pending {
            let mut resolved = Vec::new();
            for (priority, service_refs) in self.service_listeners.buckets(&event_name) {
                for service_ref in service_refs {
                    let listener = self.resolve(&event_name, &service_ref)?;
                    resolved.push((priority, service_ref, listener));
                }
            }
            let count = resolved.len();
            for (priority, service_ref, listener) in resolved {
                self.fold_resolved(&event_name, priority, service_ref, listener);
            }
            debug!("Lazily loaded {} service listener(s) for event '{}'", count, event_name);
            self.loaded_services.insert(event_name);
        }
        Ok(())
    }

    /// Bind the referenced method on the live service
    fn resolve(&mut self, event_name: &str, service_ref: &ServiceRef) -> Result<Listener> {
        trace!("Resolving service '{}' for event '{}'", service_ref.service(), event_name);
        let target = self.container.get_service_by_name(service_ref.service())?;
        let listener = Listener::method(target, service_ref.method());
        check_allowed_listener(event_name, &listener)?;
        Ok(listener)
    }

    /// Insert a resolved service listener into the listener table and remember it
    fn fold_resolved(&mut self, event_name: &str, priority: i64, service_ref: ServiceRef, listener: Listener) {
        self.mediator.insert_resolved(event_name, listener.clone(), priority);
        self.resolved.insert((event_name.to_string(), priority, service_ref), listener);
    }

    fn snapshot(&self) -> Snapshot {
        (
            self.mediator.clone(),
            self.service_listeners.clone(),
            self.loaded_services.clone(),
            self.resolved.clone(),
        )
    }

    /// Run a batch so that it applies completely or leaves both tables as they were
    fn atomically<F>(&mut self, batch: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let snapshot = self.snapshot();
        let result = batch(self);
        if let Err(e) = &result {
            debug!("Rolling back service listener batch: {}", e);
            (self.mediator, self.service_listeners, self.loaded_services, self.resolved) = snapshot;
        }
        result
    }

    /// Symbolic priorities see both tables so `first`/`last` stay consistent
    /// across plain and service listeners
    fn actual_priority(&self, event_name: &str, priority: Priority) -> i64 {
        priority.resolve([self.mediator.extent(event_name), self.service_listeners.extent(event_name)])
    }
}

impl<C: ServiceContainer> MediatorInterface for ContainerMediator<C> {
    fn add_listener(&mut self, event_name: &str, listener: Listener, priority: Priority) -> Result<()> {
        check_event_name(event_name)?;
        check_allowed_listener(event_name, &listener)?;
        let priority = self.actual_priority(event_name, priority);
        self.mediator.insert_resolved(event_name, listener, priority);
        Ok(())
    }

    fn add_listeners_by_event_list(&mut self, events: &EventListenerMap) -> Result<()> {
        apply_event_list(events, check_allowed_listener, |event_name, listener, priority| {
            self.add_listener(event_name, listener.clone(), priority)
        })
    }

    fn get_listeners(&mut self, event_name: &str) -> Result<Buckets> {
        self.resolve_services(Some(event_name))?;
        self.mediator.get_listeners(event_name)
    }

    fn get_all_listeners(&mut self) -> Result<ListenerMap> {
        self.resolve_services(None)?;
        self.mediator.get_all_listeners()
    }

    fn remove_listener(&mut self, event_name: &str, listener: &Listener, priority: Priority) -> Result<()> {
        self.mediator.remove_listener(event_name, listener, priority)
    }

    fn remove_listeners_by_event_list(&mut self, events: &EventListenerMap) -> Result<()> {
        self.mediator.remove_listeners_by_event_list(events)
    }

    fn trigger(&mut self, event_name: &str, event: Option<BoxedEvent>) -> Result<BoxedEvent> {
        dispatch(self, event_name, event)
    }
}

impl<C: ServiceContainer> ContainerMediatorInterface for ContainerMediator<C> {
    type Container = C;

    fn add_service_listener(&mut self, event_name: &str, listener: Listener, priority: Priority) -> Result<()> {
        check_event_name(event_name)?;
        let service_ref = check_allowed_service_listener(event_name, &listener)?.clone();
        let priority = self.actual_priority(event_name, priority);
        // Already loaded events would never see this listener otherwise
        let resolved = if self.is_loaded(event_name) {
            Some(self.resolve(event_name, &service_ref)?)
        } else {
            None
        };
        if self.service_listeners.insert(event_name, priority, service_ref.clone()) {
            debug!("Added service listener for event '{}' at priority {}", event_name, priority);
            if let Some(resolved) = resolved {
                self.fold_resolved(event_name, priority, service_ref, resolved);
            }
        }
        Ok(())
    }

    fn add_service_listeners_by_event_list(&mut self, events: &EventListenerMap) -> Result<()> {
        self.atomically(|this| {
            apply_event_list(
                events,
                |event_name, listener| check_allowed_service_listener(event_name, listener).map(|_| ()),
                |event_name, listener, priority| this.add_service_listener(event_name, listener.clone(), priority),
            )
        })
    }

    fn get_service_listeners(&self, event_name: &str) -> Buckets<ServiceRef> {
        self.service_listeners.buckets(event_name)
    }

    fn get_all_service_listeners(&self) -> BTreeMap<String, Buckets<ServiceRef>> {
        self.service_listeners.all()
    }

    fn remove_service_listener(&mut self, event_name: &str, listener: &Listener, priority: Priority) -> Result<()> {
        check_event_name(event_name)?;
        let service_ref = check_allowed_service_listener(event_name, listener)?;
        let Some((found, _)) = self.service_listeners.locate(event_name, service_ref, priority) else {
            trace!("No service listener to remove for event '{}' ({})", event_name, priority);
            return Ok(());
        };

        self.service_listeners.remove(event_name, service_ref, Priority::At(found));
        debug!("Removed service listener for event '{}' at priority {}", event_name, found);
        let key = (event_name.to_string(), found, service_ref.clone());
        if let Some(resolved) = self.resolved.remove(&key) {
            self.mediator.remove_listener(event_name, &resolved, Priority::At(found))?;
        }
        if !self.service_listeners.contains_event(event_name) && self.loaded_services.remove(event_name) {
            debug!(
                "Event '{}' has no service listeners left ({} plain listener(s) remain)",
                event_name,
                self.mediator.listener_count(event_name)
            );
        }
        Ok(())
    }

    fn remove_service_listeners_by_event_list(&mut self, events: &EventListenerMap) -> Result<()> {
        self.atomically(|this| {
            apply_event_list(
                events,
                |event_name, listener| check_allowed_service_listener(event_name, listener).map(|_| ()),
                |event_name, listener, priority| this.remove_service_listener(event_name, listener, priority),
            )
        })
    }

    fn set_service_container(&mut self, container: C) {
        debug!("Replacing service container");
        self.container = container;
    }

    fn get_service_by_name(&mut self, service_id: &str) -> Result<Arc<dyn Service>> {
        Ok(self.container.get_service_by_name(service_id)?)
    }
}
