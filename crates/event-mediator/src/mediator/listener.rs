use std::fmt;
use std::sync::Arc;

use crate::event::Event;
use crate::mediator::MediatorInterface;
use crate::mediator::error::ListenerError;

/// What a listener hands back: `Err` aborts the dispatch
pub type ListenerResult = std::result::Result<(), ListenerError>;

/// Signature every direct listener has: `(event, event_name, mediator)`
pub type ListenerFn =
    dyn Fn(&mut dyn Event, &str, &mut dyn MediatorInterface) -> ListenerResult + Send + Sync;

/// An object whose methods can be registered as listeners.
///
/// Services are what a [`ServiceContainer`](crate::container::ServiceContainer)
/// hands back for a service identifier; the mediator binds one of their
/// methods by name.
pub trait Service: Send + Sync {
    /// Invoke `method` as a listener
    fn call(
        &self,
        method: &str,
        event: &mut dyn Event,
        event_name: &str,
        mediator: &mut dyn MediatorInterface,
    ) -> ListenerResult;

    /// Whether `method` names something [`Service::call`] can dispatch to
    fn responds_to(&self, method: &str) -> bool;
}

/// Unresolved reference to a method on a container managed service
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceRef {
    service: String,
    method: String,
}

impl ServiceRef {
    pub fn new(service: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            method: method.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

impl fmt::Display for ServiceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.service, self.method)
    }
}

/// A listener registration.
///
/// Equality is identity, not behaviour: two `Closure`s are equal only when
/// they share the same allocation (clones of one `Listener`), two `Method`s
/// when they bind the same method name on the same service instance, and two
/// `Service` references when identifier and method match.
#[derive(Clone)]
pub enum Listener {
    /// Plain closure
    Closure(Arc<ListenerFn>),
    /// Method bound on a live service object
    Method {
        target: Arc<dyn Service>,
        method: String,
    },
    /// Service method resolved lazily by a container mediator
    Service(ServiceRef),
}

impl Listener {
    /// Wrap a closure as a listener
    pub fn closure<F>(f: F) -> Self
    where
        F: Fn(&mut dyn Event, &str, &mut dyn MediatorInterface) -> ListenerResult
            + Send
            + Sync
            + 'static,
    {
        Listener::Closure(Arc::new(f))
    }

    /// Bind `method` on an existing service object
    pub fn method(target: Arc<dyn Service>, method: impl Into<String>) -> Self {
        Listener::Method {
            target,
            method: method.into(),
        }
    }

    /// Reference `method` on a service the container will provide later
    pub fn service(service: impl Into<String>, method: impl Into<String>) -> Self {
        Listener::Service(ServiceRef::new(service, method))
    }

    pub fn is_service(&self) -> bool {
        matches!(self, Listener::Service(_))
    }

    pub fn as_service_ref(&self) -> Option<&ServiceRef> {
        match self {
            Listener::Service(service_ref) => Some(service_ref),
            _ => None,
        }
    }

    /// Call the listener with the standard `(event, event_name, mediator)` arguments
    pub fn invoke(
        &self,
        event: &mut dyn Event,
        event_name: &str,
        mediator: &mut dyn MediatorInterface,
    ) -> ListenerResult {
        match self {
            Listener::Closure(f) => f(event, event_name, mediator),
            Listener::Method { target, method } => target.call(method, event, event_name, mediator),
            Listener::Service(service_ref) => {
                Err(format!("service listener {} has not been resolved", service_ref).into())
            }
        }
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Listener::Closure(a), Listener::Closure(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (
                Listener::Method { target: a, method: method_a },
                Listener::Method { target: b, method: method_b },
            ) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)) && method_a == method_b,
            (Listener::Service(a), Listener::Service(b)) => a == b,
            _ => false,
        }
    }
}

// Manual Debug implementation, closures and services have no Debug of their own
impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Closure(func) => f
                .debug_tuple("Closure")
                .field(&Arc::as_ptr(func).cast::<()>())
                .finish(),
            Listener::Method { target, method } => f
                .debug_struct("Method")
                .field("target", &Arc::as_ptr(target).cast::<()>())
                .field("method", method)
                .finish(),
            Listener::Service(service_ref) => f.debug_tuple("Service").field(service_ref).finish(),
        }
    }
}

impl From<ServiceRef> for Listener {
    fn from(service_ref: ServiceRef) -> Self {
        Listener::Service(service_ref)
    }
}
