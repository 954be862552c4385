use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::event::BoxedEvent;
use crate::mediator::error::{MediatorError, Result};
use crate::mediator::listener::Listener;
use crate::mediator::priority::Priority;
use crate::mediator::MediatorInterface;

//--------------------------------------------------
// SharedMediator (Public API)
//--------------------------------------------------

/// Thread-safe handle around a single mediator.
///
/// The mediator has no internal synchronization: the registry and the lazy
/// load state sit behind this one lock. Listeners receive the mediator itself
/// during dispatch, so they must not call back through the handle.
pub struct SharedMediator<M> {
    mediator: Arc<Mutex<M>>,
}

impl<M> Clone for SharedMediator<M> {
    fn clone(&self) -> Self {
        Self {
            mediator: Arc::clone(&self.mediator),
        }
    }
}

// Manual Debug impl for SharedMediator
impl<M> fmt::Debug for SharedMediator<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedMediator")
            .field("handles", &Arc::strong_count(&self.mediator))
            .finish_non_exhaustive()
    }
}

impl<M: MediatorInterface> SharedMediator<M> {
    pub fn new(mediator: M) -> Self {
        Self {
            mediator: Arc::new(Mutex::new(mediator)),
        }
    }

    /// Take the lock for a sequence of calls
    pub fn lock(&self) -> Result<MutexGuard<'_, M>> {
        self.mediator.lock().map_err(|_| MediatorError::Poisoned {
            component: "mediator".to_string(),
        })
    }

    /// Run `f` with the lock held
    pub fn with<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut M) -> Result<R>,
    {
        let mut mediator = self.lock()?;
        f(&mut mediator)
    }

    pub fn add_listener(&self, event_name: &str, listener: Listener, priority: Priority) -> Result<()> {
        self.lock()?.add_listener(event_name, listener, priority)
    }

    pub fn remove_listener(&self, event_name: &str, listener: &Listener, priority: Priority) -> Result<()> {
        self.lock()?.remove_listener(event_name, listener, priority)
    }

    pub fn has_listeners(&self, event_name: &str) -> Result<bool> {
        self.lock()?.has_listeners(event_name)
    }

    pub fn trigger(&self, event_name: &str, event: Option<BoxedEvent>) -> Result<BoxedEvent> {
        self.lock()?.trigger(event_name, event)
    }
}

impl<M: MediatorInterface + Default> Default for SharedMediator<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}
