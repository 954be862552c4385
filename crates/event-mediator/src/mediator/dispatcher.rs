use std::fmt;

use log::{debug, trace, warn};

use crate::event::{BasicEvent, BoxedEvent};
use crate::mediator::error::{MediatorError, Result};
use crate::mediator::listener::Listener;
use crate::mediator::priority::Priority;
use crate::mediator::subscriber::{EventListenerMap, apply_event_list};
use crate::mediator::table::{Buckets, ListenerMap, ListenerTable};
use crate::mediator::validation::{check_allowed_listener, check_event_name};
use crate::mediator::MediatorInterface;

//--------------------------------------------------
// Mediator
//--------------------------------------------------

/// Listener registry and synchronous dispatch engine
#[derive(Clone, Default)]
pub struct Mediator {
    listeners: ListenerTable<Listener>,
}

// Manual Debug implementation for Mediator
impl fmt::Debug for Mediator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mediator")
            .field("event_count", &self.listeners.event_names().count())
            .field("listener_count", &self.listeners.total_count())
            .finish()
    }
}

impl Mediator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(lowest, highest)` priority currently registered for the event
    pub(crate) fn extent(&self, event_name: &str) -> Option<(i64, i64)> {
        self.listeners.extent(event_name)
    }

    /// Insert an already validated listener at a concrete priority
    pub(crate) fn insert_resolved(&mut self, event_name: &str, listener: Listener, priority: i64) -> bool {
        let added = self.listeners.insert(event_name, priority, listener);
        if added {
            debug!("Added listener for event '{}' at priority {}", event_name, priority);
        } else {
            trace!("Ignored duplicate listener for event '{}' at priority {}", event_name, priority);
        }
        added
    }

    pub(crate) fn listener_count(&self, event_name: &str) -> usize {
        self.listeners.listener_count(event_name)
    }
}

impl MediatorInterface for Mediator {
    fn add_listener(&mut self, event_name: &str, listener: Listener, priority: Priority) -> Result<()> {
        check_event_name(event_name)?;
        check_allowed_listener(event_name, &listener)?;
        let priority = priority.resolve([self.extent(event_name)]);
        self.insert_resolved(event_name, listener, priority);
        Ok(())
    }

    fn add_listeners_by_event_list(&mut self, events: &EventListenerMap) -> Result<()> {
        apply_event_list(events, check_allowed_listener, |event_name, listener, priority| {
            self.add_listener(event_name, listener.clone(), priority)
        })
    }

    fn get_listeners(&mut self, event_name: &str) -> Result<Buckets> {
        Ok(self.listeners.buckets(event_name))
    }

    fn get_all_listeners(&mut self) -> Result<ListenerMap> {
        Ok(self.listeners.all())
    }

    fn remove_listener(&mut self, event_name: &str, listener: &Listener, priority: Priority) -> Result<()> {
        check_event_name(event_name)?;
        check_allowed_listener(event_name, listener)?;
        match self.listeners.remove(event_name, listener, priority) {
            Some(removed) => debug!("Removed listener for event '{}' at priority {}", event_name, removed),
            None => trace!("No listener to remove for event '{}' ({})", event_name, priority),
        }
        Ok(())
    }

    fn remove_listeners_by_event_list(&mut self, events: &EventListenerMap) -> Result<()> {
        apply_event_list(events, check_allowed_listener, |event_name, listener, priority| {
            self.remove_listener(event_name, listener, priority)
        })
    }

    fn trigger(&mut self, event_name: &str, event: Option<BoxedEvent>) -> Result<BoxedEvent> {
        dispatch(self, event_name, event)
    }
}

//--------------------------------------------------
// Dispatch
//--------------------------------------------------

/// Run one trigger against whatever listener view `mediator` exposes.
///
/// Iterates a snapshot, so listeners may mutate the registry or trigger
/// further events while a dispatch is in progress; such changes only affect
/// later triggers.
pub(crate) fn dispatch(
    mediator: &mut dyn MediatorInterface,
    event_name: &str,
    event: Option<BoxedEvent>,
) -> Result<BoxedEvent> {
    check_event_name(event_name)?;
    let mut event = event.unwrap_or_else(|| Box::new(BasicEvent::new()) as BoxedEvent);
    let buckets = mediator.get_listeners(event_name)?;
    if buckets.is_empty() {
        trace!("No listeners for event '{}'", event_name);
        return Ok(event);
    }

    'dispatch: for (priority, listeners) in buckets {
        for listener in listeners {
            trace!("Calling listener for event '{}' at priority {}", event_name, priority);
            if let Err(source) = listener.invoke(&mut *event, event_name, mediator) {
                warn!("Listener for event '{}' failed at priority {}: {}", event_name, priority, source);
                return Err(MediatorError::ListenerFailed {
                    event_name: event_name.to_string(),
                    source,
                });
            }
            if event.has_been_handled() {
                debug!("Event '{}' handled at priority {}", event_name, priority);
                break 'dispatch;
            }
        }
    }
    Ok(event)
}
