use std::collections::BTreeMap;

use crate::mediator::error::{MediatorError, Result};
use crate::mediator::listener::Listener;
use crate::mediator::priority::Priority;
use crate::mediator::validation::check_event_name;

/// Priorities declared for one event, each with the listeners to register at it
pub type PriorityListeners = Vec<(Priority, Vec<Listener>)>;

/// Declarative `event name -> [(priority, [listener, ...]), ...]` bundle
pub type EventListenerMap = BTreeMap<String, PriorityListeners>;

/// A passive bundle of listener declarations.
///
/// The mediator reads [`Subscriber::subscribed_events`] once per
/// add/remove call and performs the corresponding batch operation.
pub trait Subscriber {
    fn subscribed_events(&self) -> EventListenerMap;
}

/// A `Subscriber` that is nothing but its declarations
#[derive(Debug, Clone, Default)]
pub struct StaticSubscriber {
    events: EventListenerMap,
}

impl StaticSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `listener` for `event_name` at `priority`
    pub fn on(mut self, event_name: &str, priority: impl Into<Priority>, listener: Listener) -> Self {
        let priority = priority.into();
        let priorities = self.events.entry(event_name.to_string()).or_default();
        match priorities.iter_mut().find(|(p, _)| *p == priority) {
            Some((_, listeners)) => listeners.push(listener),
            None => priorities.push((priority, vec![listener])),
        }
        self
    }
}

impl Subscriber for StaticSubscriber {
    fn subscribed_events(&self) -> EventListenerMap {
        self.events.clone()
    }
}

impl From<EventListenerMap> for StaticSubscriber {
    fn from(events: EventListenerMap) -> Self {
        Self { events }
    }
}

/// Validate a whole declaration up front so a batch applies fully or not at all
pub(crate) fn check_event_list<F>(events: &EventListenerMap, check_listener: F) -> Result<()>
where
    F: Fn(&str, &Listener) -> Result<()>,
{
    for (event_name, priorities) in events {
        check_event_name(event_name)?;
        if priorities.is_empty() {
            return Err(MediatorError::EmptyPriorityList {
                event_name: event_name.clone(),
            });
        }
        for (priority, listeners) in priorities {
            if listeners.is_empty() {
                return Err(MediatorError::EmptyListenerList {
                    event_name: event_name.clone(),
                    priority: *priority,
                });
            }
            for listener in listeners {
                check_listener(event_name, listener)?;
            }
        }
    }
    Ok(())
}

/// Validate, then hand every `(event, listener, priority)` triple to `apply`
pub(crate) fn apply_event_list<F, A>(events: &EventListenerMap, check_listener: F, mut apply: A) -> Result<()>
where
    F: Fn(&str, &Listener) -> Result<()>,
    A: FnMut(&str, &Listener, Priority) -> Result<()>,
{
    check_event_list(events, check_listener)?;
    for (event_name, priorities) in events {
        for (priority, listeners) in priorities {
            for listener in listeners {
                apply(event_name, listener, *priority)?;
            }
        }
    }
    Ok(())
}
