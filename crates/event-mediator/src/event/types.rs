use std::any::Any;
use std::fmt;

use crate::event::Event;

/// The event the mediator creates when `trigger` is called without one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicEvent {
    handled: bool,
}

impl BasicEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Event for BasicEvent {
    fn event_handled(&mut self) {
        self.handled = true;
    }

    fn has_been_handled(&self) -> bool {
        self.handled
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Event carrying a caller supplied payload
///
/// Listeners reach the payload by downcasting:
///
/// ```rust,ignore
/// if let Some(order) = event.downcast_mut::<DataEvent<Order>>() {
///     order.data_mut().confirmed = true;
///     order.event_handled();
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataEvent<T> {
    data: T,
    handled: bool,
}

impl<T> DataEvent<T> {
    pub fn new(data: T) -> Self {
        Self { data, handled: false }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Consume the event and hand back its payload
    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T: fmt::Debug + Send + 'static> Event for DataEvent<T> {
    fn event_handled(&mut self) {
        self.handled = true;
    }

    fn has_been_handled(&self) -> bool {
        self.handled
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
