#![cfg(test)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::container::{ContainerError, ServiceRegistry};
use crate::event::Event;
use crate::mediator::{Buckets, Listener, ListenerResult, MediatorInterface, Service};

/// Shared record of which listeners ran, in call order
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Listener that appends `label` to the log
pub fn recording(log: &CallLog, label: &str) -> Listener {
    let log = Arc::clone(log);
    let label = label.to_string();
    Listener::closure(move |_event, _event_name, _mediator| {
        log.lock().unwrap().push(label.clone());
        Ok(())
    })
}

/// Listener that appends `label` to the log and then handles the event
pub fn handling(log: &CallLog, label: &str) -> Listener {
    let log = Arc::clone(log);
    let label = label.to_string();
    Listener::closure(move |event, _event_name, _mediator| {
        log.lock().unwrap().push(label.clone());
        event.event_handled();
        Ok(())
    })
}

/// Listener that always fails
pub fn failing(message: &'static str) -> Listener {
    Listener::closure(move |_event, _event_name, _mediator| Err(message.into()))
}

/// Concrete priorities of a snapshot, in iteration order
pub fn priorities<L>(buckets: &Buckets<L>) -> Vec<i64> {
    buckets.iter().map(|(priority, _)| *priority).collect()
}

/// Service that logs `name::method` for every call; `handle` also handles the event
pub struct RecordingService {
    name: String,
    methods: Vec<String>,
    log: CallLog,
}

impl RecordingService {
    pub fn new(name: &str, methods: &[&str], log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            methods: methods.iter().map(|m| m.to_string()).collect(),
            log: Arc::clone(log),
        }
    }

    pub fn shared(name: &str, methods: &[&str], log: &CallLog) -> Arc<dyn Service> {
        Arc::new(Self::new(name, methods, log))
    }
}

impl Service for RecordingService {
    fn call(
        &self,
        method: &str,
        event: &mut dyn Event,
        _event_name: &str,
        _mediator: &mut dyn MediatorInterface,
    ) -> ListenerResult {
        self.log.lock().unwrap().push(format!("{}::{}", self.name, method));
        if method == "handle" {
            event.event_handled();
        }
        Ok(())
    }

    fn responds_to(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }
}

/// Register a `RecordingService` factory that bumps `built` every time it runs
pub fn register_counted(
    registry: &mut ServiceRegistry,
    name: &str,
    methods: &[&str],
    log: &CallLog,
    built: &Arc<AtomicUsize>,
) {
    let service_name = name.to_string();
    let methods: Vec<String> = methods.iter().map(|m| m.to_string()).collect();
    let log = Arc::clone(log);
    let built = Arc::clone(built);
    registry.register(name, move || -> Result<Arc<dyn Service>, ContainerError> {
        built.fetch_add(1, Ordering::SeqCst);
        let methods: Vec<&str> = methods.iter().map(String::as_str).collect();
        Ok(RecordingService::shared(&service_name, &methods, &log))
    });
}
