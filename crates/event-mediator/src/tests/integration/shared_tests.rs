#![cfg(test)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::container::{ContainerMediator, ContainerMediatorInterface, ServiceRegistry};
use crate::mediator::{Listener, Priority, SharedMediator};
use crate::tests::common::{call_log, calls, register_counted};

#[test]
fn test_shared_container_mediator_loads_once() {
    let log = call_log();
    let built = Arc::new(AtomicUsize::new(0));
    let mut registry = ServiceRegistry::new();
    register_counted(&mut registry, "counter", &["bump"], &log, &built);
    let shared = SharedMediator::new(ContainerMediator::with_container(registry));

    shared
        .with(|mediator| mediator.add_service_listener("tick", Listener::service("counter", "bump"), Priority::default()))
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..5 {
                    shared.trigger("tick", None).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert_eq!(calls(&log).len(), 20);
    assert!(shared.lock().unwrap().is_loaded("tick"));
}
