use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::mediator::{Listener, Mediator, MediatorError, MediatorInterface, Priority, Result, SharedMediator};
use crate::tests::common::{call_log, calls, recording};

fn counting(counter: &Arc<AtomicUsize>) -> Listener {
    let counter = Arc::clone(counter);
    Listener::closure(move |_event, _event_name, _mediator| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
}

#[test]
fn test_shared_mediator_across_threads() -> Result<()> {
    let shared: SharedMediator<Mediator> = SharedMediator::default();
    let counter = Arc::new(AtomicUsize::new(0));
    shared.add_listener("tick", counting(&counter), Priority::default())?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    shared.trigger("tick", None).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(counter.load(Ordering::SeqCst), 40);
    Ok(())
}

#[test]
fn test_shared_mediator_with_lock() -> Result<()> {
    let log = call_log();
    let shared = SharedMediator::new(Mediator::new());
    let listener = recording(&log, "a");

    shared.with(|mediator| {
        mediator.add_listener("e", listener.clone(), Priority::First)?;
        mediator.add_listener("e", recording(&log, "b"), Priority::Last)
    })?;
    assert!(shared.has_listeners("e")?);

    shared.trigger("e", None)?;
    assert_eq!(calls(&log), vec!["a", "b"]);

    shared.remove_listener("e", &listener, Priority::First)?;
    assert_eq!(shared.lock()?.get_listeners("e")?.len(), 1);
    Ok(())
}

#[test]
fn test_poisoned_lock_is_reported() {
    let shared = SharedMediator::new(Mediator::new());
    let clone = shared.clone();

    let _ = thread::spawn(move || {
        let _guard = clone.lock().unwrap();
        panic!("poison the mediator lock");
    })
    .join();

    assert!(matches!(
        shared.trigger("e", None),
        Err(MediatorError::Poisoned { ref component }) if component == "mediator"
    ));
}
