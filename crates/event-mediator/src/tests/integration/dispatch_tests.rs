#![cfg(test)]

use std::sync::Arc;

use crate::event::{DataEvent, Event};
use crate::mediator::{Listener, Mediator, MediatorInterface, Priority, Result, StaticSubscriber};
use crate::tests::common::{call_log, calls, handling, recording};

#[derive(Debug, Default)]
struct Order {
    total: u32,
    steps: Vec<&'static str>,
}

fn step(name: &'static str, add: u32) -> Listener {
    Listener::closure(move |event, _event_name, _mediator| {
        let order = event
            .downcast_mut::<DataEvent<Order>>()
            .ok_or("expected an order event")?;
        order.data_mut().total += add;
        order.data_mut().steps.push(name);
        Ok(())
    })
}

#[test]
fn test_order_workflow_end_to_end() -> Result<()> {
    let mut mediator = Mediator::new();
    let subscriber = StaticSubscriber::new()
        .on("order.placed", 0, step("price", 100))
        .on("order.placed", Priority::First, step("validate", 0))
        .on("order.placed", Priority::Last, step("shipping", 7));
    mediator.add_subscriber(&subscriber)?;
    mediator.add_listener(
        "order.placed",
        Listener::closure(|event, _event_name, _mediator| {
            event.event_handled();
            Ok(())
        }),
        Priority::Last,
    )?;
    mediator.add_listener("order.placed", step("never", 1_000), Priority::Last)?;

    let event = mediator.trigger("order.placed", Some(Box::new(DataEvent::new(Order::default()))))?;

    assert!(event.has_been_handled());
    let order = event.downcast_ref::<DataEvent<Order>>().expect("order event");
    assert_eq!(order.data().steps, vec!["validate", "price", "shipping"]);
    assert_eq!(order.data().total, 107);
    Ok(())
}

#[test]
fn test_wrong_event_type_fails_dispatch() -> Result<()> {
    let mut mediator = Mediator::new();
    mediator.add_listener("order.placed", step("price", 100), Priority::default())?;

    let err = mediator.trigger("order.placed", None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Listener for event 'order.placed' failed: expected an order event"
    );
    Ok(())
}

#[test]
fn test_removal_during_dispatch_applies_to_next_trigger() -> Result<()> {
    let log = call_log();
    let mut mediator = Mediator::new();
    let victim = recording(&log, "victim");
    let remover = {
        let log = Arc::clone(&log);
        let victim = victim.clone();
        Listener::closure(move |_event, event_name, mediator| {
            log.lock().unwrap().push("remover".to_string());
            mediator.remove_listener(event_name, &victim, Priority::Last)?;
            Ok(())
        })
    };
    mediator.add_listener("e", remover, Priority::At(1))?;
    mediator.add_listener("e", victim, Priority::At(0))?;

    mediator.trigger("e", None)?;
    mediator.trigger("e", None)?;

    assert_eq!(calls(&log), vec!["remover", "victim", "remover"]);
    Ok(())
}

#[test]
fn test_nested_trigger_has_its_own_event() -> Result<()> {
    let log = call_log();
    let mut mediator = Mediator::new();
    let outer = {
        let log = Arc::clone(&log);
        Listener::closure(move |event, _event_name, mediator| {
            mediator.trigger("audit", None)?;
            log.lock().unwrap().push(format!("outer handled: {}", event.has_been_handled()));
            Ok(())
        })
    };
    mediator.add_listener("request", outer, Priority::First)?;
    mediator.add_listener("request", recording(&log, "request tail"), Priority::Last)?;
    mediator.add_listener("audit", handling(&log, "audit"), Priority::default())?;
    mediator.add_listener("audit", recording(&log, "audit tail"), Priority::Last)?;

    let event = mediator.trigger("request", None)?;

    assert!(!event.has_been_handled());
    assert_eq!(calls(&log), vec!["audit", "outer handled: false", "request tail"]);
    Ok(())
}
