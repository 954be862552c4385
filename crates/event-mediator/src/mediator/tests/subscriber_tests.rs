use crate::mediator::subscriber::check_event_list;
use crate::mediator::validation::check_allowed_listener;
use crate::mediator::{EventListenerMap, MediatorError, Priority, StaticSubscriber, Subscriber};
use crate::tests::common::{call_log, recording};

#[test]
fn test_static_subscriber_groups_by_priority() {
    let log = call_log();
    let a = recording(&log, "a");
    let b = recording(&log, "b");
    let c = recording(&log, "c");

    let subscriber = StaticSubscriber::new()
        .on("e", 0, a.clone())
        .on("e", Priority::Last, b.clone())
        .on("e", 0, c.clone());

    let events = subscriber.subscribed_events();
    assert_eq!(events.len(), 1);
    assert_eq!(
        events["e"],
        vec![(Priority::At(0), vec![a, c]), (Priority::Last, vec![b])]
    );
}

#[test]
fn test_static_subscriber_from_map() {
    let log = call_log();
    let mut events = EventListenerMap::new();
    events.insert("e".to_string(), vec![(Priority::First, vec![recording(&log, "a")])]);

    let subscriber = StaticSubscriber::from(events.clone());
    assert_eq!(subscriber.subscribed_events(), events);
}

#[test]
fn test_check_event_list_reports_structure_errors() {
    let log = call_log();
    let mut events = EventListenerMap::new();
    events.insert("e".to_string(), vec![(Priority::At(1), vec![recording(&log, "a")])]);
    assert!(check_event_list(&events, check_allowed_listener).is_ok());

    events.insert("".to_string(), vec![(Priority::At(1), vec![recording(&log, "a")])]);
    assert!(matches!(
        check_event_list(&events, check_allowed_listener),
        Err(MediatorError::EmptyEventName)
    ));

    events.remove("");
    events.insert("f".to_string(), vec![(Priority::First, Vec::new())]);
    assert!(matches!(
        check_event_list(&events, check_allowed_listener),
        Err(MediatorError::EmptyListenerList {
            priority: Priority::First,
            ..
        })
    ));
}
