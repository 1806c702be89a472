//! Hub listeners receive unhandled faults and are not themselves protected.

use crate::prelude::*;
use faultline_core::TracingListener;

#[test]
fn no_listeners_means_the_fault_is_dropped() {
    let hub = Arc::new(SuppressedFaults::new());
    let calls = Journal::default();
    let list = abc(&calls);

    SafeDispatch::new(&list)
        .sink(hub.clone())
        .invoke("producer", &7)
        .unwrap();

    assert_eq!(hub.listener_count(), 0);
    assert_eq!(calls.entries(), vec!["A", "B", "C"]);
}

#[test]
fn every_listener_sees_the_report() {
    let (hub, first) = recording_hub();
    let second = Journal::default();
    let log = second.clone();
    hub.subscribe_fn(move |source, _| {
        log.push(source);
        Ok(())
    });
    hub.subscribe(TracingListener);

    let calls = Journal::default();
    let list = abc(&calls);
    SafeDispatch::new(&list)
        .sink(hub.clone())
        .invoke("producer", &7)
        .unwrap();

    assert_eq!(first.entries().len(), 1);
    assert_eq!(second.entries(), vec!["faultline_core::events::dispatch"]);
}

#[test]
fn unsubscribed_listener_hears_nothing_more() {
    let hub = Arc::new(SuppressedFaults::new());
    let heard = Journal::default();
    let log = heard.clone();
    let id = hub.subscribe_fn(move |_, record| {
        log.push(record.message());
        Ok(())
    });

    hub.report("manual", FaultRecord::new("first", BoxError::from("cause")))
        .unwrap();
    assert!(hub.unsubscribe(&id));
    hub.report("manual", FaultRecord::new("second", BoxError::from("cause")))
        .unwrap();

    assert_eq!(heard.entries(), vec!["first"]);
}

#[test]
fn broken_listener_reaches_the_producer_exactly_once() {
    let hub = Arc::new(SuppressedFaults::new());
    let attempts = Journal::default();
    let log = attempts.clone();
    hub.subscribe_fn(move |_, _| {
        log.push("attempt");
        Err("disk full".into())
    });

    let calls = Journal::default();
    let list = abc(&calls);
    let err = SafeDispatch::new(&list)
        .sink(hub.clone())
        .invoke("producer", &7)
        .unwrap_err();

    assert!(
        err.to_string()
            .starts_with("Failed in faultline::SuppressedFaults event handler \""),
        "{err}"
    );
    match err {
        DispatchError::Listener {
            facility, message, ..
        } => {
            assert_eq!(facility, "faultline::SuppressedFaults");
            assert_eq!(message, "disk full");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(attempts.entries(), vec!["attempt"]);
    // The producer's pass stopped where the error escaped
    assert_eq!(calls.entries(), vec!["A", "B"]);
}
