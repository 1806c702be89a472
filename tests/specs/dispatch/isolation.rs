//! Fault boundaries around each subscriber, and fault handlers.

use crate::prelude::*;

#[test]
fn panicking_subscriber_does_not_stop_the_pass() {
    let (hub, reports) = recording_hub();
    let calls = Journal::default();
    let list: SubscriberList<str, u32> = SubscriberList::new();
    list.add_named("boom", |_, _| panic!("sensor exploded"));
    let log = calls.clone();
    list.add_named("after", move |_, value| {
        log.push(format!("after {value}"));
        Ok(())
    });

    SafeDispatch::new(&list).sink(hub).invoke("producer", &3).unwrap();

    assert_eq!(calls.entries(), vec!["after 3"]);
    let reports = reports.entries();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].ends_with("event handler \"boom\": sensor exploded"), "{}", reports[0]);
}

#[test]
fn fault_handler_replaces_the_hub() {
    let (hub, reports) = recording_hub();
    let calls = Journal::default();
    let list = abc(&calls);
    let handled = Journal::default();
    let log = handled.clone();

    SafeDispatch::new(&list)
        .sink(hub)
        .on_fault(move |fault, handler| {
            log.push(format!("{}: {fault}", handler.identity()));
            Ok(())
        })
        .invoke("producer", &7)
        .unwrap();

    assert_eq!(calls.entries(), vec!["A", "B", "C"]);
    assert_eq!(handled.entries(), vec!["B: x"]);
    assert!(reports.entries().is_empty());
}

#[test]
fn failing_fault_handler_escapes_sequential_pass() {
    let calls = Journal::default();
    let list = abc(&calls);

    let err = SafeDispatch::new(&list)
        .on_fault(|_, handler| Err(DispatchError::fault_handler(handler, "handler gave up")))
        .invoke("producer", &7)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "fault handler failed for subscriber \"B\": handler gave up"
    );
    // The pass stops where the error escaped
    assert_eq!(calls.entries(), vec!["A", "B"]);
}

#[test]
fn failing_fault_handler_in_parallel_pass_still_runs_everyone() {
    let calls = Journal::default();
    let list = abc(&calls);

    let err = SafeDispatch::new(&list)
        .on_fault(|_, handler| Err(DispatchError::fault_handler(handler, "handler gave up")))
        .invoke_parallel("producer", &7)
        .unwrap_err();

    assert!(matches!(err, DispatchError::FaultHandler { .. }));
    assert_eq!(calls.sorted(), vec!["A", "B", "C"]);
}

#[test]
fn mutations_during_a_pass_apply_to_the_next_one() {
    let (hub, _reports) = recording_hub();
    let calls = Journal::default();
    let list: Arc<SubscriberList<str, u32>> = Arc::new(SubscriberList::new());

    let weak = Arc::downgrade(&list);
    let log = calls.clone();
    list.add_named("spawner", move |_, _| {
        log.push("spawner");
        if let Some(list) = weak.upgrade() {
            let log = log.clone();
            list.add_named("late", move |_, _| {
                log.push("late");
                Ok(())
            });
        }
        Ok(())
    });

    let dispatch = SafeDispatch::new(&*list).sink(hub);
    dispatch.invoke("producer", &1).unwrap();
    assert_eq!(calls.entries(), vec!["spawner"]);

    dispatch.invoke("producer", &2).unwrap();
    assert_eq!(calls.entries(), vec!["spawner", "spawner", "late"]);
}
