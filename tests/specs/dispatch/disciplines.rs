//! Every discipline invokes every subscriber and isolates the faulty one.

use crate::prelude::*;

const SOURCE: &str = "faultline_core::events::dispatch";

fn assert_one_report_about_b(journal: &Journal) {
    let reports = journal.entries();
    assert_eq!(reports.len(), 1, "{reports:?}");
    assert!(reports[0].starts_with(SOURCE), "{}", reports[0]);
    assert!(reports[0].contains("| SafeInvoke caught exception in "), "{}", reports[0]);
    assert!(reports[0].contains("SubscriberList"), "{}", reports[0]);
    assert!(reports[0].ends_with("event handler \"B\": x"), "{}", reports[0]);
}

#[test]
fn sequential_runs_in_order_on_the_caller() {
    let (hub, reports) = recording_hub();
    let calls = Journal::default();
    let list = abc(&calls);

    SafeDispatch::new(&list).sink(hub).invoke("producer", &7).unwrap();

    assert_eq!(calls.entries(), vec!["A", "B", "C"]);
    assert_one_report_about_b(&reports);
}

#[test]
fn parallel_returns_after_everyone_ran() {
    let (hub, reports) = recording_hub();
    let calls = Journal::default();
    let list = abc(&calls);

    SafeDispatch::new(&list)
        .sink(hub)
        .invoke_parallel("producer", &7)
        .unwrap();

    assert_eq!(calls.sorted(), vec!["A", "B", "C"]);
    assert_one_report_about_b(&reports);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn fire_and_forget_completes_in_the_background() {
    let (hub, reports) = recording_hub();
    let calls = Journal::default();
    let list = abc(&calls);

    let detached = SafeDispatch::new(&list)
        .sink(hub)
        .spawn(Arc::from("producer"), Arc::new(7))
        .unwrap();
    assert_eq!(detached.len(), 3);
    detached.join().await.unwrap();

    assert_eq!(calls.sorted(), vec!["A", "B", "C"]);
    assert_one_report_about_b(&reports);
}

#[test]
fn fire_and_forget_needs_a_runtime() {
    let calls = Journal::default();
    let list = abc(&calls);

    let err = SafeDispatch::new(&list)
        .spawn(Arc::from("producer"), Arc::new(7))
        .unwrap_err();

    assert!(matches!(err, DispatchError::NoRuntime));
    assert!(calls.entries().is_empty());
}

#[test]
fn empty_list_is_a_no_op_under_every_discipline() {
    let (hub, reports) = recording_hub();
    let list: SubscriberList<str, u32> = SubscriberList::new();
    let dispatch = SafeDispatch::new(&list).sink(hub);

    for discipline in [
        Discipline::Sequential,
        Discipline::Parallel,
        Discipline::FireAndForget,
    ] {
        let outcome = dispatch
            .dispatch(Arc::from("producer"), Arc::new(7), discipline)
            .unwrap();
        if let Some(detached) = outcome.into_detached() {
            assert!(detached.is_empty());
        }
    }
    assert!(reports.entries().is_empty());
}

#[test]
fn configured_discipline_drives_run() {
    let (hub, reports) = recording_hub();
    let calls = Journal::default();
    let list = abc(&calls);
    let config = DispatchConfig::from_toml(
        r#"
discipline = "parallel"
max_parallelism = 2
"#,
    )
    .unwrap();

    let outcome = SafeDispatch::new(&list)
        .config(&config)
        .sink(hub)
        .run(Arc::from("producer"), Arc::new(7))
        .unwrap();

    assert!(matches!(outcome, Outcome::Completed));
    assert_eq!(calls.sorted(), vec!["A", "B", "C"]);
    assert_one_report_about_b(&reports);
}

#[test]
fn zero_parallelism_is_rejected() {
    assert!(DispatchConfig::from_toml("max_parallelism = 0").is_err());
}
