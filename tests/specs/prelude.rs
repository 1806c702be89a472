//! Shared helpers for behavioral specs.

pub use faultline_core::{
    BoxError, DispatchConfig, DispatchError, Discipline, FaultRecord, FaultSink, Outcome,
    SafeDispatch, SubscriberList, SuppressedFaults,
};
pub use std::sync::{Arc, Mutex};

/// Thread-safe append-only log of strings
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn sorted(&self) -> Vec<String> {
        let mut entries = self.entries();
        entries.sort();
        entries
    }
}

/// An isolated hub whose single listener records every report
/// as `"{source} | {message}"`
pub fn recording_hub() -> (Arc<SuppressedFaults>, Journal) {
    let hub = Arc::new(SuppressedFaults::new());
    let journal = Journal::default();
    let log = journal.clone();
    hub.subscribe_fn(move |source, record| {
        log.push(format!("{source} | {}", record.message()));
        Ok(())
    });
    (hub, journal)
}

/// A list of three named subscribers; `B` fails with "x"
pub fn abc(journal: &Journal) -> SubscriberList<str, u32> {
    let list: SubscriberList<str, u32> = SubscriberList::new();
    for name in ["A", "B", "C"] {
        let journal = journal.clone();
        list.add_named(name, move |_, _| {
            journal.push(name);
            if name == "B" {
                return Err("x".into());
            }
            Ok(())
        });
    }
    list
}
