// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide sink for suppressed faults
//!
//! Faults that no caller handled end up here and are handed to the hub's
//! listeners. Listeners are *not* protected by the mechanism they listen
//! to: a listener fault becomes [`DispatchError::Listener`] and propagates
//! out of `report`, and out of whatever dispatch produced the report. It
//! is never reported back into the hub.

use super::dispatch::SafeDispatch;
use super::list::SubscriberList;
use super::subscription::{BoxError, FnSubscriber, Handler, Subscriber, SubscriberId};
use crate::error::DispatchError;
use crate::fault::{Fault, FaultRecord};
use std::sync::{Mutex, OnceLock};

/// Name of the hub in listener fault messages
pub const FACILITY: &str = "faultline::SuppressedFaults";

/// Destination for faults that were caught but not otherwise handled
pub trait FaultSink: Send + Sync {
    /// Deliver a fault; `source` names the facility that caught it
    fn report(&self, source: &str, record: FaultRecord) -> Result<(), DispatchError>;
}

/// The suppressed-fault hub
///
/// Listeners receive `(source, record)` in registration order. With no
/// listeners, reports are dropped.
pub struct SuppressedFaults {
    listeners: SubscriberList<str, FaultRecord>,
    /// Guards subscribe, unsubscribe and the report snapshot
    lock: Mutex<()>,
}

impl SuppressedFaults {
    /// Create an isolated hub
    ///
    /// Producers use [`global`]; separate instances keep tests independent.
    pub fn new() -> Self {
        Self {
            listeners: SubscriberList::new(),
            lock: Mutex::new(()),
        }
    }

    pub fn subscribe(
        &self,
        listener: impl Subscriber<str, FaultRecord> + 'static,
    ) -> SubscriberId {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let id = self.listeners.add(listener);
        tracing::debug!(listener = %id, "suppressed fault listener subscribed");
        id
    }

    pub fn subscribe_fn<F>(&self, f: F) -> SubscriberId
    where
        F: Fn(&str, &FaultRecord) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.subscribe(FnSubscriber::new(f))
    }

    /// Remove a listener; returns false if it was not subscribed
    pub fn unsubscribe(&self, id: &SubscriberId) -> bool {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.listeners.len()
    }
}

impl Default for SuppressedFaults {
    fn default() -> Self {
        Self::new()
    }
}

impl FaultSink for SuppressedFaults {
    fn report(&self, source: &str, record: FaultRecord) -> Result<(), DispatchError> {
        if self.listener_count() == 0 {
            tracing::trace!(
                source,
                message = record.message(),
                "no listeners, fault dropped"
            );
            return Ok(());
        }

        // The default fault route reports to a hub; listeners must fail loud instead
        SafeDispatch::new(&self.listeners)
            .lock(&self.lock)
            .on_fault(listener_failed)
            .invoke(source, &record)
    }
}

fn listener_failed(
    fault: Fault,
    listener: &Handler<str, FaultRecord>,
) -> Result<(), DispatchError> {
    Err(DispatchError::Listener {
        facility: FACILITY,
        identity: listener.identity(),
        message: fault.to_string(),
        source: fault,
    })
}

static GLOBAL: OnceLock<SuppressedFaults> = OnceLock::new();

/// The process-wide hub, created on first use
pub fn global() -> &'static SuppressedFaults {
    GLOBAL.get_or_init(SuppressedFaults::new)
}

#[cfg(test)]
#[path = "hub_tests.rs"]
mod tests;
