// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Safe dispatch of one occurrence to every subscriber in a list
//!
//! Each pass snapshots the list under a lock, releases the lock, then
//! invokes the subscribers under the chosen [`Discipline`]. Every single
//! invocation sits inside its own fault boundary:
//!
//! ```text
//! fault ──► on_fault handler set? ──yes──► handler(fault, &Handler)  (its Err escapes)
//!                   │
//!                   no
//!                   ▼
//!           FaultRecord ──► FaultSink::report  (global hub by default; its Err escapes)
//! ```

use super::detached::Detached;
use super::hub::{self, FaultSink};
use super::list::SubscriberList;
use super::subscription::Handler;
use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::fault::{Fault, FaultRecord};
use rayon::prelude::*;
use serde::Deserialize;
use std::any::type_name;
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;

/// How subscribers are scheduled within one pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    /// One at a time, in snapshot order, on the calling thread
    #[default]
    Sequential,
    /// Fork-join on the shared worker pool; blocks until every subscriber returns
    Parallel,
    /// One blocking-pool task per subscriber; returns immediately
    FireAndForget,
}

impl Discipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::Sequential => "sequential",
            Discipline::Parallel => "parallel",
            Discipline::FireAndForget => "fire_and_forget",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`SafeDispatch::dispatch`]
#[derive(Debug)]
pub enum Outcome {
    /// Every subscriber has been invoked
    Completed,
    /// Subscribers were scheduled and may still be running
    Detached(Detached),
}

impl Outcome {
    /// Pending work, if the pass was fire-and-forget
    pub fn into_detached(self) -> Option<Detached> {
        match self {
            Outcome::Completed => None,
            Outcome::Detached(detached) => Some(detached),
        }
    }
}

#[derive(Clone)]
enum Sink {
    Global,
    Shared(Arc<dyn FaultSink>),
}

impl Sink {
    fn get(&self) -> &dyn FaultSink {
        match self {
            Sink::Global => hub::global(),
            Sink::Shared(sink) => sink.as_ref(),
        }
    }
}

/// Where a fault goes once it is caught
struct Route<S: ?Sized, P: ?Sized> {
    #[allow(clippy::type_complexity)]
    on_fault: Option<Arc<dyn Fn(Fault, &Handler<S, P>) -> Result<(), DispatchError> + Send + Sync>>,
    sink: Sink,
}

impl<S: ?Sized, P: ?Sized> Clone for Route<S, P> {
    fn clone(&self) -> Self {
        Self {
            on_fault: self.on_fault.clone(),
            sink: self.sink.clone(),
        }
    }
}

impl<S: ?Sized, P: ?Sized> Route<S, P> {
    /// Invoke one subscriber and route its fault, if any
    ///
    /// Only failures of the fault path itself are returned.
    fn invoke_one(
        &self,
        handler: &Handler<S, P>,
        sender: &S,
        payload: &P,
    ) -> Result<(), DispatchError> {
        let Err(fault) = handler.call(sender, payload) else {
            return Ok(());
        };
        tracing::debug!(
            subscriber = %handler.id(),
            panic = fault.is_panic(),
            error = %fault,
            "subscriber faulted"
        );

        let result = match &self.on_fault {
            Some(on_fault) => on_fault(fault, handler),
            None => {
                let identity = handler.identity();
                let message = format!(
                    "SafeInvoke caught exception in {} event handler \"{}\": {}",
                    type_name::<SubscriberList<S, P>>(),
                    identity,
                    fault
                );
                let record = FaultRecord::new(message, fault).with_identity(identity);
                self.sink.get().report(module_path!(), record)
            }
        };

        if let Err(e) = &result {
            tracing::warn!(subscriber = %handler.id(), error = %e, "fault path failed");
        }
        result
    }
}

/// Invokes every subscriber of a [`SubscriberList`], isolating faults
///
/// Faults are routed to the [`on_fault`](Self::on_fault) handler when one
/// is set, otherwise reported to the sink (the [`global`](hub::global) hub
/// unless [`sink`](Self::sink) overrides it).
pub struct SafeDispatch<'a, S: ?Sized, P: ?Sized> {
    list: &'a SubscriberList<S, P>,
    lock: Option<&'a Mutex<()>>,
    route: Route<S, P>,
    config: DispatchConfig,
}

impl<'a, S: ?Sized, P: ?Sized> SafeDispatch<'a, S, P> {
    pub fn new(list: &'a SubscriberList<S, P>) -> Self {
        Self {
            list,
            lock: None,
            route: Route {
                on_fault: None,
                sink: Sink::Global,
            },
            config: DispatchConfig::default(),
        }
    }

    /// Hold `lock` while taking the snapshot
    ///
    /// Lets the owner of the list serialize its own add/remove with dispatch.
    /// The lock is never held while subscribers run.
    pub fn lock(mut self, lock: &'a Mutex<()>) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Handle subscriber faults instead of reporting them
    ///
    /// The handler runs synchronously on the thread that caught the fault.
    /// An `Err` from it is not isolated: it escapes the dispatch.
    pub fn on_fault<F>(mut self, handler: F) -> Self
    where
        F: Fn(Fault, &Handler<S, P>) -> Result<(), DispatchError> + Send + Sync + 'static,
    {
        self.route.on_fault = Some(Arc::new(handler));
        self
    }

    /// Report unhandled faults to `sink` instead of the global hub
    pub fn sink(mut self, sink: Arc<dyn FaultSink>) -> Self {
        self.route.sink = Sink::Shared(sink);
        self
    }

    pub fn config(mut self, config: &DispatchConfig) -> Self {
        self.config = *config;
        self
    }

    fn snapshot(&self) -> Vec<Handler<S, P>> {
        let _guard = self
            .lock
            .map(|lock| lock.lock().unwrap_or_else(|e| e.into_inner()));
        let handlers = self.list.snapshot();
        tracing::trace!(subscribers = handlers.len(), "snapshot taken");
        handlers
    }

    /// Sequential pass on the calling thread
    pub fn invoke(&self, sender: &S, payload: &P) -> Result<(), DispatchError> {
        let handlers = self.snapshot();
        if handlers.is_empty() {
            return Ok(());
        }

        let _span = tracing::debug_span!(
            "dispatch",
            discipline = "sequential",
            subscribers = handlers.len()
        )
        .entered();
        self.run_sequential(&handlers, sender, payload)
    }

    fn run_sequential(
        &self,
        handlers: &[Handler<S, P>],
        sender: &S,
        payload: &P,
    ) -> Result<(), DispatchError> {
        for handler in handlers {
            self.route.invoke_one(handler, sender, payload)?;
        }
        Ok(())
    }

    /// Fork-join pass on the process-wide worker pool
    ///
    /// A single subscriber runs sequentially on the caller. Every subscriber
    /// is attempted even if fault handling fails for another one; escaped
    /// errors are returned after the join. The pool is rayon's global pool,
    /// sized by the host (see [`DispatchConfig::init_worker_pool`]).
    pub fn invoke_parallel(&self, sender: &S, payload: &P) -> Result<(), DispatchError>
    where
        S: Sync,
        P: Sync,
    {
        let handlers = self.snapshot();
        if handlers.len() <= 1 {
            return self.run_sequential(&handlers, sender, payload);
        }

        let _span = tracing::debug_span!(
            "dispatch",
            discipline = "parallel",
            subscribers = handlers.len(),
            pool_threads = rayon::current_num_threads()
        )
        .entered();

        // A panicking fault handler is resumed on the caller by rayon
        let route = &self.route;
        let errors: Vec<DispatchError> = handlers
            .par_iter()
            .filter_map(|handler| route.invoke_one(handler, sender, payload).err())
            .collect();

        DispatchError::collect(errors)
    }
}

impl<S, P> SafeDispatch<'_, S, P>
where
    S: ?Sized + Send + Sync + 'static,
    P: ?Sized + Send + Sync + 'static,
{
    /// Schedule each subscriber on the tokio blocking pool and return at once
    ///
    /// Faults are still isolated and routed, possibly after this returns.
    /// Fails with [`DispatchError::NoRuntime`] outside a tokio runtime.
    pub fn spawn(&self, sender: Arc<S>, payload: Arc<P>) -> Result<Detached, DispatchError> {
        let handlers = self.snapshot();
        if handlers.is_empty() {
            return Ok(Detached::default());
        }

        let runtime = Handle::try_current().map_err(|_| DispatchError::NoRuntime)?;
        tracing::debug!(
            discipline = "fire_and_forget",
            subscribers = handlers.len(),
            "scheduling"
        );

        let handles = handlers
            .into_iter()
            .map(|handler| {
                let route = self.route.clone();
                let sender = Arc::clone(&sender);
                let payload = Arc::clone(&payload);
                runtime.spawn_blocking(move || route.invoke_one(&handler, &sender, &payload))
            })
            .collect();

        Ok(Detached::new(handles))
    }

    /// Dispatch under a discipline chosen at runtime
    pub fn dispatch(
        &self,
        sender: Arc<S>,
        payload: Arc<P>,
        discipline: Discipline,
    ) -> Result<Outcome, DispatchError> {
        match discipline {
            Discipline::Sequential => self
                .invoke(&sender, &payload)
                .map(|()| Outcome::Completed),
            Discipline::Parallel => self
                .invoke_parallel(&sender, &payload)
                .map(|()| Outcome::Completed),
            Discipline::FireAndForget => self.spawn(sender, payload).map(Outcome::Detached),
        }
    }

    /// Dispatch under the configured discipline
    pub fn run(&self, sender: Arc<S>, payload: Arc<P>) -> Result<Outcome, DispatchError> {
        self.dispatch(sender, payload, self.config.discipline)
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
