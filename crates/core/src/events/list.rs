// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered multicast field of subscribers

use super::subscription::{BoxError, FnSubscriber, Handler, Subscriber, SubscriberId};
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Mutex};

/// An ordered, mutable list of subscribers
///
/// Reads for dispatch go through [`snapshot`](Self::snapshot): a pass works
/// on a copy, so subscribers added mid-pass are not invoked and subscribers
/// removed mid-pass still are.
pub struct SubscriberList<S: ?Sized, P: ?Sized> {
    handlers: Mutex<Vec<Handler<S, P>>>,
}

impl<S: ?Sized, P: ?Sized> SubscriberList<S, P> {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Append a subscriber, returning the id used to remove it
    pub fn add(&self, subscriber: impl Subscriber<S, P> + 'static) -> SubscriberId {
        self.add_shared(Arc::new(subscriber))
    }

    /// Append an already-shared subscriber
    ///
    /// The same subscriber may be added more than once; each addition gets its own id.
    pub fn add_shared(&self, subscriber: Arc<dyn Subscriber<S, P>>) -> SubscriberId {
        let handler = Handler::new(subscriber);
        let id = handler.id();

        let mut handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        handlers.push(handler);

        id
    }

    /// Append a closure
    pub fn add_fn<F>(&self, f: F) -> SubscriberId
    where
        F: Fn(&S, &P) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.add(FnSubscriber::new(f))
    }

    /// Append a closure with an explicit diagnostic label
    pub fn add_named<F>(&self, name: impl Into<Cow<'static, str>>, f: F) -> SubscriberId
    where
        F: Fn(&S, &P) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.add(FnSubscriber::named(name, f))
    }

    /// Remove a subscriber; returns false if the id is not registered
    pub fn remove(&self, id: &SubscriberId) -> bool {
        let mut handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        match handlers.iter().position(|h| h.id() == *id) {
            Some(index) => {
                handlers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&self) {
        self.handlers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the current subscribers in registration order
    pub fn snapshot(&self) -> Vec<Handler<S, P>> {
        self.handlers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// List all subscriber ids in registration order
    pub fn ids(&self) -> Vec<SubscriberId> {
        self.handlers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(Handler::id)
            .collect()
    }
}

impl<S: ?Sized, P: ?Sized> Default for SubscriberList<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized, P: ?Sized> fmt::Debug for SubscriberList<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberList")
            .field("ids", &self.ids())
            .finish()
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
