// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscribers and the handles that identify them

use crate::fault::Fault;
use crate::identity::{self, callable_label};
use std::any::type_name;
use std::borrow::Cow;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Error type returned by subscribers
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A callable invoked once per dispatch pass with `(sender, payload)`
///
/// Returning `Err` or panicking both count as a fault; neither stops
/// delivery to the other subscribers.
pub trait Subscriber<S: ?Sized, P: ?Sized>: Send + Sync {
    fn invoke(&self, sender: &S, payload: &P) -> Result<(), BoxError>;

    /// Label used in diagnostics
    ///
    /// The default is the implementing type's path. Resolved through
    /// [`identify`](crate::identity::identify), which tolerates panics here.
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(type_name::<Self>())
    }
}

/// Adapts a closure into a [`Subscriber`]
pub struct FnSubscriber<F> {
    f: F,
    name: Option<Cow<'static, str>>,
}

impl<F> FnSubscriber<F> {
    pub fn new(f: F) -> Self {
        Self { f, name: None }
    }

    /// Use an explicit label instead of the closure's type path
    pub fn named(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            f,
            name: Some(name.into()),
        }
    }
}

impl<S, P, F> Subscriber<S, P> for FnSubscriber<F>
where
    S: ?Sized,
    P: ?Sized,
    F: Fn(&S, &P) -> Result<(), BoxError> + Send + Sync,
{
    fn invoke(&self, sender: &S, payload: &P) -> Result<(), BoxError> {
        (self.f)(sender, payload)
    }

    fn name(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name.as_ref()),
            None => Cow::Owned(callable_label::<F, S, P>()),
        }
    }
}

impl<F> fmt::Debug for FnSubscriber<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSubscriber")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned by `add`/`subscribe`, used to remove the subscriber later
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl SubscriberId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// One registered subscriber inside a list
pub struct Handler<S: ?Sized, P: ?Sized> {
    id: SubscriberId,
    subscriber: Arc<dyn Subscriber<S, P>>,
}

impl<S: ?Sized, P: ?Sized> Handler<S, P> {
    pub(crate) fn new(subscriber: Arc<dyn Subscriber<S, P>>) -> Self {
        Self {
            id: SubscriberId::next(),
            subscriber,
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn subscriber(&self) -> &dyn Subscriber<S, P> {
        self.subscriber.as_ref()
    }

    /// Best-effort label for diagnostics, never panics
    pub fn identity(&self) -> String {
        identity::identify(self.subscriber.as_ref())
    }

    /// Invoke inside a fault boundary
    pub(crate) fn call(&self, sender: &S, payload: &P) -> Result<(), Fault> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.subscriber.invoke(sender, payload))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(Fault::Error(err)),
            Err(cause) => Err(Fault::from_panic(cause)),
        }
    }
}

impl<S: ?Sized, P: ?Sized> Clone for Handler<S, P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            subscriber: Arc::clone(&self.subscriber),
        }
    }
}

impl<S: ?Sized, P: ?Sized> fmt::Debug for Handler<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("id", &self.id)
            .field("identity", &self.identity())
            .finish()
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
