// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Faults caught at a subscriber boundary

use crate::events::BoxError;
use std::any::Any;
use thiserror::Error;

/// A failure raised by a single subscriber invocation
///
/// Returned errors and caught panics are isolated the same way.
#[derive(Debug, Error)]
pub enum Fault {
    #[error("{0}")]
    Error(#[source] BoxError),
    #[error("{0}")]
    Panic(String),
}

impl Fault {
    /// Convert a caught panic payload into a fault
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(msg) = payload.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };
        Fault::Panic(message)
    }

    pub fn is_panic(&self) -> bool {
        matches!(self, Fault::Panic(_))
    }
}

impl From<BoxError> for Fault {
    fn from(err: BoxError) -> Self {
        Fault::Error(err)
    }
}

/// A fault with the context needed to report it
///
/// Built once per fault and handed by value to exactly one consumer.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FaultRecord {
    message: String,
    identity: Option<String>,
    #[source]
    cause: Fault,
}

impl FaultRecord {
    pub fn new(message: impl Into<String>, cause: impl Into<Fault>) -> Self {
        Self {
            message: message.into(),
            identity: None,
            cause: cause.into(),
        }
    }

    /// Attach the label of the subscriber that faulted
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Label of the faulting subscriber, if the fault came from one
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn cause(&self) -> &Fault {
        &self.cause
    }

    pub fn into_cause(self) -> Fault {
        self.cause
    }
}

#[cfg(test)]
#[path = "fault_tests.rs"]
mod tests;
