// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors that escape a dispatch pass
//!
//! Subscriber faults never show up here. Only failures in the code that
//! handles faults (caller fault handlers, hub listeners) escape.

use crate::events::{BoxError, Handler};
use crate::fault::Fault;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// A caller-supplied fault handler failed while handling a subscriber fault
    #[error("fault handler failed for subscriber \"{identity}\": {source}")]
    FaultHandler {
        identity: String,
        #[source]
        source: BoxError,
    },
    /// A hub listener faulted while receiving a suppressed fault
    #[error("Failed in {facility} event handler \"{identity}\": {message}")]
    Listener {
        facility: &'static str,
        identity: String,
        message: String,
        #[source]
        source: Fault,
    },
    #[error("{} errors escaped one dispatch pass: {}", .0.len(), summarize(.0))]
    Multiple(Vec<DispatchError>),
    #[error("fire-and-forget dispatch requires a tokio runtime")]
    NoRuntime,
    #[error("detached subscriber task failed: {0}")]
    Join(String),
}

impl DispatchError {
    /// Build the error a fault handler returns when it cannot handle a fault
    pub fn fault_handler<S: ?Sized, P: ?Sized>(
        handler: &Handler<S, P>,
        source: impl Into<BoxError>,
    ) -> Self {
        DispatchError::FaultHandler {
            identity: handler.identity(),
            source: source.into(),
        }
    }

    /// Fold the escaped errors of one pass into a single result
    pub fn collect(mut errors: Vec<DispatchError>) -> Result<(), DispatchError> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(DispatchError::Multiple(errors)),
        }
    }

    /// Number of underlying errors, flattening `Multiple`
    pub fn count(&self) -> usize {
        match self {
            DispatchError::Multiple(errors) => errors.iter().map(DispatchError::count).sum(),
            _ => 1,
        }
    }
}

fn summarize(errors: &[DispatchError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
