// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handles for fire-and-forget dispatch

use crate::error::DispatchError;
use tokio::task::JoinHandle;

/// Pending work of one fire-and-forget pass, one handle per subscriber
///
/// Dropping it detaches the work; it still runs to completion and its
/// faults are still routed. Await [`join`](Self::join) to observe failures
/// of the fault path.
#[derive(Debug, Default)]
pub struct Detached {
    handles: Vec<JoinHandle<Result<(), DispatchError>>>,
}

impl Detached {
    pub(crate) fn new(handles: Vec<JoinHandle<Result<(), DispatchError>>>) -> Self {
        Self { handles }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn into_handles(self) -> Vec<JoinHandle<Result<(), DispatchError>>> {
        self.handles
    }

    /// Wait for every unit of work and collect what escaped
    pub async fn join(self) -> Result<(), DispatchError> {
        let mut errors = Vec::new();
        for handle in self.handles {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => errors.push(e),
                Err(e) => errors.push(DispatchError::Join(e.to_string())),
            }
        }
        DispatchError::collect(errors)
    }
}

#[cfg(test)]
#[path = "detached_tests.rs"]
mod tests;
