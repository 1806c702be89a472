// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hub listener that writes suppressed faults to the tracing log

use super::subscription::{BoxError, Subscriber};
use crate::fault::FaultRecord;
use crate::identity::UNDETERMINED;
use std::borrow::Cow;

/// Logs every suppressed fault at error level under `faultline::suppressed`
///
/// Subscribe it to a hub so suppressed faults are not silently dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingListener;

impl Subscriber<str, FaultRecord> for TracingListener {
    fn invoke(&self, source: &str, record: &FaultRecord) -> Result<(), BoxError> {
        tracing::error!(
            target: "faultline::suppressed",
            source,
            subscriber = record.identity().unwrap_or(UNDETERMINED),
            panic = record.cause().is_panic(),
            "{}",
            record.message()
        );
        Ok(())
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("TracingListener")
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
