// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events system for fault-isolated multicast dispatch
//!
//! This module provides:
//! - `SubscriberList` - Ordered multicast field with snapshot reads
//! - `SafeDispatch` - Invoke every subscriber, isolating faults per subscriber
//! - `SuppressedFaults` - Process-wide sink for faults nobody else handled
//! - `TracingListener` - Hub listener that logs suppressed faults

mod detached;
mod dispatch;
mod hub;
mod list;
mod log;
mod subscription;

pub use detached::Detached;
pub use dispatch::{Discipline, Outcome, SafeDispatch};
pub use hub::{global, FaultSink, SuppressedFaults, FACILITY};
pub use list::SubscriberList;
pub use log::TracingListener;
pub use subscription::{BoxError, FnSubscriber, Handler, Subscriber, SubscriberId};
