// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! faultline-core: fault-isolated multicast dispatch
//!
//! This crate provides:
//! - Subscriber lists that can be snapshotted while they are being mutated
//! - A safe dispatcher with sequential, parallel and fire-and-forget disciplines
//! - A process-wide hub for faults nobody else handled
//! - Best-effort subscriber labels for diagnostics

pub mod config;
pub mod error;
pub mod events;
pub mod fault;
pub mod identity;

pub use config::{ConfigError, DispatchConfig};
pub use error::DispatchError;
pub use events::{
    global, BoxError, Detached, Discipline, FaultSink, FnSubscriber, Handler, Outcome,
    SafeDispatch, Subscriber, SubscriberId, SubscriberList, SuppressedFaults, TracingListener,
};
pub use fault::{Fault, FaultRecord};
pub use identity::{identify, UNDETERMINED};
