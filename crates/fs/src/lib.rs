// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Fault-tolerant filesystem helpers
//!
//! Enumeration never fails outright: unreadable directories are skipped and
//! the failure goes to the caller's handler, or to the suppressed-fault hub.

pub mod enumerate;
pub mod path;

pub use enumerate::{enumerate_files, file_list, get_files, EnumerateError, FileEnumerator, Pattern};
