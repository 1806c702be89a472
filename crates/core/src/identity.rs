// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort labels for subscribers
//!
//! Labels only feed diagnostics. They are resolved from inside fault
//! handling, so resolution must never fail or unwind.

use crate::events::Subscriber;
use std::any::type_name;
use std::panic::{self, AssertUnwindSafe};

/// Label used when a subscriber's name cannot be resolved
pub const UNDETERMINED: &str = "<undetermined>";

/// Resolve a human-readable label for a subscriber
///
/// Returns [`UNDETERMINED`] if `name()` panics or yields a blank label.
pub fn identify<S: ?Sized, P: ?Sized>(subscriber: &dyn Subscriber<S, P>) -> String {
    match panic::catch_unwind(AssertUnwindSafe(|| subscriber.name())) {
        Ok(name) if !name.trim().is_empty() => name.into_owned(),
        _ => UNDETERMINED.to_string(),
    }
}

/// Label for a callable of type `F` taking `(&S, &P)`
///
/// e.g. `my_app::startup::{{closure}}(&str, &Reading)`
pub fn callable_label<F: ?Sized, S: ?Sized, P: ?Sized>() -> String {
    format!(
        "{}(&{}, &{})",
        type_name::<F>(),
        short_type_name(type_name::<S>()),
        short_type_name(type_name::<P>())
    )
}

/// Strip module paths from every path segment of a type name
///
/// `alloc::vec::Vec<core::option::Option<u8>>` becomes `Vec<Option<u8>>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;

    for (i, c) in full.char_indices() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            continue;
        }
        out.push_str(last_segment(&full[segment_start..i]));
        out.push(c);
        segment_start = i + c.len_utf8();
    }
    out.push_str(last_segment(&full[segment_start..]));

    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
