// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path string helpers
//!
//! Both `/` and the platform separator are accepted as separators.

use std::path::{Path, MAIN_SEPARATOR};

fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

/// Ensure a trailing separator; an empty path becomes the current directory
pub fn add_path_suffix(path: &str) -> String {
    if path.is_empty() {
        return format!(".{MAIN_SEPARATOR}");
    }
    if path.ends_with(is_separator) {
        path.to_string()
    } else {
        format!("{path}{MAIN_SEPARATOR}")
    }
}

/// Strip every trailing separator
pub fn remove_path_suffix(path: &str) -> &str {
    path.trim_end_matches(is_separator)
}

/// Directory part of a path, with a trailing separator
///
/// A path ending in a separator, or naming an existing directory, is its
/// own directory. Otherwise the last segment is taken to be a file name.
pub fn directory_name(path: &str) -> String {
    if path.ends_with(is_separator) || Path::new(path).is_dir() {
        return add_path_suffix(path);
    }
    match path.rfind(is_separator) {
        Some(index) => path[..=index].to_string(),
        None => add_path_suffix(""),
    }
}

/// Name of the last directory in a path
///
/// `logs/2026/app.log` gives `2026`; `logs/2026/` gives `2026` too.
pub fn last_directory_name(path: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }
    let directory = directory_name(path);
    let directory = remove_path_suffix(&directory);
    let name = match directory.rfind(is_separator) {
        Some(index) => &directory[index + 1..],
        None => directory,
    };
    Some(name.to_string())
}

/// Last path segment (after trailing separators are removed)
pub fn file_name(path: &str) -> &str {
    let trimmed = remove_path_suffix(path);
    match trimmed.rfind(is_separator) {
        Some(index) => &trimmed[index + 1..],
        None => trimmed,
    }
}

/// File name without its final extension
pub fn file_name_without_extension(path: &str) -> String {
    Path::new(file_name(path))
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Final extension with its leading dot, or an empty string
pub fn extension(path: &str) -> String {
    Path::new(file_name(path))
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
