// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lazy file enumeration that skips what it cannot read
//!
//! Files of a directory are yielded before any of its subdirectories are
//! entered. A directory that fails to open, or fails partway through, is
//! abandoned from that point on; the rest of the walk continues. Each
//! failure goes to the `on_error` handler, or to a [`FaultSink`] (the
//! global hub unless overridden).
//!
//! The iterator only yields `Err` when the fault sink itself fails, and
//! ends right after.

use crate::path;
use faultline_core::{global, BoxError, DispatchError, FaultRecord, FaultSink};
use std::fs::{self, ReadDir};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// A directory that could not be enumerated
#[derive(Debug, Error)]
#[error("Failed while enumerating files in \"{}\": {source}", .path.display())]
pub struct EnumerateError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl EnumerateError {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

/// File name pattern with `*` (any run) and `?` (any one character)
///
/// Matching is literal otherwise and case-sensitive. `*.*` requires a dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    chars: Vec<char>,
}

impl Pattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        let name: Vec<char> = name.chars().collect();
        let pattern = &self.chars;
        let (mut p, mut n) = (0, 0);
        // Position of the last `*` and the name index it currently covers up to
        let mut star: Option<(usize, usize)> = None;

        while n < name.len() {
            match pattern.get(p) {
                Some('*') => {
                    star = Some((p, n));
                    p += 1;
                }
                Some('?') => {
                    p += 1;
                    n += 1;
                }
                Some(c) if *c == name[n] => {
                    p += 1;
                    n += 1;
                }
                _ => match star {
                    Some((star_p, star_n)) => {
                        p = star_p + 1;
                        n = star_n + 1;
                        star = Some((star_p, star_n + 1));
                    }
                    None => return false,
                },
            }
        }
        pattern[p..].iter().all(|c| *c == '*')
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new("*")
    }
}

enum ErrorRoute {
    Global,
    Sink(Arc<dyn FaultSink>),
    Handler(Box<dyn FnMut(EnumerateError) + Send>),
}

struct Frame {
    dir: PathBuf,
    entries: ReadDir,
    subdirs: Vec<PathBuf>,
}

/// Iterator over matching files below a directory
pub struct FileEnumerator {
    pattern: Pattern,
    recursive: bool,
    /// Directories still to visit; the next one is on top
    pending: Vec<PathBuf>,
    current: Option<Frame>,
    route: ErrorRoute,
    finished: bool,
}

impl FileEnumerator {
    /// Every file below `root`, recursively, faults to the global hub
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            pattern: Pattern::default(),
            recursive: true,
            pending: vec![root.into()],
            current: None,
            route: ErrorRoute::Global,
            finished: false,
        }
    }

    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = Pattern::new(pattern);
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Hand enumeration failures to `handler` instead of a fault sink
    pub fn on_error(mut self, handler: impl FnMut(EnumerateError) + Send + 'static) -> Self {
        self.route = ErrorRoute::Handler(Box::new(handler));
        self
    }

    /// Report enumeration failures to `sink` instead of the global hub
    pub fn sink(mut self, sink: Arc<dyn FaultSink>) -> Self {
        self.route = ErrorRoute::Sink(sink);
        self
    }

    fn fail(&mut self, dir: PathBuf, source: io::Error) -> Result<(), DispatchError> {
        let error = EnumerateError { path: dir, source };
        tracing::debug!(
            path = %error.path.display(),
            error = %error.source,
            "directory skipped"
        );

        let result = match &mut self.route {
            ErrorRoute::Handler(handler) => {
                handler(error);
                Ok(())
            }
            ErrorRoute::Global => report(global(), error),
            ErrorRoute::Sink(sink) => report(sink.as_ref(), error),
        };
        if result.is_err() {
            self.finished = true;
        }
        result
    }

    /// Abandon the directory being read and route the failure
    fn abandon(&mut self, source: io::Error) -> Option<Result<PathBuf, DispatchError>> {
        let dir = self.current.take()?.dir;
        self.fail(dir, source).err().map(Err)
    }
}

fn report(sink: &dyn FaultSink, error: EnumerateError) -> Result<(), DispatchError> {
    let record = FaultRecord::new(error.to_string(), BoxError::from(error));
    sink.report(module_path!(), record)
}

impl Iterator for FileEnumerator {
    type Item = Result<PathBuf, DispatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            let Some(frame) = self.current.as_mut() else {
                let dir = self.pending.pop()?;
                match fs::read_dir(&dir) {
                    Ok(entries) => {
                        self.current = Some(Frame {
                            dir,
                            entries,
                            subdirs: Vec::new(),
                        })
                    }
                    Err(source) => {
                        if let Err(e) = self.fail(dir, source) {
                            return Some(Err(e));
                        }
                    }
                }
                continue;
            };

            match frame.entries.next() {
                Some(Ok(entry)) => match entry.file_type() {
                    Ok(kind) if kind.is_dir() => frame.subdirs.push(entry.path()),
                    Ok(_) => {
                        if self.pattern.matches(&entry.file_name().to_string_lossy()) {
                            return Some(Ok(entry.path()));
                        }
                    }
                    Err(source) => {
                        if let Some(escaped) = self.abandon(source) {
                            return Some(escaped);
                        }
                    }
                },
                Some(Err(source)) => {
                    if let Some(escaped) = self.abandon(source) {
                        return Some(escaped);
                    }
                }
                None => {
                    if let Some(frame) = self.current.take() {
                        if self.recursive {
                            self.pending.extend(frame.subdirs.into_iter().rev());
                        }
                    }
                }
            }
        }
    }
}

/// Files in `path` whose names match `pattern`
pub fn enumerate_files(path: impl Into<PathBuf>, pattern: &str, recursive: bool) -> FileEnumerator {
    FileEnumerator::new(path)
        .pattern(pattern)
        .recursive(recursive)
}

/// Collect [`enumerate_files`]; fails only if the global hub fails
pub fn get_files(
    path: impl Into<PathBuf>,
    pattern: &str,
    recursive: bool,
) -> Result<Vec<PathBuf>, DispatchError> {
    enumerate_files(path, pattern, recursive).collect()
}

/// Enumerate from a combined path and pattern such as `logs/*/*.log`
///
/// The last segment is the file pattern. A `*` as the last directory
/// makes the walk recursive from its parent. A bare directory lists
/// every file in it.
pub fn file_list(location: &str) -> FileEnumerator {
    let mut directory = path::directory_name(location);
    let pattern = match location.strip_prefix(directory.as_str()) {
        Some(rest) if !rest.is_empty() => rest,
        Some(_) => "*",
        None if directory == path::add_path_suffix(location) => "*",
        None => location,
    };

    let recursive = path::last_directory_name(&directory).as_deref() == Some("*");
    if recursive {
        directory = path::directory_name(path::remove_path_suffix(&directory));
    }
    enumerate_files(directory, pattern, recursive)
}

#[cfg(test)]
#[path = "enumerate_tests.rs"]
mod tests;
