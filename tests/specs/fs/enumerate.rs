//! File enumeration keeps going past unreadable directories.

use crate::prelude::*;
use faultline_fs::{enumerate_files, file_list};
use std::fs;

#[test]
fn missing_directory_is_reported_with_its_path() {
    let (hub, reports) = recording_hub();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("archive");

    let files: Vec<_> = enumerate_files(&missing, "*.log", true)
        .sink(hub)
        .collect();

    assert!(files.is_empty());
    let reports = reports.entries();
    assert_eq!(reports.len(), 1);
    let prefix = format!(
        "faultline_fs::enumerate | Failed while enumerating files in \"{}\": ",
        missing.display()
    );
    similar_asserts::assert_eq!(reports[0][..prefix.len()].to_string(), prefix);
}

#[test]
fn wildcard_directory_walks_the_whole_tree() {
    let (hub, reports) = recording_hub();
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("2026/10")).unwrap();
    fs::write(root.join("top.log"), "").unwrap();
    fs::write(root.join("2026/10/day.log"), "").unwrap();
    fs::write(root.join("2026/notes.txt"), "").unwrap();

    let location = format!("{}/*/*.log", root.display());
    let mut files: Vec<_> = file_list(&location)
        .sink(hub)
        .map(|file| file.unwrap())
        .collect();
    files.sort();

    assert_eq!(files, vec![root.join("2026/10/day.log"), root.join("top.log")]);
    assert!(reports.entries().is_empty());
}
