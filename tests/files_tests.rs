//! Pipelines over the filesystem producers.

use std::fs;
use std::path::PathBuf;

use pipeflow::prelude::*;
use tempfile::TempDir;

fn setup_tree() -> TempDir {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let root = tmp.path();
    fs::create_dir_all(root.join("nested")).expect("Failed to create nested dir");
    fs::write(root.join("a.csv"), "1,2,3\n4,5\n").expect("Failed to write a.csv");
    fs::write(root.join("nested/b.csv"), "6;7\n8\n").expect("Failed to write b.csv");
    fs::write(root.join("empty.csv"), "").expect("Failed to write empty.csv");
    tmp
}

fn sorted_names(paths: Vec<PathBuf>) -> Vec<String> {
    let mut names: Vec<String> = paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn sorted_numbers(tokens: Vec<String>) -> Vec<u32> {
    let mut nums: Vec<u32> = tokens.iter().filter_map(|t| t.parse().ok()).collect();
    nums.sort();
    nums
}

#[test]
fn test_missing_root_fails_before_iteration() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("does-not-exist");
    match dir(&missing, true) {
        Err(Error::PathNotFound(p)) => assert_eq!(p, missing),
        other => panic!("expected PathNotFound, got {other:?}"),
    }
}

#[test]
fn test_recursive_walk_lists_nested_files() {
    let tmp = setup_tree();
    let paths = dir(tmp.path(), true).unwrap() | as_vector();
    assert_eq!(sorted_names(paths), vec!["a.csv", "b.csv", "empty.csv"]);
}

#[test]
fn test_flat_walk_skips_subdirectories() {
    let tmp = setup_tree();
    let paths = dir(tmp.path(), false).unwrap() | as_vector();
    assert_eq!(sorted_names(paths), vec!["a.csv", "empty.csv"]);
}

#[test]
fn test_dir_open_files_split_collects_every_number() {
    let tmp = setup_tree();
    let tokens = dir(tmp.path(), true).unwrap() | open_files() | split(",;") | as_vector();
    assert_eq!(sorted_numbers(tokens), (1..=8).collect::<Vec<u32>>());
}

#[test]
fn test_lines_of_a_single_file_stay_in_order() {
    let tmp = setup_tree();
    let file = tmp.path().join("a.csv");
    let lines = dir(&file, false).unwrap() | open_files() | as_vector();
    assert_eq!(lines, vec!["1,2,3", "4,5"]);
}

#[test]
fn test_lines_written_out_line_by_line() {
    let tmp = setup_tree();
    let mut buf: Vec<u8> = Vec::new();
    let res = as_data_flow(vec![tmp.path().join("nested/b.csv")])
        | open_files()
        | out(&mut buf);
    assert!(res.is_ok());
    assert_eq!(String::from_utf8(buf).unwrap(), "6;7\n8\n");
}

#[test]
fn test_unopenable_paths_are_skipped() {
    let tmp = setup_tree();
    let paths = vec![
        tmp.path().join("ghost.csv"),
        tmp.path().join("a.csv"),
        tmp.path().join("nested"),
    ];
    let lines = as_data_flow(paths) | open_files() | as_vector();
    assert_eq!(lines, vec!["1,2,3", "4,5"]);
}

#[test]
fn test_blank_leading_line_policy_is_configurable() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("notes.txt");
    fs::write(&path, "\nbody\n").unwrap();

    let legacy = as_data_flow(vec![path.clone()]) | open_files() | as_vector();
    assert!(legacy.is_empty());

    let cfg = FlowConfig {
        skip_blank_leading_line: false,
        ..FlowConfig::default()
    };
    let kept = as_data_flow(vec![path]) | OpenFiles::with_config(&cfg) | as_vector();
    assert_eq!(kept, vec!["", "body"]);
}

#[test]
fn test_config_from_json_drives_the_walk() {
    let tmp = setup_tree();
    let cfg = FlowConfig::from_json(r#"{"follow_links": true}"#).unwrap();
    assert!(cfg.skip_blank_leading_line);
    let lines = dir_with_config(tmp.path(), true, &cfg).unwrap()
        | OpenFiles::with_config(&cfg)
        | filter(|l: &String| l.contains(';'))
        | as_vector();
    assert_eq!(lines, vec!["6;7"]);
}

#[test]
fn test_paths_from_any_as_ref_path() {
    let tmp = setup_tree();
    let owned: String = tmp.path().join("a.csv").to_string_lossy().into_owned();
    let lines = as_data_flow(vec![owned]) | open_files() | as_vector();
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_non_utf8_bytes_do_not_drop_lines() {
    let tmp = tempfile::tempdir().unwrap();
    let legacy = tmp.path().join("legacy.txt");
    fs::write(&legacy, b"name\nJos\xe9\nAna\n").unwrap();
    let lines = as_data_flow(vec![legacy]) | open_files() | as_vector();
    assert_eq!(lines, vec!["name", "Jos\u{fffd}", "Ana"]);
}
