//! Integration tests for tagdir
//!
//! These tests verify end-to-end workflows over temporary directories:
//! tagging, persisting, filtering with physical moves, and resetting back
//! to the flat layout.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use tagdir::dir::{DirOptions, FilterMode, TaggedDirectory};
use tagdir::store::TagStore;

const RECORD: &str = "tagdir.json";
const RESULT: &str = "tagdir_result";

/// Helper function to open a temp directory with default reserved names
fn open(dir: &TempDir) -> TaggedDirectory {
    TaggedDirectory::open(dir.path(), DirOptions::default()).unwrap()
}

/// Helper function to create a file in the base directory
fn create_file(dir: &Path, name: &str) {
    fs::write(dir.join(name), "content").unwrap();
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[test]
fn test_tag_persist_reload_workflow() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "a.txt");

    let mut tagged = open(&dir);
    tagged.set_tags("a.txt", &strings(&["red", "big"]));
    tagged.set_tags("b.txt", &strings(&["blue"]));
    tagged.save().unwrap();

    // A fresh invocation sees the same record.
    let reloaded = open(&dir);
    assert_eq!(reloaded.tags_of("a.txt"), &strings(&["red", "big"]));
    assert_eq!(reloaded.tags_of("b.txt"), &strings(&["blue"]));
    assert_eq!(reloaded.tracked_files(), vec!["a.txt", "b.txt"]);
}

#[test]
fn test_filter_move_and_reset_scenario() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "a.txt");
    create_file(dir.path(), "b.txt");
    create_file(dir.path(), "c.txt");

    let mut tagged = open(&dir);
    tagged.set_tags("a.txt", &strings(&["red", "big"]));
    tagged.set_tags("b.txt", &strings(&["blue"]));
    tagged.save().unwrap();

    let matches = tagged
        .filter_by_tags(&strings(&["red"]), FilterMode::Any, true)
        .unwrap();
    assert_eq!(matches, strings(&["a.txt"]));

    // a.txt moved, b.txt and the untracked c.txt stay put.
    let result_dir = dir.path().join(RESULT);
    assert!(result_dir.join("a.txt").is_file());
    assert!(!dir.path().join("a.txt").exists());
    assert!(dir.path().join("b.txt").is_file());
    assert!(dir.path().join("c.txt").is_file());

    tagged.reset().unwrap();
    assert!(dir.path().join("a.txt").is_file());
    assert!(!result_dir.exists());
}

#[test]
fn test_repeated_filters_from_fresh_invocations() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "a.txt");
    create_file(dir.path(), "b.txt");

    let mut tagged = open(&dir);
    tagged.set_tags("a.txt", &strings(&["a"]));
    tagged.set_tags("b.txt", &strings(&["b"]));
    tagged.save().unwrap();

    let first = open(&dir)
        .filter_by_tags(&strings(&["a"]), FilterMode::Any, true)
        .unwrap();

    // A second filter from a new process-equivalent resets the previous
    // one before applying its own matches.
    let second = open(&dir)
        .filter_by_tags(&strings(&["b"]), FilterMode::Any, true)
        .unwrap();

    assert_eq!(first, strings(&["a.txt"]));
    assert_eq!(second, strings(&["b.txt"]));

    let result_dir = dir.path().join(RESULT);
    assert!(result_dir.join("b.txt").is_file());
    assert!(dir.path().join("a.txt").is_file());
    assert!(!result_dir.join("a.txt").exists());
}

#[test]
fn test_filter_mode_semantics() {
    let dir = TempDir::new().unwrap();
    let mut tagged = open(&dir);

    tagged.set_tags("xy.txt", &strings(&["x", "y"]));
    tagged.set_tags("x.txt", &strings(&["x"]));
    tagged.set_tags("z.txt", &strings(&["z"]));

    let any = tagged
        .filter_by_tags(&strings(&["x", "y"]), FilterMode::Any, false)
        .unwrap();
    assert_eq!(any, strings(&["x.txt", "xy.txt"]));

    let all = tagged
        .filter_by_tags(&strings(&["x", "y"]), FilterMode::All, false)
        .unwrap();
    assert_eq!(all, strings(&["xy.txt"]));
}

#[test]
fn test_counts_scenario() {
    let dir = TempDir::new().unwrap();
    let mut tagged = open(&dir);

    tagged.set_tags("one.txt", &strings(&["x", "y"]));
    tagged.set_tags("two.txt", &strings(&["x"]));
    tagged.set_tags("three.txt", &strings(&["y", "z"]));

    let counts = tagged.count_tags("");
    assert_eq!(counts.len(), 3);
    assert!(counts.contains(&("x".to_string(), 2)));
    assert!(counts.contains(&("y".to_string(), 2)));
    assert_eq!(counts.last(), Some(&("z".to_string(), 1)));
}

#[test]
fn test_autoremove_prunes_persisted_record() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "here.txt");

    let mut tagged = open(&dir);
    tagged.set_tags("here.txt", &strings(&["x"]));
    tagged.set_tags("gone.txt", &strings(&["x"]));
    tagged.save().unwrap();

    let mut tagged = open(&dir);
    let removed = tagged.autoremove().unwrap();
    assert_eq!(removed, strings(&["gone.txt"]));
    tagged.save().unwrap();

    let content = fs::read_to_string(dir.path().join(RECORD)).unwrap();
    assert!(!content.contains("gone.txt"));
    assert!(content.contains("here.txt"));
}

#[test]
fn test_tags_survive_filter_cycles_in_record() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "a.txt");

    let mut tagged = open(&dir);
    tagged.set_tags("a.txt", &strings(&["red"]));
    tagged.save().unwrap();

    tagged.filter_by_tags(&strings(&["red"]), FilterMode::Any, true).unwrap();

    // While filtered, the file still counts as existing and keeps its tags.
    let tagged = open(&dir);
    assert_eq!(tagged.tags_of("a.txt"), &strings(&["red"]));
    assert_eq!(tagged.existing_files().unwrap(), strings(&["a.txt"]));
    assert!(tagged.nonexisting_tracked().unwrap().is_empty());

    tagged.reset().unwrap();
    assert_eq!(open(&dir).tags_of("a.txt"), &strings(&["red"]));
}

#[test]
fn test_record_is_plain_json_object() {
    let dir = TempDir::new().unwrap();
    let mut tagged = open(&dir);

    tagged.set_tags("a.txt", &strings(&["red", "big"]));
    tagged.save().unwrap();

    let content = fs::read_to_string(dir.path().join(RECORD)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(parsed["a.txt"], serde_json::json!(["red", "big"]));
    // 4-space indentation, like the record format this tool organizes.
    assert!(content.contains("\n    \"a.txt\""));
}

#[test]
fn test_custom_reserved_names() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "a.txt");

    let options = DirOptions {
        record_filename: "tags.json".to_string(),
        result_directory: "picked".to_string(),
    };

    let mut tagged = TaggedDirectory::open(dir.path(), options.clone()).unwrap();
    tagged.set_tags("a.txt", &strings(&["red"]));
    tagged.save().unwrap();
    tagged.filter_by_tags(&strings(&["red"]), FilterMode::Any, true).unwrap();

    assert!(dir.path().join("tags.json").is_file());
    assert!(dir.path().join("picked").join("a.txt").is_file());

    // The custom record name is reserved, never listed as taggable.
    let tagged = TaggedDirectory::open(dir.path(), options).unwrap();
    assert_eq!(tagged.existing_files().unwrap(), strings(&["a.txt"]));
}

#[test]
fn test_store_loads_independently_of_layout() {
    let dir = TempDir::new().unwrap();
    create_file(dir.path(), "a.txt");

    let mut store = TagStore::load(dir.path(), RECORD).unwrap();
    store.set_tags("a.txt", &strings(&["red"]));
    store.save().unwrap();

    let tagged = open(&dir);
    tagged.filter_by_tags(&strings(&["red"]), FilterMode::Any, true).unwrap();

    // The store alone still sees the same mapping after the move.
    let store = TagStore::load(dir.path(), RECORD).unwrap();
    assert_eq!(store.tags_of("a.txt"), &strings(&["red"]));
}
