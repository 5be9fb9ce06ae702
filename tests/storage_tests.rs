use std::fs;

use tasklist::models::Preferences;
use tasklist::storage::{load_preferences, save_preferences, FilePreferenceStore, PreferenceStore, STATE_KEY};

#[test]
fn test_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FilePreferenceStore::new(dir.path().join("preferences.json"));

    assert_eq!(store.get_item(STATE_KEY).unwrap(), None);
    assert_eq!(load_preferences(&store, STATE_KEY), Preferences::default());
}

#[test]
fn test_preferences_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("preferences.json");

    let mut store = FilePreferenceStore::new(&path);
    save_preferences(&mut store, STATE_KEY, Preferences { show_done_tasks: true }).unwrap();

    let reopened = FilePreferenceStore::new(&path);
    assert!(load_preferences(&reopened, STATE_KEY).show_done_tasks);
    assert_eq!(
        reopened.get_item(STATE_KEY).unwrap().as_deref(),
        Some(r#"{"showDoneTasks":true}"#)
    );
}

#[test]
fn test_keys_are_kept_apart() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FilePreferenceStore::new(dir.path().join("preferences.json"));

    store.set_item("state.today", r#"{"showDoneTasks":true}"#).unwrap();
    store.set_item("state.week", r#"{"showDoneTasks":false}"#).unwrap();

    assert!(load_preferences(&store, "state.today").show_done_tasks);
    assert!(!load_preferences(&store, "state.week").show_done_tasks);
    assert_eq!(store.get_item(STATE_KEY).unwrap(), None);
}

#[test]
fn test_corrupt_file_falls_back_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    fs::write(&path, "not json at all").unwrap();

    let mut store = FilePreferenceStore::new(&path);
    assert_eq!(load_preferences(&store, STATE_KEY), Preferences::default());

    store.set_item(STATE_KEY, r#"{"showDoneTasks":true}"#).unwrap();
    assert!(load_preferences(&store, STATE_KEY).show_done_tasks);
}

#[test]
fn test_malformed_value_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FilePreferenceStore::new(dir.path().join("preferences.json"));
    for raw in ["42", "[true]", "null", r#"{"showDoneTasks":"yes"}"#] {
        store.set_item(STATE_KEY, raw).unwrap();
        assert_eq!(load_preferences(&store, STATE_KEY), Preferences::default(), "{}", raw);
    }
}
