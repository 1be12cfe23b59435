//! Integration test for the process-wide shared store handle.
//!
//! The shared handle is a process global, so its first-caller-wins behavior
//! lives in its own test binary where nothing else has touched it. Keep this
//! file to a single test; a second one would race on the initialization.

use nimbus_config::ConfigStore;
use std::fs;
use tempfile::TempDir;

/// The first caller decides which file the shared handle serves. Later
/// callers passing a different path still see the first document, and
/// mutations through the handle persist to the first file.
#[test]
fn test_first_caller_wins() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.yaml");
    let second = dir.path().join("second.yaml");
    fs::write(&first, "nimbus:\n  marker: one\n").unwrap();
    fs::write(&second, "nimbus:\n  marker: two\n").unwrap();

    let handle = ConfigStore::shared(&first).unwrap();
    {
        let store = handle.lock().unwrap();
        assert_eq!(store.get_str("nimbus.marker").unwrap(), "one");
    }

    let again = ConfigStore::shared(&second).unwrap();
    {
        let store = again.lock().unwrap();
        assert_eq!(store.path(), first);
        assert_eq!(store.get_str("nimbus.marker").unwrap(), "one");
    }

    {
        let mut store = again.lock().unwrap();
        store.set("nimbus.default.cloud", "aws").unwrap();
    }
    let text = fs::read_to_string(&first).unwrap();
    assert!(text.contains("cloud: aws"));
    assert_eq!(fs::read_to_string(&second).unwrap(), "nimbus:\n  marker: two\n");
}
