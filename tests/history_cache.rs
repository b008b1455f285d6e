use std::sync::Arc;

use darija_translator::history::{
    HistoryCache, HistoryEntry, JsonFileStore, KeyValueStore, HISTORY_KEY, MAX_HISTORY_ENTRIES,
};
use tempfile::TempDir;

fn entry(n: i64) -> HistoryEntry {
    HistoryEntry {
        source: format!("Hello {}", n),
        target: format!("Salam {}", n),
        timestamp: 1_700_000_000_000 + n * 1_000,
    }
}

fn open(dir: &TempDir) -> HistoryCache {
    let store = Arc::new(JsonFileStore::new(dir.path().join("storage.json")));
    HistoryCache::load(store).unwrap()
}

#[test]
fn test_missing_storage_is_empty_history() {
    let dir = TempDir::new().unwrap();
    let cache = open(&dir);
    assert!(cache.is_empty());
}

#[test]
fn test_persistence_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut cache = open(&dir);
    for n in 0..4 {
        cache.add(entry(n)).unwrap();
    }

    let reloaded = open(&dir);
    assert_eq!(reloaded.list(), cache.list());
    assert_eq!(reloaded.list()[0], entry(3));
}

#[test]
fn test_eleven_adds_keep_ten_most_recent() {
    let dir = TempDir::new().unwrap();
    let mut cache = open(&dir);
    for n in 1..=11 {
        cache.add(entry(n)).unwrap();
    }

    let reloaded = open(&dir);
    assert_eq!(reloaded.len(), MAX_HISTORY_ENTRIES);
    assert_eq!(reloaded.list()[0], entry(11));
    assert_eq!(reloaded.list()[MAX_HISTORY_ENTRIES - 1], entry(2));
    assert!(!reloaded.list().contains(&entry(1)));
}

#[test]
fn test_clear_persists_empty_list() {
    let dir = TempDir::new().unwrap();
    let mut cache = open(&dir);
    cache.add(entry(1)).unwrap();
    cache.add(entry(2)).unwrap();

    cache.clear().unwrap();
    assert!(cache.list().is_empty());

    let reloaded = open(&dir);
    assert!(reloaded.is_empty());

    let store = JsonFileStore::new(dir.path().join("storage.json"));
    assert_eq!(store.get(HISTORY_KEY).unwrap(), Some(serde_json::json!([])));
}

#[test]
fn test_persisted_format() {
    let dir = TempDir::new().unwrap();
    let mut cache = open(&dir);
    cache.add(entry(0)).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("storage.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "translationHistory": [
                {"source": "Hello 0", "target": "Salam 0", "timestamp": 1_700_000_000_000i64}
            ]
        })
    );
}

#[test]
fn test_truncated_storage_loads_empty_and_recovers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, r#"{"translationHistory": [{"source": "Hel"#).unwrap();

    let mut cache = open(&dir);
    assert!(cache.is_empty());

    cache.add(entry(3)).unwrap();
    let reloaded = open(&dir);
    assert_eq!(reloaded.list(), &[entry(3)][..]);
}
