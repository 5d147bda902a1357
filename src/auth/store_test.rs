use super::*;

// =============================================================================
// MemoryTokenStore
// =============================================================================

#[test]
fn memory_get_missing_returns_none() {
    let store = MemoryTokenStore::new();
    assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
}

#[test]
fn memory_set_then_get() {
    let store = MemoryTokenStore::new();
    store.set(ACCESS_TOKEN_KEY, "abc");
    assert_eq!(store.get(ACCESS_TOKEN_KEY), Some("abc".to_owned()));
}

#[test]
fn memory_set_overwrites() {
    let store = MemoryTokenStore::new();
    store.set(ACCESS_TOKEN_KEY, "first");
    store.set(ACCESS_TOKEN_KEY, "second");
    assert_eq!(store.get(ACCESS_TOKEN_KEY), Some("second".to_owned()));
}

#[test]
fn memory_remove_clears_value() {
    let store = MemoryTokenStore::new();
    store.set(REFRESH_TOKEN_KEY, "abc");
    store.remove(REFRESH_TOKEN_KEY);
    assert_eq!(store.get(REFRESH_TOKEN_KEY), None);
}

#[test]
fn memory_remove_missing_is_noop() {
    let store = MemoryTokenStore::new();
    store.remove(ACCESS_TOKEN_KEY);
    assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
}

#[test]
fn memory_keys_are_independent() {
    let store = MemoryTokenStore::new();
    store.set(ACCESS_TOKEN_KEY, "access");
    store.set(REFRESH_TOKEN_KEY, "refresh");
    store.remove(ACCESS_TOKEN_KEY);
    assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
    assert_eq!(store.get(REFRESH_TOKEN_KEY), Some("refresh".to_owned()));
}

// =============================================================================
// FileTokenStore
// =============================================================================

#[test]
fn file_store_missing_file_starts_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileTokenStore::open(dir.path().join("tokens.json"));
    assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
}

#[test]
fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tokens.json");

    let store = FileTokenStore::open(&path);
    store.set(ACCESS_TOKEN_KEY, "access");
    store.set(REFRESH_TOKEN_KEY, "refresh");
    drop(store);

    let reopened = FileTokenStore::open(&path);
    assert_eq!(reopened.get(ACCESS_TOKEN_KEY), Some("access".to_owned()));
    assert_eq!(reopened.get(REFRESH_TOKEN_KEY), Some("refresh".to_owned()));
}

#[test]
fn file_store_remove_persists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tokens.json");

    let store = FileTokenStore::open(&path);
    store.set(ACCESS_TOKEN_KEY, "access");
    store.remove(ACCESS_TOKEN_KEY);
    drop(store);

    let reopened = FileTokenStore::open(&path);
    assert_eq!(reopened.get(ACCESS_TOKEN_KEY), None);
}

#[test]
fn file_store_corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tokens.json");
    std::fs::write(&path, "{not json").expect("write corrupt file");

    let store = FileTokenStore::open(&path);
    assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
}

#[test]
fn file_store_writes_json_object() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tokens.json");

    let store = FileTokenStore::open(&path);
    store.set(ACCESS_TOKEN_KEY, "abc");

    let raw = std::fs::read_to_string(&path).expect("read back");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(parsed[ACCESS_TOKEN_KEY], "abc");
}
