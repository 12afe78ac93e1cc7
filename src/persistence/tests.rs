use tempfile::{TempDir, tempdir};

use super::MessageStore;
use crate::feed::message::Message;
use crate::feed::order::{MESSAGE_KEY_PREFIX, OrderKey};
use crate::utils::error::FeedError;

fn open_store() -> (MessageStore, TempDir) {
    let dir = tempdir().unwrap();
    let store = MessageStore::open(dir.path().to_str().unwrap()).unwrap();
    (store, dir)
}

fn keyed_message(accepted_at: i64, id: &str, body: &str) -> (String, Message) {
    let key = OrderKey {
        accepted_at,
        id: id.to_string(),
    };
    let message = Message {
        id: id.to_string(),
        author: "alice".to_string(),
        body: body.to_string(),
        accepted_at,
    };
    (key.storage_key(), message)
}

#[test]
fn test_insert_and_scan_roundtrip() {
    let (store, _dir) = open_store();
    let (key, message) = keyed_message(1_725_000_000_000_000, "a", "hello");

    store.insert(&key, &message).unwrap();
    let scanned = store.scan_prefix(MESSAGE_KEY_PREFIX).unwrap();

    assert_eq!(scanned, vec![message]);
}

#[test]
fn test_scan_empty_store_returns_empty() {
    let (store, _dir) = open_store();
    assert!(store.scan_prefix(MESSAGE_KEY_PREFIX).unwrap().is_empty());
}

#[test]
fn test_duplicate_key_is_a_conflict() {
    let (store, _dir) = open_store();
    let (key, message) = keyed_message(1, "a", "first");

    store.insert(&key, &message).unwrap();
    let err = store.insert(&key, &message).unwrap_err();
    assert!(matches!(err, FeedError::Conflict { .. }));

    // The original record is untouched.
    let scanned = store.scan_prefix(MESSAGE_KEY_PREFIX).unwrap();
    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0].body, "first");
}

#[test]
fn test_scan_orders_by_timestamp_then_id() {
    let (store, _dir) = open_store();
    // Inserted deliberately out of order; same-timestamp entries fall back
    // to id order.
    let entries = [
        keyed_message(3, "b", "third"),
        keyed_message(1, "z", "first"),
        keyed_message(3, "a", "second"),
    ];
    for (key, message) in &entries {
        store.insert(key, message).unwrap();
    }

    let bodies: Vec<_> = store
        .scan_prefix(MESSAGE_KEY_PREFIX)
        .unwrap()
        .into_iter()
        .map(|m| m.body)
        .collect();
    assert_eq!(bodies, ["first", "second", "third"]);
}

#[test]
fn test_write_is_visible_to_immediate_scan() {
    let (store, _dir) = open_store();
    for i in 0..5 {
        let (key, message) = keyed_message(i, "a", &format!("msg{i}"));
        store.insert(&key, &message).unwrap();
        assert_eq!(store.scan_prefix(MESSAGE_KEY_PREFIX).unwrap().len(), (i + 1) as usize);
    }
}

#[test]
fn test_scan_prefix_ignores_other_namespaces() {
    let (store, _dir) = open_store();
    let (key, message) = keyed_message(1, "a", "kept");
    store.insert(&key, &message).unwrap();

    let (_, stray) = keyed_message(2, "b", "stray");
    store.insert("draft:00000000000000000002:b", &stray).unwrap();

    let scanned = store.scan_prefix(MESSAGE_KEY_PREFIX).unwrap();
    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0].body, "kept");
}
