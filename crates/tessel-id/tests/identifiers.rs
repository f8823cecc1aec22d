//! Identifier helper tests

use std::collections::HashSet;
use std::thread;

use tessel_id::*;

#[test]
fn test_same_label_across_frames() {
    // Ids must not depend on call order or any hidden state
    let first_frame: Vec<Id> = ["header", "body", "footer"].iter().map(|l| hash(l)).collect();
    let _noise = hash("unrelated");
    let second_frame: Vec<Id> = ["header", "body", "footer"].iter().map(|l| hash(l)).collect();

    assert_eq!(first_frame, second_frame);
}

#[test]
fn test_nested_scopes_are_distinct() {
    let root = hash("root");
    let mut seen = HashSet::new();

    for container in 0..8 {
        let scope = combine(root, hash_indexed("column", container));
        for item in 0..32 {
            let id = combine(scope, hash_indexed("cell", item));
            assert!(seen.insert(id), "collision at column {container} cell {item}");
        }
    }

    assert_eq!(seen.len(), 8 * 32);
}

#[test]
fn test_hashing_from_many_threads() {
    let expected = combine(hash("window"), hash("button"));

    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| combine(hash("window"), hash("button"))))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_empty_label() {
    assert_eq!(hash(""), Id::EMPTY);
    assert_eq!(hash_bytes(b""), Id::EMPTY);
}
