//! Tests for InMemoryStore
//!
//! These tests verify:
//! - Additive, non-deduplicated import
//! - Random pick on empty and populated stores
//! - Ordered listing and clear
//! - Seeding from a file
//! - Concurrent access

use std::io::{Cursor, Write};
use std::sync::Arc;
use std::thread;

use roulette::{InMemoryStore, RouletteError, Student, StudentsStore};
use tempfile::NamedTempFile;

fn students(names: &[&str]) -> Vec<Student> {
    names.iter().map(|n| Student::new(*n)).collect()
}

// =============================================================================
// Basic Operations
// =============================================================================

#[test]
fn test_new_store_is_empty() {
    let store = InMemoryStore::new();
    assert_eq!(store.len(), 0);
    assert!(store.is_empty());
    assert!(store.list().is_empty());
}

#[test]
fn test_import_is_additive_with_duplicates() {
    let store = InMemoryStore::new();
    assert_eq!(store.import(students(&["Alice", "Bob"])), 2);
    assert_eq!(store.import(students(&["Alice"])), 1);
    assert_eq!(store.import(Vec::new()), 0);
    assert_eq!(store.len(), 3);
}

#[test]
fn test_list_preserves_insertion_order() {
    let store = InMemoryStore::new();
    store.import(students(&["Carol", "Alice"]));
    store.import(students(&["Bob"]));
    assert_eq!(store.list(), students(&["Carol", "Alice", "Bob"]));
}

#[test]
fn test_pick_random_on_empty_store() {
    let store = InMemoryStore::new();
    assert!(matches!(store.pick_random(), Err(RouletteError::EmptyStore)));
}

#[test]
fn test_pick_random_returns_a_member() {
    let store = InMemoryStore::new();
    let pool = students(&["Alice", "Bob", "Carol"]);
    store.import(pool.clone());

    for _ in 0..50 {
        let picked = store.pick_random().unwrap();
        assert!(pool.contains(&picked));
    }
}

#[test]
fn test_clear_empties_store() {
    let store = InMemoryStore::new();
    store.import(students(&["Alice", "Bob"]));
    store.clear();
    assert_eq!(store.len(), 0);
    assert!(matches!(store.pick_random(), Err(RouletteError::EmptyStore)));
}

// =============================================================================
// Seeding
// =============================================================================

#[test]
fn test_import_lines_skips_blank_lines() {
    let store = InMemoryStore::new();
    let added = store
        .import_lines(Cursor::new("Alice Dupont\n\n  Bob Martin  \n"))
        .unwrap();
    assert_eq!(added, 2);
    assert_eq!(store.list(), students(&["Alice Dupont", "Bob Martin"]));
}

#[test]
fn test_import_lines_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Alice Dupont").unwrap();
    writeln!(file, "Bob Martin").unwrap();
    file.flush().unwrap();

    let store = InMemoryStore::new();
    let reader = std::io::BufReader::new(file.reopen().unwrap());
    assert_eq!(store.import_lines(reader).unwrap(), 2);
    assert_eq!(store.len(), 2);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_imports_sum_up() {
    let store = Arc::new(InMemoryStore::new());
    let mut handles = Vec::new();

    for t in 0..8 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..25 {
                store.import(vec![Student::new(format!("student-{}-{}", t, i))]);
                let _ = store.pick_random();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 8 * 25);
}
