mod common;

use calnote_core::{JsonFileStorage, MemoryStorage, NoteCollection, NoteRecord, NoteStore};
use common::day;

#[test]
fn notes_for_unknown_date_is_empty() {
    let store = NoteStore::new();
    assert!(store.notes_for_date(&day("2024-01-01")).is_empty());
}

#[test]
fn replace_for_date_is_idempotent() {
    let records = vec![NoteRecord::new("日记", "a"), NoteRecord::new("金融", "b")];

    let mut once = NoteStore::new();
    once.replace_for_date(day("2024-02-02"), records.clone());

    let mut twice = NoteStore::new();
    twice.replace_for_date(day("2024-02-02"), records.clone());
    twice.replace_for_date(day("2024-02-02"), records);

    assert_eq!(once, twice);
}

#[test]
fn replacing_with_empty_list_removes_the_date() {
    let mut store = NoteStore::new();
    store.replace_for_date(day("2024-02-02"), vec![NoteRecord::new("日记", "a")]);
    store.replace_for_date(day("2024-02-03"), vec![NoteRecord::new("日记", "b")]);

    store.replace_for_date(day("2024-02-02"), Vec::new());

    assert!(!store.collection().contains_key(&day("2024-02-02")));
    assert_eq!(
        store.dates_with_notes().into_iter().collect::<Vec<_>>(),
        vec![day("2024-02-03")]
    );
}

#[test]
fn dates_with_notes_never_lists_empty_dates() {
    let mut store = NoteStore::new();
    let steps = [
        ("2024-05-01", 2usize),
        ("2024-05-02", 0),
        ("2024-05-01", 0),
        ("2024-05-03", 1),
        ("2024-05-02", 3),
        ("2024-05-03", 0),
    ];
    for (date, count) in steps {
        let records = (0..count)
            .map(|idx| NoteRecord::new("日记", format!("note {idx}")))
            .collect();
        store.replace_for_date(day(date), records);

        for marked in store.dates_with_notes() {
            assert!(!store.notes_for_date(&marked).is_empty());
        }
    }
    assert_eq!(
        store.dates_with_notes().into_iter().collect::<Vec<_>>(),
        vec![day("2024-05-02")]
    );
}

#[test]
fn notes_for_date_returns_an_independent_copy() {
    let mut store = NoteStore::new();
    store.replace_for_date(day("2024-06-01"), vec![NoteRecord::new("日记", "original")]);

    let mut copy = store.notes_for_date(&day("2024-06-01"));
    copy[0].content = "changed".to_string();
    copy.clear();

    assert_eq!(
        store.notes_for_date(&day("2024-06-01")),
        vec![NoteRecord::new("日记", "original")]
    );
}

#[test]
fn load_or_empty_uses_storage_contents() {
    let mut collection = NoteCollection::new();
    collection.insert(day("2024-07-07"), vec![NoteRecord::new("金融", "stored")]);
    let storage = MemoryStorage::with_collection(collection.clone());

    let (store, error) = NoteStore::load_or_empty(&storage);
    assert!(error.is_none());
    assert_eq!(store.collection(), &collection);
}

#[test]
fn load_or_empty_recovers_from_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let (store, error) = NoteStore::load_or_empty(&JsonFileStorage::new(&path));
    assert!(store.is_empty());
    assert!(error.unwrap().is_load_error());
}
