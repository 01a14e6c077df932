//! Behaviour shared by every [`CategoryStore`] implementation.

use std::collections::HashSet;
use std::sync::Arc;

use catalog::{Category, CategoryStore, MemoryStore};

/// Exercise the store contract on an empty store.
async fn check_store_contract(store: &dyn CategoryStore) {
    // Empty store lists nothing rather than failing.
    assert!(store.find_all().await.unwrap().is_empty());

    let books = store.create("Books", "Printed books").await.unwrap();
    assert!(!books.id.is_empty());
    assert_eq!(books.name, "Books");
    assert_eq!(books.description, "Printed books");

    let music = store.create("Music", "").await.unwrap();
    assert_ne!(books.id, music.id);

    assert_eq!(store.find_by_id(&books.id).await.unwrap(), books);
    let padded = format!("{} ", books.id);
    assert_eq!(store.find_all().await.unwrap(), vec![books, music]);

    // Only ids handed out by create resolve, even if they spell the same number.
    for id in ["does-not-exist", "", "01", "+1", "001", padded.as_str()] {
        let err = store.find_by_id(id).await.unwrap_err();
        assert!(err.is_not_found(), "{id:?}: unexpected result {err}");
    }
}

#[tokio::test]
async fn memory_store_contract() {
    check_store_contract(&MemoryStore::new()).await;
}

#[tokio::test]
#[cfg(feature = "sqlite")]
async fn sqlite_store_contract() {
    check_store_contract(&catalog::SqliteStore::open_in_memory().unwrap()).await;
}

#[tokio::test]
async fn books_scenario() {
    let store = MemoryStore::new();

    let created = store.create("Books", "Printed books").await.unwrap();
    assert_eq!(created, Category::new("1", "Books", "Printed books"));

    assert_eq!(store.find_by_id("1").await.unwrap(), created);
}

#[tokio::test]
async fn fields_are_stored_verbatim() {
    let store = MemoryStore::new();
    let name = "  Ünïcode\tname ";
    let description = "line one\nline two";

    let created = store.create(name, description).await.unwrap();
    let fetched = store.find_by_id(&created.id).await.unwrap();

    assert_eq!(fetched.name, name);
    assert_eq!(fetched.description, description);
}

#[tokio::test]
async fn arc_dyn_store_forwards() {
    let store: Arc<dyn CategoryStore> = Arc::new(MemoryStore::new());
    let created = store.create("Books", "").await.unwrap();
    assert_eq!(store.find_by_id(&created.id).await.unwrap(), created);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_unique_ids() {
    let store = Arc::new(MemoryStore::new());

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.create(&format!("c{i}"), "").await.unwrap() })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().id);
    }
    assert_eq!(ids.len(), 32);
    assert_eq!(store.len(), 32);
}

#[tokio::test]
#[cfg(feature = "sqlite")]
async fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");

    let created = {
        let store = catalog::SqliteStore::open(&path).unwrap();
        store.create("Books", "Printed books").await.unwrap()
    };

    let reopened = catalog::SqliteStore::open(&path).unwrap();
    assert_eq!(reopened.find_by_id(&created.id).await.unwrap(), created);
    assert_eq!(reopened.find_all().await.unwrap().len(), 1);
}
