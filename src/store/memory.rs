//! In-memory category store.

use std::sync::RwLock;

use async_trait::async_trait;

use super::CategoryStore;
use crate::{CatalogError, Category, Result};

/// Keeps categories in process memory.
///
/// Ids are decimal counters starting at `"1"`; `find_all` returns
/// categories in creation order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: u64,
    categories: Vec<Category>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored categories.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.categories.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> CatalogError {
    CatalogError::Storage("memory store lock poisoned".to_string())
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn create(&self, name: &str, description: &str) -> Result<Category> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.last_id += 1;
        let category = Category::new(inner.last_id.to_string(), name, description);
        inner.categories.push(category.clone());
        Ok(category)
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.categories.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Category> {
        let inner = self.inner.read().map_err(poisoned)?;
        inner
            .categories
            .iter()
            .find(|category| category.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let store = MemoryStore::new();
        let first = store.create("Books", "Printed books").await.unwrap();
        let second = store.create("Music", "Records").await.unwrap();

        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn find_all_keeps_creation_order() {
        let store = MemoryStore::new();
        for name in ["c", "a", "b"] {
            store.create(name, "").await.unwrap();
        }

        let names: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = MemoryStore::new();
        store.create("Books", "").await.unwrap();

        let err = store.find_by_id("42").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
