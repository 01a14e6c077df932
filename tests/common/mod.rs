//! Shared test doubles.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use catalog::{CatalogError, Category, CategoryStore, MemoryStore, Result};

/// A [`MemoryStore`] whose `fail_on`-th create (1-based) fails with a
/// storage error. Every other call is forwarded.
pub struct FailingStore {
    pub inner: MemoryStore,
    fail_on: usize,
    creates: AtomicUsize,
}

impl FailingStore {
    pub fn new(fail_on: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_on,
            creates: AtomicUsize::new(0),
        }
    }

    /// Create calls seen so far, including the failing one.
    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CategoryStore for FailingStore {
    async fn create(&self, name: &str, description: &str) -> Result<Category> {
        let call = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(CatalogError::Storage(format!("disk full on create #{call}")));
        }
        self.inner.create(name, description).await
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: &str) -> Result<Category> {
        self.inner.find_by_id(id).await
    }
}
