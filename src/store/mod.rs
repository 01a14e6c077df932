//! Category persistence.
//!
//! [`CategoryStore`] is the contract the gRPC service consumes. Two
//! implementations ship with the crate:
//! - [`MemoryStore`]: process-local, sequential ids starting at `"1"`
//! - [`SqliteStore`]: SQLite-backed (requires the `sqlite` feature)

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{Category, Result};

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Creates and retrieves categories.
///
/// Implementations own the persisted records and must tolerate concurrent
/// calls from independent RPCs.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Persist a new category and return it with its assigned id.
    async fn create(&self, name: &str, description: &str) -> Result<Category>;

    /// Every stored category, in the order the backend yields them.
    async fn find_all(&self) -> Result<Vec<Category>>;

    /// Look up a single category.
    ///
    /// Returns [`CatalogError::NotFound`](crate::CatalogError::NotFound) when
    /// no category has this id.
    async fn find_by_id(&self, id: &str) -> Result<Category>;
}

#[async_trait]
impl<S: CategoryStore + ?Sized> CategoryStore for Arc<S> {
    async fn create(&self, name: &str, description: &str) -> Result<Category> {
        (**self).create(name, description).await
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        (**self).find_all().await
    }

    async fn find_by_id(&self, id: &str) -> Result<Category> {
        (**self).find_by_id(id).await
    }
}
