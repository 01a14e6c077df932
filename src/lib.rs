//! Catalog - category records served over gRPC
//!
//! This crate provides a [`CategoryStore`] trait that abstracts over the
//! persistence backend, plus (behind the `server` and `client` features)
//! a tonic service exposing the store and a typed client for it.
//!
//! # Store Example
//!
//! ```rust
//! use catalog::{CategoryStore, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> catalog::Result<()> {
//!     let store = MemoryStore::new();
//!     let books = store.create("Books", "Printed books").await?;
//!
//!     assert_eq!(books.id, "1");
//!     assert_eq!(store.find_by_id("1").await?, books);
//!     Ok(())
//! }
//! ```
//!
//! # Client Example (requires `client` feature)
//!
//! ```rust,ignore
//! use catalog::client::ServiceClient;
//! use catalog::{CategoryStore, NewCategory};
//!
//! #[tokio::main]
//! async fn main() -> catalog::Result<()> {
//!     let client = ServiceClient::connect("http://127.0.0.1:50051").await?;
//!
//!     let created = client
//!         .create_stream(vec![
//!             NewCategory::new("Books", "Printed books"),
//!             NewCategory::new("Music", "Records and tapes"),
//!         ])
//!         .await?;
//!
//!     println!("created {} categories", created.len());
//!     Ok(())
//! }
//! ```

#[cfg(feature = "client")]
pub mod client;
pub mod error;
#[cfg(any(feature = "server", feature = "client"))]
pub mod server;
pub mod store;
pub mod telemetry;
pub mod types;
mod version;

// Re-export main types at crate root
pub use error::{CatalogError, Result};
#[cfg(feature = "sqlite")]
pub use store::SqliteStore;
pub use store::{CategoryStore, MemoryStore};
pub use types::{Category, NewCategory};
pub use version::{GIT_BRANCH, GIT_SHA, PKG_VERSION, git_dirty, short_sha, version_string};
