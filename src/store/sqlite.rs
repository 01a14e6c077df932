//! Implements a SQLite backed category store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, Row};

use super::CategoryStore;
use crate::{CatalogError, Category, Result};

/// Creates and retrieves categories to/from a SQLite database.
///
/// Ids are the SQLite row ids rendered as decimal strings.
#[derive(Debug)]
pub struct SqliteStore {
    connection: Mutex<Connection>,
}

impl SqliteStore {
    /// Wrap an open connection, creating the `category` table if needed.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    pub fn new(connection: Connection) -> Result<Self> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL
            );",
            (),
        )?;

        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// Open (or create) a database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let connection = Connection::open(path).map_err(|e| {
            CatalogError::Storage(format!("failed to open database {path:?}: {e}"))
        })?;
        Self::new(connection)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| CatalogError::Storage("database connection lock poisoned".to_string()))
    }

    fn map_row(row: &Row) -> std::result::Result<Category, rusqlite::Error> {
        let id: i64 = row.get(0)?;
        Ok(Category {
            id: id.to_string(),
            name: row.get(1)?,
            description: row.get(2)?,
        })
    }
}

#[async_trait]
impl CategoryStore for SqliteStore {
    /// Insert a category row.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    async fn create(&self, name: &str, description: &str) -> Result<Category> {
        let connection = self.lock()?;
        connection.execute(
            "INSERT INTO category (name, description) VALUES (?1, ?2);",
            (name, description),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Category::new(id.to_string(), name, description))
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        self.lock()?
            .prepare("SELECT id, name, description FROM category ORDER BY id;")?
            .query_map([], SqliteStore::map_row)?
            .map(|maybe_category| maybe_category.map_err(CatalogError::from))
            .collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Category> {
        // Only the canonical rendering of a row id was ever handed out, so
        // "01" or "+1" must not alias row 1.
        let row_id = match id.parse::<i64>() {
            Ok(row_id) if row_id.to_string() == id => row_id,
            _ => return Err(CatalogError::NotFound(id.to_string())),
        };

        self.lock()?
            .prepare("SELECT id, name, description FROM category WHERE id = :id;")?
            .query_row(&[(":id", &row_id)], SqliteStore::map_row)
            .optional()?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}
