//! Search index builder
//!
//! Persists (name, type, path) triples into the docset's SQLite lookup store.
//! The table is dropped and rebuilt on every run; uniqueness spans the whole
//! triple, so two entries may share a name as long as type or path differ.

use crate::classify::{classify, EntryType};
use crate::links::normalize_extension;
use crate::Result;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite-backed docset search index
pub struct SearchIndex {
    conn: Connection,
}

impl SearchIndex {
    /// Opens the index database, dropping any previous searchIndex table.
    pub fn create(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::initialize(conn)
    }

    /// In-memory index for tests.
    pub fn create_in_memory() -> Result<Self> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "DROP TABLE IF EXISTS searchIndex;
             CREATE TABLE searchIndex(id INTEGER PRIMARY KEY, name TEXT, type TEXT, path TEXT);
             CREATE UNIQUE INDEX anchor ON searchIndex(name, type, path);",
        )?;
        Ok(Self { conn })
    }

    /// Classifies and inserts one (display name, page path) pair.
    ///
    /// The path's extension is normalized to `.html` first and classification
    /// runs against the normalized path. Exact duplicate triples are dropped
    /// silently; a classification miss aborts the build (§ the classification
    /// table must be kept in sync with the site).
    pub fn add_entry(&mut self, name: &str, path: &str) -> Result<()> {
        let path = normalize_extension(path);
        let entry_type = classify(&path, name)?;
        self.insert(name, entry_type, &path)
    }

    /// Inserts a fully classified triple, ignoring exact duplicates.
    pub fn insert(&mut self, name: &str, entry_type: EntryType, path: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO searchIndex(name, type, path) VALUES (?1, ?2, ?3)",
            params![name, entry_type.as_str(), path],
        )?;
        Ok(())
    }

    /// Builds the index from concatenated (name, path) streams.
    pub fn build<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, path) in entries {
            self.add_entry(&name, &path)?;
        }
        Ok(())
    }

    /// Number of indexed entries.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM searchIndex", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    #[cfg(test)]
    fn rows(&self) -> Result<Vec<(String, String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, type, path FROM searchIndex ORDER BY name, type, path")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
