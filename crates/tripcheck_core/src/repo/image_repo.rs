//! Image blob store contract and implementations.
//!
//! # Responsibility
//! - Hold one binary image per checklist item, keyed by stringified item id.
//! - Support clearing every entry without knowing individual keys.
//!
//! # Invariants
//! - `save` replaces any previous blob for the key.
//! - `delete` of a missing key is not an error.

use super::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

/// MIME type assumed when a source does not declare one.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Binary image payload with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageBlob {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Per-item binary image storage.
pub trait ImageStore {
    fn save(&mut self, key: &str, blob: &ImageBlob) -> RepoResult<()>;
    fn get(&self, key: &str) -> RepoResult<Option<ImageBlob>>;
    fn delete(&mut self, key: &str) -> RepoResult<()>;
    fn clear_all(&mut self) -> RepoResult<()>;
}

/// SQLite-backed image store over the `item_images` table.
pub struct SqliteImageStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteImageStore<'conn> {
    /// Constructs a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ImageStore for SqliteImageStore<'_> {
    fn save(&mut self, key: &str, blob: &ImageBlob) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO item_images (key, mime, data) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                mime = excluded.mime,
                data = excluded.data,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, blob.mime.as_str(), blob.bytes.as_slice()],
        )?;
        Ok(())
    }

    fn get(&self, key: &str) -> RepoResult<Option<ImageBlob>> {
        let blob = self
            .conn
            .query_row(
                "SELECT mime, data FROM item_images WHERE key = ?1;",
                [key],
                |row| {
                    Ok(ImageBlob {
                        mime: row.get(0)?,
                        bytes: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(blob)
    }

    fn delete(&mut self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM item_images WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn clear_all(&mut self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM item_images;", [])?;
        Ok(())
    }
}

/// In-memory image store for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryImageStore {
    blobs: HashMap<String, ImageBlob>,
    clear_calls: usize,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `clear_all` calls observed.
    pub fn clear_count(&self) -> usize {
        self.clear_calls
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl ImageStore for MemoryImageStore {
    fn save(&mut self, key: &str, blob: &ImageBlob) -> RepoResult<()> {
        self.blobs.insert(key.to_string(), blob.clone());
        Ok(())
    }

    fn get(&self, key: &str) -> RepoResult<Option<ImageBlob>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn delete(&mut self, key: &str) -> RepoResult<()> {
        self.blobs.remove(key);
        Ok(())
    }

    fn clear_all(&mut self) -> RepoResult<()> {
        self.blobs.clear();
        self.clear_calls += 1;
        Ok(())
    }
}
