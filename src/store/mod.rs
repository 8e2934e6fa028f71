//! Storage seams consumed by the cache and the HTTP layer.
//!
//! `Database` (Postgres) is the production implementation; `MemoryStore`
//! backs tests and local tooling.

mod memory;

pub use memory::MemoryStore;

use crate::content::ContentKind;
use crate::i18n::{Entity, TranslationEntry};
use async_trait::async_trait;

/// Failure of the underlying data source.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read from store: {0}")]
    Read(String),

    #[error("failed to write to store: {0}")]
    Write(String),
}

/// Used on the read paths (translation fetch, content queries, ping), so
/// every conversion is a `Read` failure. Write paths map their errors to
/// `Write` at the call site.
impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        StoreError::Read(error.to_string())
    }
}

/// Read access to the translation table.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    /// Every translation row, in no particular order.
    async fn fetch_translations(&self) -> Result<Vec<TranslationEntry>, StoreError>;
}

/// Everything the HTTP layer needs from persistence.
#[async_trait]
pub trait ContentStore: TranslationStore {
    /// Insert or replace the row identified by `(namespace, key)`.
    async fn upsert_translation(&self, entry: &TranslationEntry) -> Result<(), StoreError>;

    /// Returns `true` if a row was removed.
    async fn delete_translation(&self, namespace: &str, key: &str) -> Result<bool, StoreError>;

    /// All rows of a content table in display order.
    async fn list_entities(&self, kind: ContentKind) -> Result<Vec<Entity>, StoreError>;

    async fn get_entity(&self, kind: ContentKind, id: &str) -> Result<Option<Entity>, StoreError>;

    /// Cheap liveness probe for health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
