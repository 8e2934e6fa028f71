use super::{ContentStore, StoreError, TranslationStore};
use crate::content::ContentKind;
use crate::i18n::{Entity, TranslationEntry};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

/// In-process store with the same semantics as the Postgres one.
///
/// Counts translation reads and can be switched into a failing mode so
/// callers can observe cache behaviour.
#[derive(Debug, Default)]
pub struct MemoryStore {
    translations: RwLock<Vec<TranslationEntry>>,
    entities: RwLock<HashMap<ContentKind, Vec<Entity>>>,
    translation_reads: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translations(entries: Vec<TranslationEntry>) -> Self {
        let store = Self::new();
        *store.translations.write().unwrap_or_else(|e| e.into_inner()) = entries;
        store
    }

    /// Append a content row. Rows are listed in insertion order.
    pub fn insert_entity(&self, kind: ContentKind, entity: Entity) {
        self.entities
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(kind)
            .or_default()
            .push(entity);
    }

    /// Number of `fetch_translations` calls so far, failed ones included.
    pub fn translation_reads(&self) -> usize {
        self.translation_reads.load(Ordering::SeqCst)
    }

    /// Make every subsequent operation fail until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Read("memory store is unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TranslationStore for MemoryStore {
    async fn fetch_translations(&self) -> Result<Vec<TranslationEntry>, StoreError> {
        self.translation_reads.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self
            .translations
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn upsert_translation(&self, entry: &TranslationEntry) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Write("memory store is unavailable".to_string()));
        }

        let mut rows = self.translations.write().unwrap_or_else(|e| e.into_inner());
        match rows
            .iter()
            .position(|row| row.namespace == entry.namespace && row.key == entry.key)
        {
            Some(index) => rows[index] = entry.clone(),
            None => rows.push(entry.clone()),
        }
        Ok(())
    }

    async fn delete_translation(&self, namespace: &str, key: &str) -> Result<bool, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Write("memory store is unavailable".to_string()));
        }

        let mut rows = self.translations.write().unwrap_or_else(|e| e.into_inner());
        let before = rows.len();
        rows.retain(|row| !(row.namespace == namespace && row.key == key));
        Ok(rows.len() < before)
    }

    async fn list_entities(&self, kind: ContentKind) -> Result<Vec<Entity>, StoreError> {
        self.check_available()?;
        Ok(self
            .entities
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_entity(&self, kind: ContentKind, id: &str) -> Result<Option<Entity>, StoreError> {
        self.check_available()?;
        let entities = self.entities.read().unwrap_or_else(|e| e.into_inner());
        Ok(entities
            .get(&kind)
            .and_then(|rows| rows.iter().find(|row| id_matches(row, id)))
            .cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

fn id_matches(entity: &Entity, id: &str) -> bool {
    match entity.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}
