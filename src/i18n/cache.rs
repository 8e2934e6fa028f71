//! Per-locale memoization of translation message trees.
//!
//! Each locale's tree is rebuilt lazily: on first use, after the freshness
//! window elapses, or after the `translations` tag is invalidated. An
//! invalidation bumps a generation counter; entries computed under an older
//! generation are never served again, including entries whose store read
//! was already in flight when the invalidation arrived.

use crate::i18n::{project, CacheMetrics, Locale, MessageTree};
use crate::store::{StoreError, TranslationStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info};

/// Invalidation tag shared by every locale's message tree.
pub const TRANSLATIONS_TAG: &str = "translations";

/// Default freshness window.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(300);

struct CachedTree {
    tree: Arc<MessageTree>,
    computed_at: Instant,
    generation: u64,
}

pub struct TranslationCache {
    store: Arc<dyn TranslationStore>,
    entries: RwLock<HashMap<Locale, CachedTree>>,
    generation: AtomicU64,
    freshness: Duration,
    metrics: CacheMetrics,
}

impl TranslationCache {
    pub fn new(store: Arc<dyn TranslationStore>, freshness: Duration) -> Self {
        Self {
            store,
            entries: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
            freshness,
            metrics: CacheMetrics::new(),
        }
    }

    /// Message tree for `locale`, reading the store only when the cached
    /// tree is missing, expired or invalidated.
    ///
    /// Store failures are returned to the caller and leave the cache as it
    /// was; nothing is cached for a failed read.
    pub async fn get_message_tree(&self, locale: Locale) -> Result<Arc<MessageTree>, StoreError> {
        // Captured before the store read so a concurrent invalidation marks
        // the result as stale.
        let generation = self.generation.load(Ordering::Acquire);

        if let Some(tree) = self.lookup(locale, generation) {
            self.metrics.record_cache_hit();
            debug!(locale = %locale, "Message tree cache hit");
            return Ok(tree);
        }

        self.metrics.record_cache_miss();
        self.recompute(locale, generation).await
    }

    /// Invalidate every entry carrying `tag`. Returns `false` for tags this
    /// cache does not know, which are ignored.
    pub fn revalidate_tag(&self, tag: &str) -> bool {
        if tag != TRANSLATIONS_TAG {
            debug!(tag, "Ignoring revalidation for unknown tag");
            return false;
        }

        self.invalidate();
        true
    }

    /// Mark every locale's tree stale. The next read per locale recomputes.
    pub fn invalidate(&self) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.metrics.record_invalidation();
        info!(generation, "Translation cache invalidated");
    }

    /// Build the tree for every supported locale, e.g. at startup.
    pub async fn warm_all(&self) -> Result<(), StoreError> {
        for locale in Locale::all() {
            self.get_message_tree(locale).await?;
        }
        Ok(())
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    fn lookup(&self, locale: Locale, generation: u64) -> Option<Arc<MessageTree>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let cached = entries.get(&locale)?;

        let fresh = cached.generation == generation && cached.computed_at.elapsed() < self.freshness;
        fresh.then(|| Arc::clone(&cached.tree))
    }

    async fn recompute(&self, locale: Locale, generation: u64) -> Result<Arc<MessageTree>, StoreError> {
        self.metrics.record_store_read();

        let rows = match self.store.fetch_translations().await {
            Ok(rows) => rows,
            Err(e) => {
                self.metrics.record_store_failure();
                error!(locale = %locale, error = %e, "Failed to rebuild message tree");
                return Err(e);
            }
        };

        let tree = Arc::new(project(&rows, locale));
        info!(locale = %locale, keys = tree.len(), generation, "Rebuilt message tree");

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // A concurrent rebuild under a newer generation wins.
        let newer_exists = entries
            .get(&locale)
            .is_some_and(|cached| cached.generation > generation);
        if !newer_exists {
            entries.insert(
                locale,
                CachedTree {
                    tree: Arc::clone(&tree),
                    computed_at: Instant::now(),
                    generation,
                },
            );
        }

        Ok(tree)
    }
}

impl std::fmt::Debug for TranslationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self
            .entries
            .read()
            .map(|entries| entries.len())
            .unwrap_or_default();
        f.debug_struct("TranslationCache")
            .field("cached_locales", &cached)
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .field("freshness", &self.freshness)
            .finish()
    }
}
