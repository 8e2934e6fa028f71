use crate::content::ContentKind;
use crate::i18n::{Entity, TranslationEntry};
use crate::retry::{with_retry_if, RetryConfig};
use crate::store::{ContentStore, StoreError, TranslationStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// Postgres-backed store.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect (retrying transient failures) and make sure the translation
    /// table exists. Content tables are owned by the admin application.
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = with_retry_if(
            &RetryConfig::database_connect(),
            "Database connection",
            || {
                PgPoolOptions::new()
                    .max_connections(max_connections)
                    .acquire_timeout(Duration::from_secs(5))
                    .connect(database_url)
            },
            is_transient,
        )
        .await
        .context("Failed to connect to database")?;

        let db = Self { pool };
        db.ensure_translation_table().await?;

        info!("✓ Database connected");
        Ok(db)
    }

    async fn ensure_translation_table(&self) -> Result<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS "Translation" (
                id SERIAL PRIMARY KEY,
                namespace TEXT NOT NULL,
                key TEXT NOT NULL,
                ru TEXT NOT NULL,
                kk TEXT,
                en TEXT,
                "updatedAt" TIMESTAMPTZ NOT NULL DEFAULT now(),
                UNIQUE (namespace, key)
            )"#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create Translation table")?;

        Ok(())
    }
}

// Configuration and protocol errors will not fix themselves on retry.
fn is_transient(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::Tls(_)
    )
}

#[async_trait]
impl TranslationStore for Database {
    async fn fetch_translations(&self) -> Result<Vec<TranslationEntry>, StoreError> {
        let rows = sqlx::query_as::<_, TranslationEntry>(
            r#"SELECT namespace, key, ru, kk, en FROM "Translation""#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl ContentStore for Database {
    async fn upsert_translation(&self, entry: &TranslationEntry) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO "Translation" (namespace, key, ru, kk, en, "updatedAt")
               VALUES ($1, $2, $3, $4, $5, $6)
               ON CONFLICT (namespace, key) DO UPDATE
               SET ru = EXCLUDED.ru, kk = EXCLUDED.kk, en = EXCLUDED.en,
                   "updatedAt" = EXCLUDED."updatedAt""#,
        )
        .bind(&entry.namespace)
        .bind(&entry.key)
        .bind(&entry.ru)
        .bind(&entry.kk)
        .bind(&entry.en)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Write(e.to_string()))?;

        Ok(())
    }

    async fn delete_translation(&self, namespace: &str, key: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(r#"DELETE FROM "Translation" WHERE namespace = $1 AND key = $2"#)
            .bind(namespace)
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_entities(&self, kind: ContentKind) -> Result<Vec<Entity>, StoreError> {
        let sql = format!(
            "SELECT to_jsonb(t) FROM {} t ORDER BY {}",
            kind.table(),
            kind.order_by()
        );
        let rows: Vec<Value> = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;

        Ok(rows.into_iter().filter_map(into_entity).collect())
    }

    async fn get_entity(&self, kind: ContentKind, id: &str) -> Result<Option<Entity>, StoreError> {
        let sql = format!("SELECT to_jsonb(t) FROM {} t WHERE t.id::text = $1", kind.table());
        let row: Option<Value> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.and_then(into_entity))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn into_entity(value: Value) -> Option<Entity> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
