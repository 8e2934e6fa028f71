//! HTTP surface: public localized content and messages, plus the
//! administrator endpoints that edit translations and invalidate the cache.

use crate::content::ContentKind;
use crate::error::ApiError;
use crate::i18n::{
    localize_entity, Entity, Locale, MessageTree, MetricsReport, RequestLocale, TranslationCache,
    TranslationEntry, TranslationValidator, TRANSLATIONS_TAG,
};
use crate::security::{constant_time_compare, presented_admin_key};
use crate::store::ContentStore;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub cache: Arc<TranslationCache>,
    admin_api_key: Option<Arc<str>>,
}

impl AppState {
    /// The cache reads translations from the same store the handlers write to.
    pub fn new<S>(store: Arc<S>, freshness: Duration, admin_api_key: Option<String>) -> Self
    where
        S: ContentStore + 'static,
    {
        let cache = Arc::new(TranslationCache::new(store.clone(), freshness));
        Self {
            store,
            cache,
            admin_api_key: admin_api_key.map(Arc::from),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route(
            "/translations",
            get(list_translations).put(upsert_translation),
        )
        .route("/translations/:namespace/:key", delete(delete_translation))
        .route("/revalidate", post(revalidate))
        .route("/cache/metrics", get(cache_metrics))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(health))
        .route("/api/messages", get(negotiated_messages))
        .route("/api/messages/:locale", get(locale_messages))
        .route("/api/content/:kind", get(list_content))
        .route("/api/content/:kind/:id", get(get_content))
        .nest("/api/admin", admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.admin_api_key.as_deref() else {
        return Err(ApiError::AdminDisabled);
    };

    let authorized = presented_admin_key(request.headers())
        .is_some_and(|key| constant_time_compare(key, expected));
    if !authorized {
        warn!(path = %request.uri().path(), "Rejected admin request");
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}

// ==================== Public ====================

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let timestamp = Utc::now().to_rfc3339();
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": timestamp })),
        ),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": timestamp })),
            )
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesResponse {
    locale: Locale,
    messages: Arc<MessageTree>,
}

async fn negotiated_messages(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
) -> Result<Json<MessagesResponse>, ApiError> {
    messages_for(&state, locale).await
}

/// Unknown codes in the path fall back to the base locale.
async fn locale_messages(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<MessagesResponse>, ApiError> {
    messages_for(&state, Locale::from_code_or_base(&code)).await
}

async fn messages_for(state: &AppState, locale: Locale) -> Result<Json<MessagesResponse>, ApiError> {
    let messages = state.cache.get_message_tree(locale).await?;
    Ok(Json(MessagesResponse { locale, messages }))
}

#[derive(Debug, Serialize)]
struct ContentList {
    locale: Locale,
    items: Vec<Entity>,
}

#[derive(Debug, Serialize)]
struct ContentItem {
    locale: Locale,
    item: Entity,
}

fn content_kind(slug: &str) -> Result<ContentKind, ApiError> {
    ContentKind::from_slug(slug).ok_or_else(|| ApiError::UnknownContent(slug.to_string()))
}

async fn list_content(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequestLocale(locale): RequestLocale,
) -> Result<Json<ContentList>, ApiError> {
    let kind = content_kind(&slug)?;
    let rows = state.store.list_entities(kind).await?;

    let items = rows
        .iter()
        .map(|row| localize_entity(row, kind.localized_fields(), locale))
        .collect();

    Ok(Json(ContentList { locale, items }))
}

async fn get_content(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
    RequestLocale(locale): RequestLocale,
) -> Result<Json<ContentItem>, ApiError> {
    let kind = content_kind(&slug)?;
    let row = state
        .store
        .get_entity(kind, &id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(ContentItem {
        locale,
        item: localize_entity(&row, kind.localized_fields(), locale),
    }))
}

// ==================== Admin ====================

async fn list_translations(
    State(state): State<AppState>,
) -> Result<Json<Vec<TranslationEntry>>, ApiError> {
    Ok(Json(state.store.fetch_translations().await?))
}

#[derive(Debug, Serialize)]
struct SavedTranslation {
    saved: bool,
    warnings: Vec<String>,
}

async fn upsert_translation(
    State(state): State<AppState>,
    Json(entry): Json<TranslationEntry>,
) -> Result<Json<SavedTranslation>, ApiError> {
    let report = TranslationValidator::validate(&entry);
    if report.has_errors() {
        return Err(ApiError::Invalid(report.errors));
    }
    if report.has_warnings() {
        warn!(
            "Translation validation warnings for {}.{}: {:?}",
            entry.namespace, entry.key, report.warnings
        );
    }

    state.store.upsert_translation(&entry).await?;
    state.cache.revalidate_tag(TRANSLATIONS_TAG);
    info!(namespace = %entry.namespace, key = %entry.key, "Translation saved");

    Ok(Json(SavedTranslation {
        saved: true,
        warnings: report.warnings,
    }))
}

async fn delete_translation(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete_translation(&namespace, &key).await? {
        return Err(ApiError::NotFound);
    }

    state.cache.revalidate_tag(TRANSLATIONS_TAG);
    info!(namespace = %namespace, key = %key, "Translation deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct RevalidateQuery {
    tag: Option<String>,
}

async fn revalidate(
    State(state): State<AppState>,
    Query(query): Query<RevalidateQuery>,
) -> Json<Value> {
    let tag = query.tag.unwrap_or_else(|| TRANSLATIONS_TAG.to_string());
    let revalidated = state.cache.revalidate_tag(&tag);

    Json(json!({
        "tag": tag,
        "revalidated": revalidated,
        "now": Utc::now().timestamp_millis(),
    }))
}

async fn cache_metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    Json(state.cache.metrics().report())
}
