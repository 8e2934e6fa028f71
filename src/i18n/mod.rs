//! Localized-content resolution and translation caching.
//!
//! # Architecture
//!
//! - `registry`: the closed set of supported locales and their field suffixes
//! - `locale`: validated `Locale` handle with soft fallback to the base locale
//! - `resolver`: per-field resolution of `title` / `titleKk` / `titleEn` columns
//! - `projection`: translation rows -> per-locale `MessageTree`
//! - `cache`: per-locale memoization with freshness window and tag invalidation
//! - `negotiate`: request locale from query, cookie or `Accept-Language`
//! - `validator`: checks on administrator-submitted translation rows
//! - `import`: message bundles -> translation rows
//! - `metrics`: cache counters
//!
//! # Example
//!
//! ```rust,ignore
//! use federation_portal::i18n::{resolve_field, Locale, TranslationCache};
//!
//! let locale = Locale::from_code_or_base("kk");
//! let messages = cache.get_message_tree(locale).await?;
//! let title = resolve_field(&news, "title", locale);
//! ```

mod cache;
mod import;
mod locale;
mod metrics;
mod negotiate;
mod projection;
mod registry;
mod resolver;
mod validator;

pub use cache::{TranslationCache, DEFAULT_FRESHNESS, TRANSLATIONS_TAG};
pub use import::{entries_from_bundles, ImportOutcome};
pub use locale::Locale;
pub use metrics::{CacheMetrics, MetricsReport};
pub use negotiate::{negotiate, parse_accept_language, RequestLocale, LOCALE_COOKIE, LOCALE_QUERY_PARAM};
pub use projection::{project, MessageTree, TranslationEntry};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use resolver::{localize_entity, localized_field_name, resolve_field, resolve_fields, Entity};
pub use validator::{TranslationValidator, ValidationReport};
