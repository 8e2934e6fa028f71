//! Locale field resolution for content records.
//!
//! Content rows are plain JSON objects. A localizable column has a base
//! value (`title`) and optional siblings named with the locale suffix
//! (`titleKk`, `titleEn`). Missing or empty siblings fall back to the base
//! value so the base language never disappears from a page.

use crate::i18n::Locale;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A content record as read from the store.
pub type Entity = Map<String, Value>;

/// Name of the column holding `field` for `locale` (`title` + `Kk`).
pub fn localized_field_name(field: &str, locale: Locale) -> String {
    format!("{}{}", field, locale.field_suffix())
}

/// Resolve the display value of `field` for `locale`.
///
/// Returns the suffixed value when present and non-empty, otherwise the base
/// value, otherwise an empty string.
pub fn resolve_field(entity: &Entity, field: &str, locale: Locale) -> String {
    if !locale.is_base() {
        let localized = localized_field_name(field, locale);
        if let Some(value) = entity.get(&localized).and_then(display_value) {
            return value;
        }
    }

    entity.get(field).and_then(display_value).unwrap_or_default()
}

/// Resolve several fields at once.
pub fn resolve_fields(entity: &Entity, fields: &[&str], locale: Locale) -> BTreeMap<String, String> {
    fields
        .iter()
        .map(|field| (field.to_string(), resolve_field(entity, field, locale)))
        .collect()
}

/// Build the API payload for one record.
///
/// Localizable fields are replaced by their resolved value and every
/// suffixed variant is dropped; all other columns pass through unchanged.
pub fn localize_entity(entity: &Entity, fields: &[&str], locale: Locale) -> Entity {
    let variants: Vec<String> = fields
        .iter()
        .flat_map(|field| {
            Locale::all()
                .into_iter()
                .filter(|l| !l.is_base())
                .map(move |l| localized_field_name(field, l))
        })
        .collect();

    let mut out: Entity = entity
        .iter()
        .filter(|(name, _)| !variants.iter().any(|v| v == *name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    for field in fields {
        out.insert(
            field.to_string(),
            Value::String(resolve_field(entity, field, locale)),
        );
    }

    out
}

// Null and empty strings count as absent.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
