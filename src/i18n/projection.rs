//! Projection of translation rows into per-locale message trees.

use crate::i18n::Locale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single localizable UI string as stored in the `Translation` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TranslationEntry {
    pub namespace: String,
    pub key: String,
    /// Base value, always present
    pub ru: String,
    pub kk: Option<String>,
    pub en: Option<String>,
}

impl TranslationEntry {
    /// Value shown for `locale`, falling back to `ru` when the locale's
    /// column is null or empty.
    pub fn value_for(&self, locale: Locale) -> &str {
        let localized = match locale.code() {
            "kk" => self.kk.as_deref(),
            "en" => self.en.as_deref(),
            _ => None,
        };

        match localized {
            Some(value) if !value.is_empty() => value,
            _ => &self.ru,
        }
    }
}

/// namespace -> key -> value, for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageTree(BTreeMap<String, BTreeMap<String, String>>);

impl MessageTree {
    pub fn get(&self, namespace: &str, key: &str) -> Option<&str> {
        self.0
            .get(namespace)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
    }

    pub fn namespace(&self, namespace: &str) -> Option<&BTreeMap<String, String>> {
        self.0.get(namespace)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Total number of keys across all namespaces.
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the message tree for `locale` from every translation row.
pub fn project(entries: &[TranslationEntry], locale: Locale) -> MessageTree {
    let mut messages: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

    for entry in entries {
        messages
            .entry(entry.namespace.clone())
            .or_default()
            .insert(entry.key.clone(), entry.value_for(locale).to_string());
    }

    MessageTree(messages)
}
