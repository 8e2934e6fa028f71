//! Conversion of per-locale message bundles into translation rows.
//!
//! A bundle is the JSON shape served to the UI: `{ namespace: { key: text } }`.
//! The `ru` bundle defines which rows exist; `kk` and `en` only contribute
//! values for keys that `ru` has.

use crate::i18n::TranslationEntry;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub entries: Vec<TranslationEntry>,
    /// `namespace.key` paths that were not imported
    pub skipped: Vec<String>,
}

pub fn entries_from_bundles(ru: &Value, kk: Option<&Value>, en: Option<&Value>) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();

    let Some(namespaces) = ru.as_object() else {
        warn!("ru bundle is not a JSON object, nothing to import");
        return outcome;
    };

    for (namespace, keys) in namespaces {
        let Some(keys) = keys.as_object() else {
            outcome.skipped.push(namespace.clone());
            continue;
        };

        for (key, value) in keys {
            let path = format!("{}.{}", namespace, key);
            let Some(ru_text) = value.as_str().filter(|s| !s.is_empty()) else {
                warn!(path = %path, "Skipping entry without a plain ru string");
                outcome.skipped.push(path);
                continue;
            };

            outcome.entries.push(TranslationEntry {
                namespace: namespace.clone(),
                key: key.clone(),
                ru: ru_text.to_string(),
                kk: lookup(kk, namespace, key),
                en: lookup(en, namespace, key),
            });
        }
    }

    // Keys present only in alternate bundles have no base value.
    for (code, bundle) in [("kk", kk), ("en", en)] {
        let Some(namespaces) = bundle.and_then(Value::as_object) else {
            continue;
        };
        for (namespace, keys) in namespaces {
            for key in keys.as_object().into_iter().flat_map(|k| k.keys()) {
                if lookup(Some(ru), namespace, key).is_none() {
                    warn!(locale = code, namespace = %namespace, key = %key, "Key missing from ru bundle");
                    outcome.skipped.push(format!("{}.{}", namespace, key));
                }
            }
        }
    }

    outcome
}

fn lookup(bundle: Option<&Value>, namespace: &str, key: &str) -> Option<String> {
    bundle?
        .get(namespace)?
        .get(key)?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{project, Locale};
    use serde_json::json;

    #[test]
    fn test_merges_three_bundles() {
        let ru = json!({ "Header": { "tournaments": "Турниры", "news": "Новости" } });
        let kk = json!({ "Header": { "tournaments": "Турнирлер" } });
        let en = json!({ "Header": { "news": "News" } });

        let outcome = entries_from_bundles(&ru, Some(&kk), Some(&en));
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.entries.len(), 2);

        let tournaments = outcome.entries.iter().find(|e| e.key == "tournaments").unwrap();
        assert_eq!(tournaments.kk.as_deref(), Some("Турнирлер"));
        assert_eq!(tournaments.en, None);
    }

    #[test]
    fn test_alternate_only_keys_are_skipped() {
        let ru = json!({ "Footer": { "contacts": "Контакты" } });
        let en = json!({ "Footer": { "contacts": "Contacts", "legal": "Legal" } });

        let outcome = entries_from_bundles(&ru, None, Some(&en));
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.skipped, vec!["Footer.legal".to_string()]);
    }

    #[test]
    fn test_nested_and_non_string_values_are_skipped() {
        let ru = json!({
            "Home": { "title": "Главная", "hero": { "cta": "Подробнее" }, "count": 3 },
            "Broken": "not an object"
        });

        let outcome = entries_from_bundles(&ru, None, None);
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.skipped.len(), 3);
    }

    #[test]
    fn test_projection_reproduces_bundles() {
        let ru = json!({ "Nav": { "home": "Главная", "staff": "Состав" } });
        let kk = json!({ "Nav": { "home": "Басты бет" } });

        let outcome = entries_from_bundles(&ru, Some(&kk), None);

        let kk_tree = serde_json::to_value(project(&outcome.entries, Locale::KK)).unwrap();
        assert_eq!(kk_tree, json!({ "Nav": { "home": "Басты бет", "staff": "Состав" } }));
        let ru_tree = serde_json::to_value(project(&outcome.entries, Locale::RU)).unwrap();
        assert_eq!(ru_tree, ru);
    }
}
