//! Validation of translation rows submitted by administrators.
//!
//! Errors reject the row; warnings are logged and the row is stored anyway.

use crate::i18n::TranslationEntry;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make the row unusable
    pub errors: Vec<String>,

    /// Suspicious but storable differences between locales
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

pub struct TranslationValidator;

static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Check a row before it is written to the store.
    ///
    /// - namespace and key must be non-empty identifiers (`[A-Za-z0-9_-]`),
    ///   since the message tree nests on them
    /// - the `ru` value must be non-empty
    /// - `{placeholders}` in `kk`/`en` should match those in `ru`
    pub fn validate(entry: &TranslationEntry) -> ValidationReport {
        let mut report = ValidationReport::new();

        for (label, value) in [("namespace", &entry.namespace), ("key", &entry.key)] {
            if value.trim().is_empty() {
                report.errors.push(format!("{} must not be empty", label));
            } else if !identifier_regex().is_match(value) {
                report.errors.push(format!(
                    "{} '{}' may only contain letters, digits, '_' and '-'",
                    label, value
                ));
            }
        }

        if entry.ru.trim().is_empty() {
            report.errors.push("ru value must not be empty".to_string());
        }

        let base = Self::extract_placeholders(&entry.ru);
        for (code, value) in [("kk", &entry.kk), ("en", &entry.en)] {
            let Some(value) = value.as_deref().filter(|v| !v.is_empty()) else {
                continue;
            };
            let found = Self::extract_placeholders(value);
            if found != base {
                report.warnings.push(format!(
                    "Placeholder mismatch in {}: ru has {:?}, {} has {:?}",
                    code, base, code, found
                ));
            }
        }

        report
    }

    /// Names of `{name}` placeholders, ignoring ICU plural/select bodies.
    pub fn extract_placeholders(text: &str) -> BTreeSet<String> {
        placeholder_regex()
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

fn identifier_regex() -> &'static Regex {
    IDENTIFIER_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"))
}

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*[,}]").expect("valid regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(namespace: &str, key: &str, ru: &str, kk: Option<&str>, en: Option<&str>) -> TranslationEntry {
        TranslationEntry {
            namespace: namespace.to_string(),
            key: key.to_string(),
            ru: ru.to_string(),
            kk: kk.map(str::to_string),
            en: en.map(str::to_string),
        }
    }

    // ==================== Error Tests ====================

    #[test]
    fn test_valid_entry_is_clean() {
        let report = TranslationValidator::validate(&entry(
            "Header",
            "tournaments",
            "Турниры",
            Some("Турнирлер"),
            None,
        ));
        assert!(report.is_clean(), "{:?}", report);
    }

    #[test]
    fn test_empty_fields_are_errors() {
        let report = TranslationValidator::validate(&entry("", " ", "", None, None));
        assert_eq!(report.errors.len(), 3);
    }

    #[test]
    fn test_dotted_key_is_rejected() {
        let report = TranslationValidator::validate(&entry("Header", "menu.news", "Новости", None, None));
        assert!(report.has_errors());
        assert!(report.errors[0].contains("menu.news"));
    }

    // ==================== Placeholder Tests ====================

    #[test]
    fn test_extract_placeholders() {
        let found = TranslationValidator::extract_placeholders("Показано {count} из {total}");
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["count", "total"]);
    }

    #[test]
    fn test_extract_icu_plural_argument() {
        let found =
            TranslationValidator::extract_placeholders("{count, plural, one {# матч} other {# матчей}}");
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["count"]);
    }

    #[test]
    fn test_placeholder_mismatch_is_warning() {
        let report = TranslationValidator::validate(&entry(
            "News",
            "shown",
            "Показано {count}",
            Some("{count} көрсетілді"),
            Some("Shown {total}"),
        ));
        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("en"));
    }

    #[test]
    fn test_empty_alternate_not_checked() {
        let report = TranslationValidator::validate(&entry("News", "shown", "Показано {count}", Some(""), None));
        assert!(report.is_clean());
    }
}
