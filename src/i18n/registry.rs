//! Locale registry: single source of truth for the supported locales.
//!
//! The set is closed: Russian is the base locale and Kazakh and English are the
//! two alternates. Each alternate carries the capitalized suffix that content
//! tables append to a base column name (`title` -> `titleKk`).

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Short locale code (e.g., "ru", "kk", "en")
    pub code: &'static str,

    /// English name of the locale
    pub name: &'static str,

    /// Native name of the locale
    pub native_name: &'static str,

    /// Suffix appended to base field names; empty for the base locale
    pub field_suffix: &'static str,

    /// Whether this is the base locale (exactly one must be true)
    pub is_base: bool,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// Matching is exact; callers that accept user input normalize first.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All supported locales, base locale first.
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Get the base locale configuration.
    ///
    /// # Panics
    /// Panics if the static table does not define exactly one base locale.
    pub fn base(&self) -> &LocaleConfig {
        let base: Vec<_> = self.locales.iter().filter(|l| l.is_base).collect();

        match base.len() {
            0 => panic!("No base locale found in registry"),
            1 => base[0],
            _ => panic!("Multiple base locales found in registry"),
        }
    }
}

fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
            field_suffix: "",
            is_base: true,
        },
        LocaleConfig {
            code: "kk",
            name: "Kazakh",
            native_name: "Қазақша",
            field_suffix: "Kk",
            is_base: false,
        },
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            field_suffix: "En",
            is_base: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LocaleRegistry::get();
        let registry2 = LocaleRegistry::get();
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_kazakh() {
        let config = LocaleRegistry::get().get_by_code("kk").unwrap();
        assert_eq!(config.name, "Kazakh");
        assert_eq!(config.field_suffix, "Kk");
        assert!(!config.is_base);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LocaleRegistry::get().get_by_code("de").is_none());
        assert!(LocaleRegistry::get().get_by_code("RU").is_none());
    }

    #[test]
    fn test_list_all_has_three_locales_base_first() {
        let all = LocaleRegistry::get().list_all();
        let codes: Vec<_> = all.iter().map(|l| l.code).collect();
        assert_eq!(codes, vec!["ru", "kk", "en"]);
    }

    #[test]
    fn test_base_is_russian_with_empty_suffix() {
        let base = LocaleRegistry::get().base();
        assert_eq!(base.code, "ru");
        assert_eq!(base.field_suffix, "");
    }

    #[test]
    fn test_only_base_has_empty_suffix() {
        for locale in LocaleRegistry::get().list_all() {
            assert_eq!(locale.field_suffix.is_empty(), locale.is_base, "{}", locale.code);
        }
    }
}
