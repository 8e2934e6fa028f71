//! Locale type: validated handle onto a registry entry.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use serde::{Serialize, Serializer};
use std::fmt;

/// A supported locale.
///
/// Only constructible from codes present in the [`LocaleRegistry`], so every
/// `Locale` has a configuration and a field suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    pub const RU: Locale = Locale { code: "ru" };
    pub const KK: Locale = Locale { code: "kk" };
    pub const EN: Locale = Locale { code: "en" };

    /// Strict lookup: `None` for codes outside the supported set.
    ///
    /// Accepts region-qualified tags and any ASCII case (`kk-KZ`, `EN`).
    pub fn from_code(code: &str) -> Option<Locale> {
        let primary = code.trim().split(['-', '_']).next().unwrap_or_default();
        let primary = primary.to_ascii_lowercase();

        LocaleRegistry::get()
            .get_by_code(&primary)
            .map(|config| Locale { code: config.code })
    }

    /// Soft lookup: unknown or empty codes degrade to the base locale.
    pub fn from_code_or_base(code: &str) -> Locale {
        Self::from_code(code).unwrap_or_else(Self::base)
    }

    /// The base locale, whose unsuffixed fields are the universal fallback.
    pub fn base() -> Locale {
        Locale {
            code: LocaleRegistry::get().base().code,
        }
    }

    /// Every supported locale, base first.
    pub fn all() -> Vec<Locale> {
        LocaleRegistry::get()
            .list_all()
            .into_iter()
            .map(|config| Locale { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// # Panics
    /// Panics if the code is missing from the registry, which construction
    /// through `from_code` or the constants rules out.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    /// Suffix appended to base field names (`""`, `"Kk"`, `"En"`).
    pub fn field_suffix(&self) -> &'static str {
        self.config().field_suffix
    }

    pub fn is_base(&self) -> bool {
        self.config().is_base
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::base()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
