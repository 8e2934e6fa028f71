//! Request locale negotiation.
//!
//! Sources in priority order: `?locale=` query parameter, `NEXT_LOCALE`
//! cookie, `Accept-Language` header, then the base locale. A source holding
//! an unsupported code is skipped rather than rejected.

use crate::i18n::Locale;
use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::header::{ACCEPT_LANGUAGE, COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Uri};
use std::collections::HashMap;
use std::convert::Infallible;

pub const LOCALE_QUERY_PARAM: &str = "locale";
pub const LOCALE_COOKIE: &str = "NEXT_LOCALE";

/// Extractor yielding the negotiated locale of a request. Never rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

#[async_trait]
impl<S> FromRequestParts<S> for RequestLocale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestLocale(negotiate(&parts.uri, &parts.headers)))
    }
}

pub fn negotiate(uri: &Uri, headers: &HeaderMap) -> Locale {
    locale_from_query(uri)
        .or_else(|| locale_from_cookie(headers))
        .or_else(|| {
            headers
                .get(ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_accept_language)
        })
        .unwrap_or_else(Locale::base)
}

// A malformed query string counts as no query.
fn locale_from_query(uri: &Uri) -> Option<Locale> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    params
        .get(LOCALE_QUERY_PARAM)
        .and_then(|value| Locale::from_code(value))
}

fn locale_from_cookie(headers: &HeaderMap) -> Option<Locale> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == LOCALE_COOKIE)
        .and_then(|(_, value)| Locale::from_code(value.trim().trim_matches('"')))
}

/// Highest-weighted supported language in an `Accept-Language` value.
/// Ties keep header order; `q=0` entries are refused.
pub fn parse_accept_language(value: &str) -> Option<Locale> {
    let mut candidates: Vec<(f32, Locale)> = value
        .split(',')
        .filter_map(|part| {
            let mut components = part.trim().split(';');
            let tag = components.next()?.trim();
            let weight = components
                .filter_map(|param| param.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            if weight <= 0.0 {
                return None;
            }
            Locale::from_code(tag).map(|locale| (weight, locale))
        })
        .collect();

    // Stable sort preserves header order among equal weights.
    candidates.sort_by(|a, b| b.0.total_cmp(&a.0));
    candidates.first().map(|(_, locale)| *locale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(axum::http::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    fn uri(value: &str) -> Uri {
        value.parse().unwrap()
    }

    // ==================== Accept-Language Tests ====================

    #[test]
    fn test_accept_language_first_supported() {
        assert_eq!(parse_accept_language("de-DE,kk;q=0.9,en;q=0.8"), Some(Locale::KK));
    }

    #[test]
    fn test_accept_language_respects_weights() {
        assert_eq!(parse_accept_language("ru;q=0.5, en;q=0.9"), Some(Locale::EN));
    }

    #[test]
    fn test_accept_language_refuses_zero_weight() {
        assert_eq!(parse_accept_language("en;q=0, kk;q=0.1"), Some(Locale::KK));
    }

    #[test]
    fn test_accept_language_unsupported_only() {
        assert_eq!(parse_accept_language("fr-FR,de;q=0.7"), None);
        assert_eq!(parse_accept_language(""), None);
    }

    // ==================== Priority Tests ====================

    #[test]
    fn test_query_beats_cookie_and_header() {
        let h = headers(&[(COOKIE, "NEXT_LOCALE=kk"), (ACCEPT_LANGUAGE, "ru")]);
        assert_eq!(negotiate(&uri("/api/messages?page=2&locale=en"), &h), Locale::EN);
    }

    #[test]
    fn test_cookie_beats_header() {
        let h = headers(&[(COOKIE, "session=abc; NEXT_LOCALE=kk"), (ACCEPT_LANGUAGE, "en")]);
        assert_eq!(negotiate(&uri("/api/messages"), &h), Locale::KK);
    }

    #[test]
    fn test_unknown_query_value_skipped() {
        let h = headers(&[(ACCEPT_LANGUAGE, "en-US")]);
        assert_eq!(negotiate(&uri("/api/messages?locale=fr"), &h), Locale::EN);
    }

    #[test]
    fn test_defaults_to_base_locale() {
        assert_eq!(negotiate(&uri("/"), &HeaderMap::new()), Locale::RU);
        assert_eq!(negotiate(&uri("/?locale=xx"), &HeaderMap::new()), Locale::RU);
    }

    #[test]
    fn test_query_value_is_percent_decoded() {
        assert_eq!(negotiate(&uri("/?locale=%6B%6B"), &HeaderMap::new()), Locale::KK);
        assert_eq!(negotiate(&uri("/?locale=en%2DUS"), &HeaderMap::new()), Locale::EN);
    }

    #[test]
    fn test_quoted_cookie_value() {
        let h = headers(&[(COOKIE, "NEXT_LOCALE=\"kk\"; theme=dark")]);
        assert_eq!(negotiate(&uri("/"), &h), Locale::KK);
    }
}
