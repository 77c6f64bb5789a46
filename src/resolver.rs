//! Origin and target string resolution.

use crate::config::validate_locales;
use crate::error::ErrorKind;
use crate::index::Index;

/// Strings found for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// Index key; differs from the input when it was a literal origin string.
    pub key: &'a str,
    pub origin: &'a str,
    pub target: &'a str,
}

/// Resolves the origin and target strings of `key`.
///
/// `key` is either an index key or a literal string in the origin locale. Key
/// lookups in both locales fall back to the two-letter language prefix; literal
/// strings only match the exact origin locale.
///
/// # Errors
/// - [`ErrorKind::Config`] when a locale is empty or malformed
/// - [`ErrorKind::NotFound`] when either string cannot be found
pub fn resolve<'a>(
    index: &'a Index,
    key: &'a str,
    origin: &str,
    target: &str,
) -> Result<Resolved<'a>, ErrorKind> {
    validate_locales(origin, target).map_err(ErrorKind::Config)?;

    let (key, origin_string) = resolve_origin(index, key, origin)
        .ok_or_else(|| ErrorKind::NotFound { key: key.to_string(), locale: origin.to_string() })?;

    let target_string = index
        .lookup(key, target)
        .ok_or_else(|| ErrorKind::NotFound { key: key.to_string(), locale: target.to_string() })?;

    Ok(Resolved { key, origin: origin_string, target: target_string })
}

/// Finds `(key, origin string)` by key first, then by literal string.
fn resolve_origin<'a>(
    index: &'a Index,
    key: &'a str,
    origin: &str,
) -> Option<(&'a str, &'a str)> {
    if let Some(string) = index.lookup(key, origin) {
        return Some((key, string));
    }

    let found = index.find_key(origin, key)?;
    tracing::debug!(key = found, origin, "Resolved literal string to key");

    Some((found, key))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[fixture]
    fn index() -> Index {
        [
            ("welcome", "en", "Welcome to %s#title, %s#name!"),
            ("welcome", "tr", "%s#name, %s#title'ya hoşgeldiniz!"),
            ("color", "en", "Color"),
            ("color", "en-GB", "Colour"),
            ("color", "es", "Color"),
            ("color", "es-LA", "Colorcito"),
            ("hello", "en", "Hello %s#name!"),
            ("hello", "es", "¡Hola %s#name!"),
            ("untranslated", "en", "Only in English"),
        ]
        .into_iter()
        .collect()
    }

    #[rstest]
    fn resolves_by_key(index: Index) {
        let resolved = resolve(&index, "welcome", "en", "tr").unwrap();

        assert_that!(resolved.key, eq("welcome"));
        assert_that!(resolved.origin, eq("Welcome to %s#title, %s#name!"));
        assert_that!(resolved.target, eq("%s#name, %s#title'ya hoşgeldiniz!"));
    }

    #[rstest]
    #[case::exact_target("es-LA", "Colorcito")]
    #[case::prefix_target("es-MX", "Color")]
    #[case::exact_english("en-GB", "Colour")]
    #[case::prefix_english("en-US", "Color")]
    fn target_fallback(index: Index, #[case] target: &str, #[case] expected: &str) {
        let resolved = resolve(&index, "color", "en", target).unwrap();

        assert_that!(resolved.target, eq(expected));
    }

    #[rstest]
    fn origin_falls_back_to_language_prefix(index: Index) {
        let resolved = resolve(&index, "hello", "en-AU", "es").unwrap();

        assert_that!(resolved.origin, eq("Hello %s#name!"));
        assert_that!(resolved.target, eq("¡Hola %s#name!"));
    }

    #[rstest]
    fn resolves_literal_origin_string(index: Index) {
        let resolved = resolve(&index, "Hello %s#name!", "en", "es").unwrap();

        assert_that!(resolved.key, eq("hello"));
        assert_that!(resolved.origin, eq("Hello %s#name!"));
        assert_that!(resolved.target, eq("¡Hola %s#name!"));
    }

    #[rstest]
    fn literal_string_is_not_matched_through_prefix(index: Index) {
        let result = resolve(&index, "Color", "en-GB", "es");

        assert_that!(
            result,
            err(eq(&ErrorKind::NotFound { key: "Color".to_string(), locale: "en-GB".to_string() }))
        );
    }

    #[rstest]
    fn literal_string_in_regional_origin(index: Index) {
        let resolved = resolve(&index, "Colour", "en-GB", "es-LA").unwrap();

        assert_that!(resolved.key, eq("color"));
        assert_that!(resolved.target, eq("Colorcito"));
    }

    #[rstest]
    #[case::unknown_key("missing", "en", "es", "en")]
    #[case::missing_target("untranslated", "en", "es", "es")]
    #[case::literal_missing_target("Only in English", "en", "tr", "tr")]
    #[case::literal_wrong_locale("Hello %s#name!", "tr", "es", "tr")]
    fn not_found(
        index: Index,
        #[case] key: &str,
        #[case] origin: &str,
        #[case] target: &str,
        #[case] locale: &str,
    ) {
        let result = resolve(&index, key, origin, target);

        assert_that!(
            result,
            err(matches_pattern!(ErrorKind::NotFound { key: anything(), locale: eq(locale) }))
        );
    }

    #[rstest]
    fn literal_lookup_reports_resolved_key_when_target_missing(index: Index) {
        let result = resolve(&index, "Only in English", "en", "tr");

        assert_that!(
            result,
            err(eq(&ErrorKind::NotFound {
                key: "untranslated".to_string(),
                locale: "tr".to_string()
            }))
        );
    }

    #[rstest]
    #[case::empty_origin("", "es")]
    #[case::empty_target("en", "")]
    #[case::both_empty("", "")]
    fn unset_locale_is_config_error(index: Index, #[case] origin: &str, #[case] target: &str) {
        let result = resolve(&index, "hello", origin, target);

        assert_that!(result, err(matches_pattern!(ErrorKind::Config(anything()))));
    }
}
