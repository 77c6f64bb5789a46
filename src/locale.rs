//! Locale code helpers.

/// Returns the two-letter language prefix of a locale code.
///
/// # Examples
/// - `es-LA` → `Some("es")`
/// - `en` → `Some("en")`
/// - `e` → `None`
#[must_use]
pub fn language_prefix(locale: &str) -> Option<&str> {
    locale.get(..2)
}

/// Locales to try, in order, when looking up a string for `locale`.
///
/// The exact locale comes first, followed by its language prefix when that differs.
pub fn lookup_chain(locale: &str) -> impl Iterator<Item = &str> {
    std::iter::once(locale).chain(language_prefix(locale).filter(|prefix| *prefix != locale))
}
