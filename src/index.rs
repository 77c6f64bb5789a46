//! In-memory string index: key → locale → template.

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

use crate::locale::lookup_chain;

/// Translation strings of a single key, by locale code.
pub type LocaleStrings = HashMap<String, String>;

/// All keys and their locale strings.
///
/// Loading is up to the host application; the type deserializes from a map of
/// the same shape (e.g., `{"greeting": {"en": "Hello", "es": "Hola"}}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Index {
    entries: HashMap<String, LocaleStrings>,
}

impl Index {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the `locale` string of `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        locale: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.entries.entry(key.into()).or_default().insert(locale.into(), template.into());
    }

    /// Returns the string stored for exactly `key` and `locale`.
    ///
    /// Empty strings count as missing.
    #[must_use]
    pub fn get(&self, key: &str, locale: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|strings| strings.get(locale))
            .map(String::as_str)
            .filter(|template| !template.is_empty())
    }

    /// Returns the string for `key` in `locale`, falling back to the language prefix.
    #[must_use]
    pub fn lookup(&self, key: &str, locale: &str) -> Option<&str> {
        lookup_chain(locale).find_map(|candidate| self.get(key, candidate))
    }

    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&LocaleStrings> {
        self.entries.get(key)
    }

    /// Finds the key whose `locale` string equals `value`.
    ///
    /// When several keys match, the smallest one wins so the result does not
    /// depend on map iteration order.
    #[must_use]
    pub fn find_key(&self, locale: &str, value: &str) -> Option<&str> {
        if value.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .filter(|(_, strings)| strings.get(locale).is_some_and(|v| v == value))
            .map(|(key, _)| key.as_str())
            .min()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, L, T> FromIterator<(K, L, T)> for Index
where
    K: Into<String>,
    L: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, L, T)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (key, locale, template) in iter {
            index.insert(key, locale, template);
        }
        index
    }
}

impl From<HashMap<String, LocaleStrings>> for Index {
    fn from(entries: HashMap<String, LocaleStrings>) -> Self {
        Self { entries }
    }
}
