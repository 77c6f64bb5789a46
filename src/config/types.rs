use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;
use unic_langid::LanguageIdentifier;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// Name of the offending field (e.g., "origin")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

pub(crate) fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Origin and target locales of a translation context.
///
/// Meant to be embedded in the host application's own configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleSettings {
    /// Locale the keys and literal strings are written in (e.g., "en").
    pub origin: String,
    /// Locale to translate into (e.g., "es-LA").
    pub target: String,
}

impl LocaleSettings {
    #[must_use]
    pub fn new(origin: impl Into<String>, target: impl Into<String>) -> Self {
        Self { origin: origin.into(), target: target.into() }
    }

    /// Checks the settings before they are used, e.g. after loading a config file.
    ///
    /// Stricter than [`validate_locales`]: both codes must also be well-formed
    /// language identifiers.
    ///
    /// # Errors
    /// - Origin or target is empty
    /// - Origin or target is not a language identifier
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<_> = self
            .fields()
            .into_iter()
            .filter_map(|field| require_locale(field).or_else(|| require_language_identifier(field)))
            .collect();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// `(field name, value)` pairs in declaration order.
    fn fields(&self) -> [(&'static str, &str); 2] {
        [("origin", self.origin.as_str()), ("target", self.target.as_str())]
    }
}

/// Checks that an origin/target pair is set.
///
/// Any non-empty code is accepted; the index decides which locales exist.
///
/// # Errors
/// One entry per empty field.
pub fn validate_locales(origin: &str, target: &str) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<_> =
        [("origin", origin), ("target", target)].into_iter().filter_map(require_locale).collect();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Reports an empty locale field.
fn require_locale((field, code): (&str, &str)) -> Option<ValidationError> {
    code.is_empty().then(|| {
        ValidationError::new(
            field,
            "The locale cannot be empty. Please specify a locale code, for example: \"en\"",
        )
    })
}

/// Reports a locale field that does not parse as a language identifier.
fn require_language_identifier((field, code): (&str, &str)) -> Option<ValidationError> {
    let error = code.parse::<LanguageIdentifier>().err()?;

    Some(ValidationError::new(
        field,
        format!("Invalid locale code '{code}': {error}. Expected a language identifier such as \"es-LA\""),
    ))
}
