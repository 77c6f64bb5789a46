//! Translation error types.

use thiserror::Error;

use crate::config::{
    ValidationError,
    format_validation_errors,
};

/// Reason a translation could not be produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Origin or target locale is unset or malformed.
    #[error("Locale configuration is invalid:\n{}", format_validation_errors(.0))]
    Config(Vec<ValidationError>),

    /// No string could be resolved for the key, after all fallbacks.
    #[error("Couldn't find a '{locale}' string for '{key}'")]
    NotFound { key: String, locale: String },

    /// The argument count differs from the verb count of either string.
    #[error(
        "Got {args} arguments, but the origin string has {origin} verbs and the target string has {target}"
    )]
    VerbCountMismatch { args: usize, origin: usize, target: usize },

    /// A target verb has no counterpart in the origin string.
    #[error("Verb '{verb}' has no matching verb in the origin string")]
    TagMismatch { verb: String },
}

/// Error returned by [`Build::translate`](crate::Build::translate).
///
/// Carries the best-effort string the caller can show instead, which is the
/// input key or literal unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct TranslateError {
    /// What went wrong.
    kind: ErrorKind,
    /// Input key or literal.
    fallback: String,
}

impl TranslateError {
    #[must_use]
    pub fn new(kind: ErrorKind, fallback: impl Into<String>) -> Self {
        Self { kind, fallback: fallback.into() }
    }

    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The string to display when the error is ignored.
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    #[must_use]
    pub fn into_fallback(self) -> String {
        self.fallback
    }
}
