//! Locale configuration of a translation context.
/// Settings types and validation
mod types;

pub(crate) use types::format_validation_errors;
pub use types::{
    LocaleSettings,
    ValidationError,
    validate_locales,
};
