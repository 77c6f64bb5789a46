//! gt
//!
//! Key and literal-string translation with printf verbs that can be reordered
//! through tags (`%s#name`), so target languages are free to change word order.

pub mod build;
pub mod config;
pub mod error;
pub mod format;
pub mod index;
pub mod locale;
pub mod render;
pub mod resolver;
pub mod verb;

pub use build::Build;
pub use config::LocaleSettings;
pub use error::{
    ErrorKind,
    TranslateError,
};
pub use format::Arg;
pub use index::Index;
