//! Translation context.

use crate::config::LocaleSettings;
use crate::error::{
    ErrorKind,
    TranslateError,
};
use crate::format::Arg;
use crate::index::Index;
use crate::render::render;
use crate::resolver::resolve;
use crate::verb::parse_verbs;

/// Origin and target locales bound to an [`Index`].
///
/// Changing `origin` or `target` between calls is fine. A `Build` shared
/// between threads must not be mutated while translations run; give each
/// request its own value instead.
///
/// # Examples
/// ```
/// use gt::{Arg, Build, Index};
///
/// let index: Index = [
///     ("welcome", "en", "Welcome to %s#title, %s#name!"),
///     ("welcome", "tr", "%s#name, %s#title'ya hoşgeldiniz!"),
/// ]
/// .into_iter()
/// .collect();
/// let build = Build::new("en", "tr", &index);
///
/// let text = build.t("welcome", &[Arg::from("Yahoo"), Arg::from("Marissa")]);
/// assert_eq!(text, "Marissa, Yahoo'ya hoşgeldiniz!");
/// ```
#[derive(Debug, Clone)]
pub struct Build<'a> {
    pub origin: String,
    pub target: String,
    pub index: &'a Index,
}

impl<'a> Build<'a> {
    #[must_use]
    pub fn new(origin: impl Into<String>, target: impl Into<String>, index: &'a Index) -> Self {
        Self { origin: origin.into(), target: target.into(), index }
    }

    #[must_use]
    pub fn from_settings(settings: &LocaleSettings, index: &'a Index) -> Self {
        Self::new(settings.origin.clone(), settings.target.clone(), index)
    }

    /// Current locales as settings.
    #[must_use]
    pub fn settings(&self) -> LocaleSettings {
        LocaleSettings::new(self.origin.clone(), self.target.clone())
    }

    /// Translates `key`, returning the input unchanged on any error.
    #[must_use]
    pub fn t(&self, key: &str, args: &[Arg]) -> String {
        self.translate(key, args).unwrap_or_else(TranslateError::into_fallback)
    }

    /// Translates a key or literal origin string into the target locale.
    ///
    /// `args` follow the verb order of the origin string and are moved to the
    /// matching tagged verbs of the target string. Without `args` the target
    /// string is returned as is.
    ///
    /// # Errors
    /// Any [`ErrorKind`]; the error carries `key` as its fallback.
    pub fn translate(&self, key: &str, args: &[Arg]) -> Result<String, TranslateError> {
        let fail = |kind: ErrorKind| {
            tracing::debug!(
                key,
                origin = %self.origin,
                target = %self.target,
                "Translation failed: {kind}"
            );
            TranslateError::new(kind, key)
        };

        let resolved = resolve(self.index, key, &self.origin, &self.target).map_err(fail)?;

        if args.is_empty() {
            return Ok(resolved.target.to_string());
        }

        let origin_verbs = parse_verbs(resolved.origin);
        let target_verbs = parse_verbs(resolved.target);
        tracing::trace!(
            key = resolved.key,
            origin_verbs = origin_verbs.len(),
            target_verbs = target_verbs.len(),
            args = args.len(),
            "Rendering translation"
        );

        render(resolved.target, &origin_verbs, &target_verbs, args).map_err(fail)
    }
}
