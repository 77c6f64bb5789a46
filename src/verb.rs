//! Tagged printf verb parsing.
//!
//! A verb is a positional conversion spec (`%s`, `%-5.2f`, `%2$d`, ...) that may
//! be followed by a tag naming its role in the sentence (`%s#name`). Tags let
//! translators reorder verbs: arguments follow the tag, not the position.

use std::ops::Range;
use std::sync::OnceLock;

use regex::{
    Captures,
    Regex,
};

/// `%%`, or a conversion spec with an optional `#tag` and an optional `+` tag terminator.
const VERB_PATTERN: &str = concat!(
    r"%%|%(?:(?P<index>[0-9]+)\$)?",
    r"(?P<flags>(?:[+\- 0]|'.)*)",
    r"(?P<width>[0-9]*)",
    r"(?:\.(?P<precision>[0-9]+))?",
    r"(?P<conversion>[bcdeEfFgGopqstTuUvxX])",
    r"(?:#(?P<tag>[A-Za-z0-9_-]+)\+?)?",
);

/// Cache for [`verb_regex`].
static VERB_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

/// Compiled [`VERB_PATTERN`], or `None` if it failed to compile.
fn verb_regex() -> Option<&'static Regex> {
    VERB_REGEX
        .get_or_init(|| {
            Regex::new(VERB_PATTERN)
                .map_err(|e| tracing::error!("Failed to compile verb pattern: {e}"))
                .ok()
        })
        .as_ref()
}

/// A placeholder found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verb {
    /// Literal text, tag included (e.g., `%-5s#name`).
    pub text: String,
    /// Byte range of [`Self::text`] in the template.
    pub range: Range<usize>,
    /// Conversion spec without the tag (e.g., `%-5s`).
    pub spec: String,
    /// Explicit 1-based argument index (`%2$s`).
    pub index: Option<usize>,
    pub flags: String,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    /// Conversion character; `%` for the `%%` escape.
    pub conversion: char,
    pub tag: Option<String>,
}

impl Verb {
    /// Builds a verb from a match of [`VERB_PATTERN`].
    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let whole = caps.get(0)?;
        // Digit runs too long for usize saturate so callers can reject them.
        let number = |name: &str| {
            caps.name(name)
                .filter(|m| !m.as_str().is_empty())
                .map(|m| m.as_str().parse().unwrap_or(usize::MAX))
        };

        let Some(conversion) = caps.name("conversion").and_then(|m| m.as_str().chars().next())
        else {
            return Some(Self {
                text: whole.as_str().to_string(),
                range: whole.range(),
                spec: whole.as_str().to_string(),
                index: None,
                flags: String::new(),
                width: None,
                precision: None,
                conversion: '%',
                tag: None,
            });
        };

        let spec_end = caps.name("conversion").map_or(whole.end(), |m| m.end());
        let spec = whole.as_str().get(..spec_end - whole.start())?.to_string();

        Some(Self {
            text: whole.as_str().to_string(),
            range: whole.range(),
            spec,
            index: number("index"),
            flags: caps.name("flags").map(|m| m.as_str().to_string()).unwrap_or_default(),
            width: number("width"),
            precision: number("precision"),
            conversion,
            tag: caps.name("tag").map(|m| m.as_str().to_string()),
        })
    }

    /// `false` for the `%%` escape.
    #[must_use]
    pub const fn takes_argument(&self) -> bool {
        self.conversion != '%'
    }

    #[must_use]
    pub const fn is_tagged(&self) -> bool {
        self.tag.is_some()
    }

    /// Whether two verbs denote the same slot: equal conversion spec and tag.
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        self.spec == other.spec && self.tag == other.tag
    }

    /// Conversion spec without the explicit argument index.
    ///
    /// Used once arguments are already in target order.
    #[must_use]
    pub fn positional_spec(&self) -> String {
        if !self.takes_argument() {
            return self.spec.clone();
        }

        let mut spec = String::from("%");
        spec.push_str(&self.flags);
        if let Some(width) = self.width {
            spec.push_str(&width.to_string());
        }
        if let Some(precision) = self.precision {
            spec.push('.');
            spec.push_str(&precision.to_string());
        }
        spec.push(self.conversion);
        spec
    }
}

/// Extracts all verbs of `template`, left to right.
#[must_use]
pub fn parse_verbs(template: &str) -> Vec<Verb> {
    let Some(regex) = verb_regex() else {
        return Vec::new();
    };

    regex.captures_iter(template).filter_map(|caps| Verb::from_captures(&caps)).collect()
}

/// Rewrites every verb of `template` with `replacement`, keeping the text in between.
pub(crate) fn replace_verbs(
    template: &str,
    verbs: &[Verb],
    replacement: impl Fn(&Verb) -> String,
) -> String {
    let mut result = String::with_capacity(template.len());
    let mut last = 0;

    for verb in verbs {
        result.push_str(template.get(last..verb.range.start).unwrap_or_default());
        result.push_str(&replacement(verb));
        last = verb.range.end;
    }
    result.push_str(template.get(last..).unwrap_or_default());

    result
}

/// Removes every tag from `template`, leaving plain conversion specs.
///
/// # Examples
/// ```
/// use gt::verb::strip_tags;
///
/// assert_eq!(strip_tags("Welcome to %s#title, %s#name!"), "Welcome to %s, %s!");
/// ```
#[must_use]
pub fn strip_tags(template: &str) -> String {
    replace_verbs(template, &parse_verbs(template), |verb| verb.spec.clone())
}
