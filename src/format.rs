//! Positional printf-style formatting.
//!
//! Verbs follow the usual printf conventions: `%v %s %q %d %b %o %x %X %c %U %e %E
//! %f %F %g %G %t %T %u`, flags `+ - 0` and space, a custom padding character
//! (`%'*8d`), width, precision and explicit 1-based argument indexes (`%2$s`).
//!
//! Problems never abort formatting; they are written into the output instead:
//! - verb not applicable to the argument: `%!d(string=abc)`
//! - not enough arguments: `%!s(MISSING)`
//! - explicit index out of range: `%!s(BADINDEX)`
//! - unused arguments: `%!(EXTRA int=1, string=x)`

use std::fmt;

use crate::verb::{
    Verb,
    parse_verbs,
};

/// A value substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Char(char),
}

impl Arg {
    /// Type name used in error markers.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float64",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Float(x) => {
                let Piece { sign, body, .. } =
                    float(*x, &Flags::default(), |abs| format_general(abs, None, false));
                write!(f, "{sign}{body}")
            }
            Self::Bool(b) => write!(f, "{b}"),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

/// `From` impls for types that convert losslessly into a variant's payload.
macro_rules! impl_from_for_arg {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

impl_from_for_arg!(Str: String, &str, &String);
impl_from_for_arg!(Int: i8, i16, i32, i64);
impl_from_for_arg!(Uint: u8, u16, u32, u64);
impl_from_for_arg!(Float: f32, f64);
impl_from_for_arg!(Bool: bool);
impl_from_for_arg!(Char: char);

impl From<isize> for Arg {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or(Self::Str(value.to_string()), Self::Int)
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or(Self::Str(value.to_string()), Self::Uint)
    }
}

/// Formats `args` into `template`.
///
/// # Examples
/// ```
/// use gt::format::{Arg, sprintf};
///
/// let args = [Arg::from("Marissa"), Arg::from(3)];
/// assert_eq!(sprintf("%s has %03d messages", &args), "Marissa has 003 messages");
/// ```
#[must_use]
pub fn sprintf(template: &str, args: &[Arg]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut last = 0;
    let mut next_arg = 0;
    let mut reordered = false;

    for verb in parse_verbs(template) {
        output.push_str(template.get(last..verb.range.start).unwrap_or_default());
        last = verb.range.end;

        if !verb.takes_argument() {
            output.push('%');
            continue;
        }

        if let Some(index) = verb.index {
            reordered = true;
            let Some(position) = index.checked_sub(1).filter(|position| *position < args.len())
            else {
                output.push_str(&format!("%!{}(BADINDEX)", verb.conversion));
                continue;
            };
            next_arg = position;
        }

        match args.get(next_arg) {
            Some(arg) => output.push_str(&format_arg(&verb, arg)),
            None => output.push_str(&format!("%!{}(MISSING)", verb.conversion)),
        }
        next_arg += 1;
    }
    output.push_str(template.get(last..).unwrap_or_default());

    if !reordered && let Some(extra) = args.get(next_arg..).filter(|extra| !extra.is_empty()) {
        let extra: Vec<_> =
            extra.iter().map(|arg| format!("{}={arg}", arg.type_name())).collect();
        output.push_str(&format!("%!(EXTRA {})", extra.join(", ")));
    }

    output
}

/// Largest width or precision a verb may request.
const MAX_WIDTH: usize = 10_000;

/// Flags of a single verb.
#[derive(Debug, Clone, Copy, Default)]
struct Flags {
    /// Always print a sign.
    plus: bool,
    /// Left-justify.
    minus: bool,
    /// Pad numbers with leading zeros.
    zero: bool,
    /// Leave a space for the sign of positive numbers.
    space: bool,
    /// Custom padding character (`'c`).
    pad: Option<char>,
}

impl Flags {
    /// Parses the flag characters of a verb.
    fn parse(flags: &str) -> Self {
        let mut parsed = Self::default();
        let mut chars = flags.chars();

        while let Some(c) = chars.next() {
            match c {
                '+' => parsed.plus = true,
                '-' => parsed.minus = true,
                '0' => parsed.zero = true,
                ' ' => parsed.space = true,
                '\'' => parsed.pad = chars.next(),
                _ => {}
            }
        }

        parsed
    }
}

/// Formatted value before padding.
#[derive(Debug)]
struct Piece {
    /// `-`, `+`, a space or nothing.
    sign: &'static str,
    /// Digits or text.
    body: String,
    /// Whether the `0` flag may pad between sign and body.
    zero_padding: bool,
}

impl Piece {
    /// Unsigned text that may be zero padded.
    const fn text(body: String) -> Self {
        Self { sign: "", body, zero_padding: true }
    }
}

/// Formats one argument according to `verb`.
fn format_arg(verb: &Verb, arg: &Arg) -> String {
    if verb.width.is_some_and(|width| width > MAX_WIDTH) {
        return "%!(BADWIDTH)".to_string();
    }
    if verb.precision.is_some_and(|precision| precision > MAX_WIDTH) {
        return "%!(BADPREC)".to_string();
    }

    let flags = Flags::parse(&verb.flags);

    format_piece(verb, &flags, arg).map_or_else(
        || format!("%!{}({}={arg})", verb.conversion, arg.type_name()),
        |piece| pad(piece, &flags, verb.width),
    )
}

/// Returns `None` when the verb does not apply to the argument.
fn format_piece(verb: &Verb, flags: &Flags, arg: &Arg) -> Option<Piece> {
    let precision = verb.precision;

    match (verb.conversion, arg) {
        ('s', _) | ('v', Arg::Str(_) | Arg::Bool(_) | Arg::Char(_)) => {
            Some(Piece::text(truncate(&arg.to_string(), precision)))
        }
        ('v' | 'd' | 'u', Arg::Int(i)) => Some(signed(*i, flags, precision, 10, false)),
        ('v' | 'd' | 'u', Arg::Uint(u)) => {
            Some(unsigned(*u, positive_sign(flags), precision, 10, false))
        }
        ('v', Arg::Float(x)) => Some(float(*x, flags, |abs| format_general(abs, precision, false))),
        ('d' | 'u', Arg::Char(c)) => Some(unsigned(u64::from(*c), "", precision, 10, false)),
        ('b', Arg::Int(i)) => Some(signed(*i, flags, precision, 2, false)),
        ('b', Arg::Uint(u)) => Some(unsigned(*u, "", precision, 2, false)),
        ('o', Arg::Int(i)) => Some(signed(*i, flags, precision, 8, false)),
        ('o', Arg::Uint(u)) => Some(unsigned(*u, "", precision, 8, false)),
        (conversion @ ('x' | 'X'), arg) => hex(arg, flags, precision, conversion == 'X'),
        ('c', arg) => to_char(arg).map(|c| Piece::text(c.to_string())),
        ('q', Arg::Str(s)) => Some(Piece::text(format!("{:?}", truncate(s, precision)))),
        ('q', arg) => to_char(arg).map(|c| Piece::text(format!("{c:?}"))),
        ('U', arg) => to_char(arg).map(|c| Piece::text(format!("U+{:04X}", u32::from(c)))),
        (conversion @ ('e' | 'E' | 'f' | 'F' | 'g' | 'G'), arg) => {
            let x = to_float(arg)?;
            let upper = conversion.is_ascii_uppercase();
            Some(match conversion.to_ascii_lowercase() {
                'e' => float(x, flags, |abs| format_exponent(abs, precision.unwrap_or(6), upper)),
                'f' => {
                    let decimals = precision.unwrap_or(6);
                    float(x, flags, |abs| format!("{abs:.decimals$}"))
                }
                _ => float(x, flags, |abs| format_general(abs, precision, upper)),
            })
        }
        ('t', Arg::Bool(b)) => Some(Piece::text(b.to_string())),
        ('T', arg) => Some(Piece::text(arg.type_name().to_string())),
        _ => None,
    }
}

/// Keeps the first `precision` characters.
fn truncate(s: &str, precision: Option<usize>) -> String {
    precision.map_or_else(|| s.to_string(), |p| s.chars().take(p).collect())
}

/// Sign prefix of a non-negative number.
const fn positive_sign(flags: &Flags) -> &'static str {
    if flags.plus {
        "+"
    } else if flags.space {
        " "
    } else {
        ""
    }
}

/// Integer in `radix` with its sign.
fn signed(value: i64, flags: &Flags, precision: Option<usize>, radix: u32, upper: bool) -> Piece {
    let sign = if value < 0 { "-" } else { positive_sign(flags) };
    unsigned(value.unsigned_abs(), sign, precision, radix, upper)
}

/// Magnitude in `radix` behind a precomputed sign.
fn unsigned(
    value: u64,
    sign: &'static str,
    precision: Option<usize>,
    radix: u32,
    upper: bool,
) -> Piece {
    let digits = match (radix, upper) {
        (2, _) => format!("{value:b}"),
        (8, _) => format!("{value:o}"),
        (16, false) => format!("{value:x}"),
        (16, true) => format!("{value:X}"),
        _ => value.to_string(),
    };

    // Precision is the minimum digit count and disables zero padding.
    let body = match precision {
        Some(0) if value == 0 => String::new(),
        Some(p) => format!("{digits:0>p$}"),
        None => digits,
    };

    Piece { sign, body, zero_padding: precision.is_none() }
}

/// `%x` / `%X`: integers in base 16, strings as hex bytes.
fn hex(arg: &Arg, flags: &Flags, precision: Option<usize>, upper: bool) -> Option<Piece> {
    match arg {
        Arg::Int(i) => Some(signed(*i, flags, precision, 16, upper)),
        Arg::Uint(u) => Some(unsigned(*u, "", precision, 16, upper)),
        Arg::Char(c) => Some(unsigned(u64::from(*c), "", precision, 16, upper)),
        Arg::Str(s) => {
            let bytes = truncate_bytes(s, precision);
            let body: String = bytes
                .iter()
                .map(|b| if upper { format!("{b:02X}") } else { format!("{b:02x}") })
                .collect();
            Some(Piece::text(body))
        }
        Arg::Float(_) | Arg::Bool(_) => None,
    }
}

/// For `%x` on strings precision counts input bytes.
fn truncate_bytes(s: &str, precision: Option<usize>) -> &[u8] {
    let bytes = s.as_bytes();
    precision.and_then(|p| bytes.get(..p)).unwrap_or(bytes)
}

/// Argument as a character for `%c` and `%U`.
fn to_char(arg: &Arg) -> Option<char> {
    match arg {
        Arg::Char(c) => Some(*c),
        Arg::Int(i) => Some(u32::try_from(*i).ok().and_then(char::from_u32).unwrap_or('\u{FFFD}')),
        Arg::Uint(u) => Some(u32::try_from(*u).ok().and_then(char::from_u32).unwrap_or('\u{FFFD}')),
        Arg::Str(_) | Arg::Float(_) | Arg::Bool(_) => None,
    }
}

/// Argument as a float for the floating point verbs.
#[allow(clippy::cast_precision_loss)] // integers beyond 2^53 round, as printf does
fn to_float(arg: &Arg) -> Option<f64> {
    match arg {
        Arg::Float(x) => Some(*x),
        Arg::Int(i) => Some(*i as f64),
        Arg::Uint(u) => Some(*u as f64),
        Arg::Str(_) | Arg::Bool(_) | Arg::Char(_) => None,
    }
}

/// Formats a float through `digits`, which receives the absolute value.
fn float(x: f64, flags: &Flags, digits: impl Fn(f64) -> String) -> Piece {
    if x.is_nan() {
        return Piece { sign: positive_sign(flags), body: "NaN".to_string(), zero_padding: false };
    }

    let sign = if x.is_sign_negative() { "-" } else { positive_sign(flags) };
    if x.is_infinite() {
        let sign = if sign.is_empty() { "+" } else { sign };
        return Piece { sign, body: "Inf".to_string(), zero_padding: false };
    }

    Piece { sign, body: digits(x.abs()), zero_padding: true }
}

/// `%e`: mantissa with `precision` decimals and a signed, two-digit-minimum exponent.
fn format_exponent(abs: f64, precision: usize, upper: bool) -> String {
    exponent_notation(&format!("{abs:.precision$e}"), upper)
}

/// Rewrites Rust's `1.5e2` exponent notation as `1.5e+02`.
fn exponent_notation(rust: &str, upper: bool) -> String {
    let (mantissa, exponent) = rust.split_once('e').unwrap_or((rust, "0"));
    let (sign, digits) = exponent.strip_prefix('-').map_or(("+", exponent), |d| ("-", d));
    let e = if upper { 'E' } else { 'e' };

    format!("{mantissa}{e}{sign}{digits:0>2}")
}

/// Decimal exponent of `abs` as printed in scientific notation.
fn decimal_exponent(scientific: &str) -> i64 {
    scientific.split_once('e').and_then(|(_, exponent)| exponent.parse().ok()).unwrap_or(0)
}

/// Removes trailing fractional zeros (`1.500` → `1.5`, `2.000` → `2`).
fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') { digits.trim_end_matches('0').trim_end_matches('.') } else { digits }
}

/// `%g`: the shorter of `%e` and `%f`.
///
/// Without precision the shortest representation is used and the exponent form
/// kicks in for exponents below -4 or from 6 up.
fn format_general(abs: f64, precision: Option<usize>, upper: bool) -> String {
    let Some(precision) = precision else {
        let scientific = format!("{abs:e}");
        let exponent = decimal_exponent(&scientific);
        return if (-4..6).contains(&exponent) {
            abs.to_string()
        } else {
            exponent_notation(&scientific, upper)
        };
    };

    let significant = precision.max(1);
    let mantissa_decimals = significant - 1;
    let scientific = format!("{abs:.mantissa_decimals$e}");
    let exponent = decimal_exponent(&scientific);
    let limit = i64::try_from(significant).unwrap_or(i64::MAX);

    if exponent < -4 || exponent >= limit {
        let (mantissa, _) = scientific.split_once('e').unwrap_or((scientific.as_str(), ""));
        let trimmed = format!("{}e{exponent}", trim_fraction(mantissa));
        return exponent_notation(&trimmed, upper);
    }

    let decimals = usize::try_from(limit.saturating_sub(1).saturating_sub(exponent)).unwrap_or(0);
    trim_fraction(&format!("{abs:.decimals$}")).to_string()
}

/// Applies width, padding character and justification.
fn pad(piece: Piece, flags: &Flags, width: Option<usize>) -> String {
    let Piece { sign, body, zero_padding } = piece;
    let len = sign.chars().count() + body.chars().count();
    let fill = width.map_or(0, |width| width.saturating_sub(len));

    if fill == 0 {
        return format!("{sign}{body}");
    }

    let pad_char = flags.pad.unwrap_or(' ');
    if flags.minus {
        return format!("{sign}{body}{}", pad_char.to_string().repeat(fill));
    }

    if flags.zero && zero_padding && flags.pad.is_none() {
        return format!("{sign}{}{body}", "0".repeat(fill));
    }

    format!("{}{sign}{body}", pad_char.to_string().repeat(fill))
}
