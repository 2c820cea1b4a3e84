//! printf-style verbs: parsing, reconstruction and rendering.
//!
//! A [`FormatSpec`] describes one `%[flags][width][.precision]verb` directive.
//! [`render_spec`] renders an error for it, so callers that receive format
//! directives at runtime (log templates, FFI shims) can pick a rendering
//! without matching on strings themselves.

use alloc::format;
use alloc::string::String;
use core::fmt::{self, Write as _};
use core::str::FromStr;

use crate::error::Error;
use crate::render::{Mode, compact, render};

// ============================================================================
// FormatSpec
// ============================================================================

/// One parsed format directive.
///
/// ## Example
///
/// ```rust
/// use causeway::FormatSpec;
///
/// let spec: FormatSpec = "%-12.4v".parse().unwrap();
/// assert!(spec.minus);
/// assert_eq!(spec.width, Some(12));
/// assert_eq!(spec.precision, Some(4));
/// assert_eq!(spec.verb, 'v');
/// assert_eq!(spec.to_string(), "%-12.4v");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatSpec {
    /// `+` flag.
    pub plus: bool,
    /// `-` flag: pad on the right.
    pub minus: bool,
    /// `#` flag.
    pub sharp: bool,
    /// ` ` flag.
    pub space: bool,
    /// `0` flag: pad with zeros.
    pub zero: bool,
    /// Minimum width in characters.
    pub width: Option<usize>,
    /// Maximum characters shown (input bytes for `x`/`X`).
    pub precision: Option<usize>,
    /// The verb character.
    pub verb: char,
}

impl FormatSpec {
    /// A directive with no flags, width or precision.
    pub const fn new(verb: char) -> Self {
        Self {
            plus: false,
            minus: false,
            sharp: false,
            space: false,
            zero: false,
            width: None,
            precision: None,
            verb,
        }
    }

    /// Parse a directive such as `"%+v"` or `"%-10.3q"`.
    pub fn parse(text: &str) -> Result<Self, SpecError> {
        let rest = text.strip_prefix('%').ok_or(SpecError::MissingPercent)?;
        let mut spec = Self::new('v');
        let mut chars = rest.char_indices().peekable();

        while let Some(&(_, c)) = chars.peek() {
            match c {
                '+' => spec.plus = true,
                '-' => spec.minus = true,
                '#' => spec.sharp = true,
                ' ' => spec.space = true,
                '0' => spec.zero = true,
                _ => break,
            }
            chars.next();
        }

        spec.width = parse_number(&mut chars)?;
        if let Some(&(_, '.')) = chars.peek() {
            chars.next();
            spec.precision = Some(parse_number(&mut chars)?.unwrap_or(0));
        }

        let (at, verb) = chars.next().ok_or(SpecError::MissingVerb)?;
        let tail = &rest[at + verb.len_utf8()..];
        if !tail.is_empty() {
            return Err(SpecError::TrailingInput(String::from(tail)));
        }
        spec.verb = verb;
        Ok(spec)
    }

    /// Plain `%v`: no flags, no width, no precision.
    pub fn is_default_verb(&self) -> bool {
        *self == Self::new('v')
    }
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self::new('v')
    }
}

fn parse_number(
    chars: &mut core::iter::Peekable<core::str::CharIndices<'_>>,
) -> Result<Option<usize>, SpecError> {
    let mut value: Option<usize> = None;
    while let Some(&(_, c)) = chars.peek() {
        let Some(digit) = c.to_digit(10) else {
            break;
        };
        let next = value
            .unwrap_or(0)
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit as usize))
            .ok_or(SpecError::NumberTooLarge)?;
        value = Some(next);
        chars.next();
    }
    Ok(value)
}

impl FromStr for FormatSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Reconstructs the directive, flags in canonical order.
impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('%')?;
        for (set, flag) in [
            (self.space, ' '),
            (self.plus, '+'),
            (self.minus, '-'),
            (self.sharp, '#'),
            (self.zero, '0'),
        ] {
            if set {
                f.write_char(flag)?;
            }
        }
        if let Some(width) = self.width {
            write!(f, "{width}")?;
        }
        if let Some(precision) = self.precision {
            write!(f, ".{precision}")?;
        }
        f.write_char(self.verb)
    }
}

/// A malformed format directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// The directive does not start with `%`.
    MissingPercent,
    /// The directive ends before the verb.
    MissingVerb,
    /// Width or precision does not fit in `usize`.
    NumberTooLarge,
    /// Text follows the verb.
    TrailingInput(String),
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPercent => f.write_str("format directive must start with '%'"),
            Self::MissingVerb => f.write_str("format directive has no verb"),
            Self::NumberTooLarge => f.write_str("format width or precision is too large"),
            Self::TrailingInput(rest) => write!(f, "unexpected input after verb: {rest:?}"),
        }
    }
}

impl core::error::Error for SpecError {}

// ============================================================================
// Rendering
// ============================================================================

/// Render an error for a format directive.
///
/// | Verb | Output |
/// |------|--------|
/// | `%v`, `%s` | compact line |
/// | `%+v` | detailed view |
/// | `%#v` | structural rendering |
/// | `%q` | quoted compact line (`%+q` ASCII only, `%#q` raw back-quoted when possible) |
/// | `%x`, `%X` | hex bytes of the compact line (`% x` spaced, `%#x` with `0x`) |
///
/// Any other verb yields `%!{verb}({type})`. Width and precision apply last;
/// for `q`, `x` and `X` precision limits the input instead.
///
/// ## Example
///
/// ```rust
/// use causeway::{Error, FormatSpec, render_spec};
///
/// let err = Error::leaf("eof");
/// let spec = |s: &str| s.parse::<FormatSpec>().unwrap();
///
/// assert_eq!(render_spec(Some(&err), &spec("%6s")), "   eof");
/// assert_eq!(render_spec(Some(&err), &spec("%x")), "656f66");
/// assert_eq!(render_spec(Some(&err), &spec("%d")), "%!d(Leaf)");
/// assert_eq!(render_spec(None, &spec("%d")), "%!d(<nil>)");
/// ```
pub fn render_spec(err: Option<&Error>, spec: &FormatSpec) -> String {
    let line = || match err {
        Some(err) => compact(err),
        None => String::from("<nil>"),
    };
    let out = match spec.verb {
        'v' if spec.sharp => truncate(render(err, Mode::Syntax), spec.precision),
        'v' if spec.plus => truncate(render(err, Mode::Detailed), spec.precision),
        'v' | 's' => truncate(line(), spec.precision),
        'q' => {
            let style = if spec.sharp {
                Quote::Raw
            } else if spec.plus {
                Quote::Ascii
            } else {
                Quote::Escaped
            };
            quote(&truncate(line(), spec.precision), style)
        }
        'x' | 'X' => {
            let line = line();
            let bytes = match spec.precision {
                Some(limit) => &line.as_bytes()[..limit.min(line.len())],
                None => line.as_bytes(),
            };
            hex(bytes, spec.verb == 'X', spec.sharp, spec.space)
        }
        other => {
            let type_name = err.map_or("<nil>", Error::type_name);
            log::debug!("unsupported format verb %{other} for {type_name}");
            return format!("%!{other}({type_name})");
        }
    };
    pad(out, spec)
}

fn truncate(text: String, precision: Option<usize>) -> String {
    match precision {
        Some(limit) => match text.char_indices().nth(limit) {
            Some((at, _)) => String::from(&text[..at]),
            None => text,
        },
        None => text,
    }
}

fn pad(text: String, spec: &FormatSpec) -> String {
    let len = text.chars().count();
    let Some(width) = spec.width.filter(|&width| width > len) else {
        return text;
    };
    let missing = width - len;
    let mut out = String::with_capacity(text.len() + missing);
    if spec.minus {
        out.push_str(&text);
        out.extend(core::iter::repeat_n(' ', missing));
    } else {
        let fill = if spec.zero { '0' } else { ' ' };
        out.extend(core::iter::repeat_n(fill, missing));
        out.push_str(&text);
    }
    out
}

/// Quoting styles for the `q` verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Quote {
    /// Double quotes; printable characters kept, others escaped.
    Escaped,
    /// Double quotes; everything outside printable ASCII escaped.
    Ascii,
    /// Back quotes with no escaping, falling back to [`Quote::Escaped`] when
    /// the text contains a back quote or control characters.
    Raw,
}

pub(crate) fn quote(text: &str, style: Quote) -> String {
    match style {
        Quote::Raw if can_backquote(text) => format!("`{text}`"),
        Quote::Raw | Quote::Escaped => format!("{text:?}"),
        Quote::Ascii => {
            let mut out = String::with_capacity(text.len() + 2);
            out.push('"');
            for c in text.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    ' '..='~' => out.push(c),
                    c if c.is_ascii() => out.extend(c.escape_debug()),
                    c => out.extend(c.escape_unicode()),
                }
            }
            out.push('"');
            out
        }
    }
}

fn can_backquote(text: &str) -> bool {
    text.chars()
        .all(|c| c != '`' && c != '\u{FEFF}' && (c == '\t' || !c.is_control()))
}

/// Hex-encode `bytes`. `sharp` adds a `0x` prefix, once or per byte when `spaced`.
pub(crate) fn hex(bytes: &[u8], upper: bool, sharp: bool, spaced: bool) -> String {
    let mut out = String::with_capacity(bytes.len() * 3 + 2);
    let prefix = if upper { "0X" } else { "0x" };
    if sharp && !spaced && !bytes.is_empty() {
        out.push_str(prefix);
    }
    for (index, byte) in bytes.iter().enumerate() {
        if spaced {
            if index > 0 {
                out.push(' ');
            }
            if sharp {
                out.push_str(prefix);
            }
        }
        let _ = if upper {
            write!(out, "{byte:02X}")
        } else {
            write!(out, "{byte:02x}")
        };
    }
    out
}
