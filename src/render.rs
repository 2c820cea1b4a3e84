//! Compact and detailed text rendering.
//!
//! The compact form is a single line (`"outer: middle: inner"`). The detailed
//! form repeats that line, then prints every node as a numbered entry:
//!
//! ```text
//! loading user: connection refused
//! (1) attached stack trace
//!  │ -- stack trace:
//!  │ app::load_user
//!  │ 	src/user.rs:12
//! Wraps: (2) loading user
//! Wraps: (3) connection refused
//! Error types: (1) StackAttached (2) Prefix (3) Leaf
//! ```

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use crate::builder::{Builder, FormatEntry, children_of};
use crate::error::Error;
use crate::stack::frame_detail;
use crate::syntax;
use crate::verb::{self, Quote};

/// Rendering selected by [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Single line, as `{}` prints it.
    Compact,
    /// Compact line plus the numbered entry tree, as `{:?}` prints it.
    Detailed,
    /// Structural rendering, as `{:#?}` prints it.
    Syntax,
    /// Compact line as a double-quoted, escaped string literal.
    Quoted,
}

/// Render an error, or `<nil>` when there is none.
///
/// ## Example
///
/// ```rust
/// use causeway::{Error, Mode, render};
///
/// let err = Error::leaf("not found").prefix("reading config");
/// assert_eq!(render(Some(&err), Mode::Compact), "reading config: not found");
/// assert_eq!(render(Some(&err), Mode::Quoted), "\"reading config: not found\"");
/// assert_eq!(render(None, Mode::Detailed), "<nil>");
/// ```
pub fn render(err: Option<&Error>, mode: Mode) -> String {
    let Some(err) = err else {
        return String::from("<nil>");
    };
    match mode {
        Mode::Compact => compact(err),
        Mode::Detailed => detailed(err),
        Mode::Syntax => syntax::render(err),
        Mode::Quoted => verb::quote(&compact(err), Quote::Escaped),
    }
}

impl Error {
    /// The detailed rendering, as `{:?}` prints it.
    pub fn detail(&self) -> String {
        detailed(self)
    }
}

pub(crate) fn compact(err: &Error) -> String {
    let entries = Builder::new(false).run(err.as_ref());
    compact_line(&entries)
}

pub(crate) fn detailed(err: &Error) -> String {
    let entries = Builder::new(true).run(err.as_ref());
    let mut out = compact_line(&entries);
    let mut types = Vec::new();
    out.push_str("\n(1)");
    print_tree(&entries, entries.len() - 1, "", &mut out, &mut types);
    out.push_str("\nError types:");
    for (index, name) in types.iter().enumerate() {
        let _ = write!(out, " ({}) {}", index + 1, name);
    }
    out
}

/// Non-elided heads from the outermost entry inward, joined with `": "`.
fn compact_line(entries: &[FormatEntry<'_>]) -> String {
    let mut out = String::new();
    for entry in entries.iter().rev() {
        if entry.elide_head || entry.head.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str(": ");
        }
        out.push_str(&entry.head);
    }
    out
}

/// Print `entries[index]` and its subtree. The entry's header is already written.
fn print_tree(
    entries: &[FormatEntry<'_>],
    index: usize,
    base: &str,
    out: &mut String,
    types: &mut Vec<&'static str>,
) {
    let entry = &entries[index];
    types.push(entry.node.type_name());
    print_body(entry, &format!("{base} │ "), out);

    let children = children_of(entries, index);
    let count = children.len();
    for (position, child) in children.into_iter().enumerate() {
        let number = types.len() + 1;
        if entries[child].depth > entry.depth {
            let (connector, child_base) = if position + 1 == count {
                (" └─", format!("{base}   "))
            } else {
                (" ├─", format!("{base} │ "))
            };
            let _ = write!(out, "\n{base}{connector} Wraps: ({number})");
            print_tree(entries, child, &child_base, out, types);
        } else {
            let _ = write!(out, "\n{base}Wraps: ({number})");
            print_tree(entries, child, base, out, types);
        }
    }
}

fn print_body(entry: &FormatEntry<'_>, prefix: &str, out: &mut String) {
    let mut body = String::new();
    if !entry.head.is_empty() {
        if !entry.head.starts_with('\n') {
            body.push(' ');
        }
        body.push_str(&entry.head);
    }
    if !entry.detail.is_empty() {
        if entry.head.is_empty() && !entry.detail.starts_with('\n') {
            body.push(' ');
        }
        body.push_str(&entry.detail);
    }
    if let Some(frames) = entry.frames {
        if body.is_empty() {
            body.push_str(" attached stack trace");
        }
        body.push_str("\n-- stack trace:");
        body.push_str(&frame_detail(frames));
        if entry.elided_frames {
            body.push_str("\n[...repeated from below...]");
        }
    }

    if body.is_empty() {
        out.push(' ');
        out.push_str(entry.node.type_name());
        return;
    }
    out.push_str(&body.replace('\n', &format!("\n{prefix}")));
}

// ============================================================================
// Formatting trait impls
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&compact(self))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.pad(&syntax::render(self))
        } else {
            f.pad(&detailed(self))
        }
    }
}

impl fmt::LowerHex for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        hex_fmt(self, f, false)
    }
}

impl fmt::UpperHex for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        hex_fmt(self, f, true)
    }
}

/// Precision limits the bytes encoded; width pads the encoded text.
fn hex_fmt(err: &Error, f: &mut fmt::Formatter<'_>, upper: bool) -> fmt::Result {
    let line = compact(err);
    let bytes = match f.precision() {
        Some(limit) => &line.as_bytes()[..limit.min(line.len())],
        None => line.as_bytes(),
    };
    let encoded = verb::hex(bytes, upper, f.alternate(), false);
    pad_width(f, &encoded)
}

fn pad_width(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let len = text.chars().count();
    let Some(width) = f.width().filter(|&width| width > len) else {
        return f.write_str(text);
    };
    let missing = width - len;
    if f.sign_aware_zero_pad() {
        return write!(f, "{}{}", "0".repeat(missing), text);
    }
    let (before, after) = match f.align() {
        Some(fmt::Alignment::Left) => (0, missing),
        Some(fmt::Alignment::Center) => (missing / 2, missing - missing / 2),
        Some(fmt::Alignment::Right) | None => (missing, 0),
    };
    let fill = f.fill().to_string();
    write!(f, "{}{}{}", fill.repeat(before), text, fill.repeat(after))
}
