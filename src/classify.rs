//! Decides whether a wrapper's message extends its cause's message or replaces it.

/// How a wrapper's message relates to its cause's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affix {
    /// The wrapper's message is `"{label}: {cause}"` (or exactly `"{cause}"`).
    Prefix,
    /// The wrapper's message is unrelated to the cause's text.
    Replacement,
}

/// Split `own` into the label it adds in front of `cause`.
///
/// Returns the label and [`Affix::Prefix`] when `own` is `cause` preceded by
/// nothing or by a `": "`-terminated label. Anything else is a
/// [`Affix::Replacement`] and the whole of `own` is returned.
///
/// ## Example
///
/// ```rust
/// use causeway::{Affix, classify};
///
/// assert_eq!(classify("loading config: not found", "not found"), ("loading config", Affix::Prefix));
/// assert_eq!(classify("not found", "not found"), ("", Affix::Prefix));
/// assert_eq!(classify("bad config", "not found"), ("bad config", Affix::Replacement));
/// ```
pub fn classify<'a>(own: &'a str, cause: &str) -> (&'a str, Affix) {
    if let Some(rest) = own.strip_suffix(cause) {
        if rest.is_empty() {
            return ("", Affix::Prefix);
        }
        if let Some(label) = rest.strip_suffix(": ") {
            return (label, Affix::Prefix);
        }
    }
    (own, Affix::Replacement)
}
