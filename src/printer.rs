//! The capability protocol error nodes use to control their own rendering.
//!
//! A node that implements [`ErrorPrinter`] writes its own head text (always
//! visible) and detail text (visible in the detailed view only) through a
//! [`Printer`], and tells the renderer whether the compact line should continue
//! into its cause.

use alloc::string::String;
use core::fmt::{self, Write as _};

use crate::stack::StackTrace;

/// What the compact line does after a node has printed its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// Continue into the cause's own head (`"head: cause head"`).
    Cause,
    /// The head is self-sufficient; the cause's head is left out of the
    /// compact line. The cause still appears in the detailed view.
    Stop,
}

/// Custom rendering for an error node.
///
/// ## Example
///
/// ```rust
/// use causeway::{Error, ErrorPrinter, Next, Printer};
/// use core::fmt;
///
/// #[derive(Debug)]
/// struct Timeout { after_ms: u64 }
///
/// impl fmt::Display for Timeout {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "timed out")
///     }
/// }
///
/// impl core::error::Error for Timeout {}
///
/// impl ErrorPrinter for Timeout {
///     fn print_error(&self, p: &mut Printer<'_>) -> Next {
///         p.print("timed out");
///         if p.wants_detail() {
///             p.print_detail_fmt(format_args!("\nafter {}ms", self.after_ms));
///         }
///         Next::Stop
///     }
/// }
///
/// let err = Error::from_printer(Timeout { after_ms: 250 });
/// assert_eq!(err.to_string(), "timed out");
/// assert!(format!("{:?}", err).contains("after 250ms"));
/// ```
pub trait ErrorPrinter {
    /// Print this node's own text and say whether the compact line continues
    /// into its cause.
    ///
    /// Detail text is appended directly after the head in the detailed view,
    /// so start it with a line break when it should sit on its own line.
    fn print_error(&self, p: &mut Printer<'_>) -> Next;
}

/// Access to a stack trace carried by an error value.
///
/// Implement this on foreign error types that record their own frames and
/// wrap them with [`Error::from_traced`](crate::Error::from_traced).
pub trait HasStackTrace {
    /// The trace, if one was captured.
    fn stack_trace(&self) -> Option<&StackTrace>;
}

/// Text sink handed to [`ErrorPrinter::print_error`].
///
/// Head text goes into the compact line and the detailed view. Detail text is
/// kept only while rendering the detailed view; check [`wants_detail`](Self::wants_detail)
/// before doing work that only detail text needs.
pub struct Printer<'a> {
    head: &'a mut String,
    detail: &'a mut String,
    detailed: bool,
}

impl<'a> Printer<'a> {
    pub(crate) fn new(head: &'a mut String, detail: &'a mut String, detailed: bool) -> Self {
        Self {
            head,
            detail,
            detailed,
        }
    }

    /// Append always-visible text.
    #[inline]
    pub fn print(&mut self, text: &str) {
        self.head.push_str(text);
    }

    /// Append always-visible formatted text.
    #[inline]
    pub fn print_fmt(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.head.write_fmt(args);
    }

    /// Whether the detailed view is being rendered.
    #[inline]
    pub fn wants_detail(&self) -> bool {
        self.detailed
    }

    /// Append text shown only in the detailed view.
    #[inline]
    pub fn print_detail(&mut self, text: &str) {
        if self.detailed {
            self.detail.push_str(text);
        }
    }

    /// Append formatted text shown only in the detailed view.
    #[inline]
    pub fn print_detail_fmt(&mut self, args: fmt::Arguments<'_>) {
        if self.detailed {
            let _ = self.detail.write_fmt(args);
        }
    }
}
