//! The immutable error node type and its variants.
//!
//! This module provides [`Error`], the node every chain and join is built
//! from, [`ErrorKind`] (the closed variant set), [`Foreign`] for wrapped
//! external error values, and [`ErrorRef`], a borrowed view that also covers
//! external errors reached through `source()`.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::error::Error as StdError;
use core::fmt;

use crate::printer::{ErrorPrinter, HasStackTrace, Next, Printer};
use crate::stack::StackTrace;

// ============================================================================
// Error - the node type
// ============================================================================

/// An immutable node in an error tree.
///
/// Every node owns its causes. The node's message is computed once, when the
/// node is built, and never re-derived from its children.
///
/// ## Formatting
///
/// | Format | Output |
/// |--------|--------|
/// | `{}` | compact line: `"outer: middle: inner"` |
/// | `{:?}` | detailed, numbered tree with stack traces |
/// | `{:#?}` | structural (language-syntax) rendering |
/// | `{:x}` / `{:X}` | hexadecimal bytes of the compact line |
///
/// Width, precision and alignment apply to the whole rendered text.
///
/// ## Example
///
/// ```rust
/// use causeway::Error;
///
/// let err = Error::leaf("connection refused")
///     .prefix("dialing db")
///     .prefix("loading user");
/// assert_eq!(err.to_string(), "loading user: dialing db: connection refused");
///
/// let err = Error::leaf("connection refused").replace("database unavailable");
/// assert_eq!(err.to_string(), "database unavailable");
/// ```
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    message: String,
    kind: ErrorKind,
}

/// The variant of an [`Error`] node.
pub enum ErrorKind {
    /// A message with no cause.
    Leaf,
    /// A label in front of the cause's message: `"{label}: {cause}"`.
    Prefix {
        /// Text added in front of the cause.
        label: String,
        /// The wrapped error.
        cause: Error,
    },
    /// A new message standing in for the cause's message.
    Replace {
        /// The wrapped error.
        cause: Error,
    },
    /// A call-stack snapshot taken when the node was built.
    StackAttached {
        /// The wrapped error.
        cause: Error,
        /// The captured frames.
        stack: StackTrace,
    },
    /// An auxiliary error shown only in the detailed view.
    SecondaryAttached {
        /// The error that forms the chain.
        primary: Error,
        /// The attachment. It is not part of the chain.
        secondary: Error,
    },
    /// Independent causes aggregated into one node.
    Joined {
        /// The causes, in order.
        causes: Vec<Error>,
    },
    /// An external error value. Its `source()` chain continues the tree.
    Foreign(Foreign),
}

impl Error {
    fn from_parts(message: String, kind: ErrorKind) -> Self {
        Self {
            inner: Box::new(Inner { message, kind }),
        }
    }

    /// Create a leaf node with no cause and no stack trace.
    pub fn leaf(message: impl Into<String>) -> Self {
        Self::from_parts(message.into(), ErrorKind::Leaf)
    }

    /// Create a leaf node and capture the caller's stack.
    ///
    /// See also the [`err!`](crate::err!) macro.
    #[inline(never)]
    pub fn new(message: impl Into<String>) -> Self {
        Self::leaf(message).attach(StackTrace::capture_skipping(1))
    }

    /// Put `label` in front of this error's message.
    ///
    /// An empty label adds a node without changing the message.
    pub fn prefix(self, label: impl Into<String>) -> Self {
        let label = label.into();
        let message = if label.is_empty() {
            self.inner.message.clone()
        } else {
            format!("{}: {}", label, self.inner.message)
        };
        Self::from_parts(message, ErrorKind::Prefix { label, cause: self })
    }

    /// Replace this error's message, keeping it as the cause.
    ///
    /// The compact line shows only the new message; the original error still
    /// appears in the detailed view.
    pub fn replace(self, message: impl Into<String>) -> Self {
        Self::from_parts(message.into(), ErrorKind::Replace { cause: self })
    }

    /// Capture the caller's stack and attach it to this error.
    #[inline(never)]
    pub fn with_stack(self) -> Self {
        self.attach(StackTrace::capture_skipping(1))
    }

    /// Prefix with `label` (skipped when empty) and capture the caller's stack.
    #[inline(never)]
    pub fn wrap(self, label: impl Into<String>) -> Self {
        let label = label.into();
        let err = if label.is_empty() {
            self
        } else {
            self.prefix(label)
        };
        err.attach(StackTrace::capture_skipping(1))
    }

    /// Attach an already-captured stack trace.
    pub fn with_stack_trace(self, stack: StackTrace) -> Self {
        self.attach(stack)
    }

    pub(crate) fn attach(self, stack: StackTrace) -> Self {
        let message = self.inner.message.clone();
        Self::from_parts(message, ErrorKind::StackAttached { cause: self, stack })
    }

    /// Attach a secondary error, shown only in the detailed view.
    ///
    /// `None` leaves the error unchanged.
    pub fn with_secondary(self, secondary: impl Into<Option<Error>>) -> Self {
        match secondary.into() {
            Some(secondary) => {
                let message = self.inner.message.clone();
                Self::from_parts(
                    message,
                    ErrorKind::SecondaryAttached {
                        primary: self,
                        secondary,
                    },
                )
            }
            None => self,
        }
    }

    /// Aggregate errors into one node. Use [`join`](crate::join) for the
    /// version that filters absent inputs.
    pub(crate) fn joined(causes: Vec<Error>) -> Self {
        let message = causes
            .iter()
            .map(|cause| cause.inner.message.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self::from_parts(message, ErrorKind::Joined { causes })
    }

    /// Wrap an external error value.
    pub fn from_std<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::foreign(Box::new(Plain(err)), core::any::type_name::<E>())
    }

    /// Wrap an external error value that renders itself through [`ErrorPrinter`].
    pub fn from_printer<E: StdError + ErrorPrinter + Send + Sync + 'static>(err: E) -> Self {
        Self::foreign(Box::new(Printing(err)), core::any::type_name::<E>())
    }

    /// Wrap an external error value that carries its own stack trace.
    pub fn from_traced<E: StdError + HasStackTrace + Send + Sync + 'static>(err: E) -> Self {
        Self::foreign(Box::new(Traced(err)), core::any::type_name::<E>())
    }

    fn foreign(value: Box<dyn Erased>, type_name: &'static str) -> Self {
        let message = value.error().to_string();
        Self::from_parts(message, ErrorKind::Foreign(Foreign { value, type_name }))
    }

    /// The node's message, as computed when it was built.
    #[inline]
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// The node's variant.
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }

    /// Short name of the node's variant, or the wrapped type for foreign errors.
    pub fn type_name(&self) -> &'static str {
        match &self.inner.kind {
            ErrorKind::Leaf => "Leaf",
            ErrorKind::Prefix { .. } => "Prefix",
            ErrorKind::Replace { .. } => "Replace",
            ErrorKind::StackAttached { .. } => "StackAttached",
            ErrorKind::SecondaryAttached { .. } => "SecondaryAttached",
            ErrorKind::Joined { .. } => "Joined",
            ErrorKind::Foreign(foreign) => foreign.type_name,
        }
    }

    /// Borrow this node as an [`ErrorRef`].
    #[inline]
    pub fn as_ref(&self) -> ErrorRef<'_> {
        ErrorRef::Node(self)
    }

    /// The single cause, if this node has one.
    ///
    /// Joined nodes have no single cause; see [`unwrap_multi`](Self::unwrap_multi).
    pub fn unwrap_once(&self) -> Option<ErrorRef<'_>> {
        self.as_ref().unwrap_once()
    }

    /// The causes of a joined node; empty for every other variant.
    pub fn unwrap_multi(&self) -> &[Error] {
        match &self.inner.kind {
            ErrorKind::Joined { causes } => causes,
            _ => &[],
        }
    }

    /// The innermost error, following single-cause links only.
    ///
    /// Joined branches are not entered; a joined node is its own innermost cause.
    pub fn cause(&self) -> ErrorRef<'_> {
        self.as_ref().cause()
    }

    /// Built-in rendering for this node's variant, or `None` when the variant
    /// has no capability and the classifier decides.
    pub(crate) fn print_builtin(&self, p: &mut Printer<'_>) -> Option<Next> {
        match &self.inner.kind {
            ErrorKind::Leaf => {
                p.print(&self.inner.message);
                Some(Next::Stop)
            }
            ErrorKind::Prefix { label, .. } => {
                p.print(label);
                Some(Next::Cause)
            }
            ErrorKind::Replace { .. } => {
                p.print(&self.inner.message);
                Some(Next::Stop)
            }
            ErrorKind::StackAttached { .. } => {
                p.print_detail("attached stack trace");
                Some(Next::Cause)
            }
            ErrorKind::SecondaryAttached { secondary, .. } => {
                if p.wants_detail() {
                    p.print_detail_fmt(format_args!("secondary error attachment\n{:?}", secondary));
                }
                Some(Next::Cause)
            }
            ErrorKind::Joined { .. } => None,
            ErrorKind::Foreign(foreign) => foreign
                .value
                .printer()
                .map(|printer| printer.print_error(p)),
        }
    }
}

impl HasStackTrace for Error {
    fn stack_trace(&self) -> Option<&StackTrace> {
        match &self.inner.kind {
            ErrorKind::StackAttached { stack, .. } => Some(stack),
            ErrorKind::Foreign(foreign) => foreign.value.stack_trace(),
            _ => None,
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.inner.kind {
            ErrorKind::Leaf | ErrorKind::Joined { .. } => None,
            ErrorKind::Prefix { cause, .. }
            | ErrorKind::Replace { cause }
            | ErrorKind::StackAttached { cause, .. } => Some(cause),
            ErrorKind::SecondaryAttached { primary, .. } => Some(primary),
            ErrorKind::Foreign(foreign) => foreign.error().source(),
        }
    }
}

// ============================================================================
// Foreign - wrapped external error values
// ============================================================================

/// An external error value held by an [`ErrorKind::Foreign`] node.
pub struct Foreign {
    value: Box<dyn Erased>,
    type_name: &'static str,
}

impl Foreign {
    /// The wrapped error.
    pub fn error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.value.error()
    }

    /// Rust type name of the wrapped error.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Downcast the wrapped error to a concrete type.
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.value.error().downcast_ref::<T>()
    }
}

impl fmt::Debug for Foreign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.value.error(), f)
    }
}

/// Type-erased storage for foreign values plus the capabilities they opted into.
trait Erased: Send + Sync + 'static {
    fn error(&self) -> &(dyn StdError + Send + Sync + 'static);

    fn printer(&self) -> Option<&dyn ErrorPrinter> {
        None
    }

    fn stack_trace(&self) -> Option<&StackTrace> {
        None
    }
}

struct Plain<E>(E);

impl<E: StdError + Send + Sync + 'static> Erased for Plain<E> {
    fn error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &self.0
    }
}

struct Printing<E>(E);

impl<E: StdError + ErrorPrinter + Send + Sync + 'static> Erased for Printing<E> {
    fn error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &self.0
    }

    fn printer(&self) -> Option<&dyn ErrorPrinter> {
        Some(&self.0)
    }
}

struct Traced<E>(E);

impl<E: StdError + HasStackTrace + Send + Sync + 'static> Erased for Traced<E> {
    fn error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &self.0
    }

    fn stack_trace(&self) -> Option<&StackTrace> {
        self.0.stack_trace()
    }
}

// ============================================================================
// ErrorRef - borrowed view over crate nodes and foreign sources
// ============================================================================

/// A borrowed error in a chain: either a crate [`Error`] node or an external
/// error reached through `source()`.
#[derive(Clone, Copy)]
pub enum ErrorRef<'a> {
    /// A crate node.
    Node(&'a Error),
    /// An external error whose concrete type is unknown.
    Std(&'a (dyn StdError + 'static)),
}

impl<'a> ErrorRef<'a> {
    /// View an external error, recognising crate nodes behind the trait object.
    pub fn from_std(err: &'a (dyn StdError + 'static)) -> Self {
        match err.downcast_ref::<Error>() {
            Some(node) => Self::Node(node),
            None => Self::Std(err),
        }
    }

    /// The crate node, if this is one.
    pub fn as_node(&self) -> Option<&'a Error> {
        match *self {
            Self::Node(node) => Some(node),
            Self::Std(_) => None,
        }
    }

    /// The error's message.
    pub fn message(&self) -> Cow<'a, str> {
        match *self {
            Self::Node(node) => Cow::Borrowed(node.message()),
            Self::Std(err) => Cow::Owned(err.to_string()),
        }
    }

    /// Variant or type name; `dyn Error` when the type is unknown.
    pub fn type_name(&self) -> &'static str {
        match *self {
            Self::Node(node) => node.type_name(),
            Self::Std(_) => "dyn Error",
        }
    }

    /// The single cause, if any.
    pub fn unwrap_once(&self) -> Option<ErrorRef<'a>> {
        match *self {
            Self::Node(node) => match &node.inner.kind {
                ErrorKind::Leaf | ErrorKind::Joined { .. } => None,
                ErrorKind::Prefix { cause, .. }
                | ErrorKind::Replace { cause }
                | ErrorKind::StackAttached { cause, .. } => Some(Self::Node(cause)),
                ErrorKind::SecondaryAttached { primary, .. } => Some(Self::Node(primary)),
                ErrorKind::Foreign(foreign) => foreign.error().source().map(Self::from_std),
            },
            Self::Std(err) => err.source().map(Self::from_std),
        }
    }

    /// The causes of a joined node; empty otherwise.
    pub fn unwrap_multi(&self) -> &'a [Error] {
        match *self {
            Self::Node(node) => node.unwrap_multi(),
            Self::Std(_) => &[],
        }
    }

    /// The innermost error, following single-cause links only.
    pub fn cause(self) -> ErrorRef<'a> {
        let mut current = self;
        while let Some(next) = current.unwrap_once() {
            current = next;
        }
        current
    }

    /// The stack trace attached to this node, if any.
    pub fn stack_trace(&self) -> Option<&'a StackTrace> {
        match *self {
            Self::Node(node) => node.stack_trace(),
            Self::Std(_) => None,
        }
    }

    pub(crate) fn print(&self, p: &mut Printer<'_>) -> Option<Next> {
        match *self {
            Self::Node(node) => node.print_builtin(p),
            Self::Std(_) => None,
        }
    }
}

impl fmt::Debug for ErrorRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => fmt::Debug::fmt(node, f),
            Self::Std(err) => fmt::Debug::fmt(err, f),
        }
    }
}

impl fmt::Display for ErrorRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => fmt::Display::fmt(node, f),
            Self::Std(err) => fmt::Display::fmt(err, f),
        }
    }
}
