//! Extension traits for wrapping errors directly on Results.
//!
//! - [`ResultExt`]: call `.prefix()`, `.wrap()` and friends on `Result<T, Error>`
//! - [`ResultTracedExt`]: call `.traced()` on `Result<T, E>` to start a chain
//!   from any `core::error::Error`
//!
//! Methods that capture a stack are `#[inline(never)]` so that the trace
//! starts at the caller.

use alloc::string::String;

use crate::error::Error;
use crate::stack::StackTrace;

// ============================================================================
// ResultExt - for Results that already carry an Error
// ============================================================================

/// Extension trait for wrapping the error of a `Result<T, Error>`.
///
/// ## Example
///
/// ```rust
/// use causeway::{Error, ResultExt};
///
/// fn read_config() -> Result<String, Error> {
///     Err(Error::leaf("file not found"))
/// }
///
/// fn start() -> Result<String, Error> {
///     let config = read_config().prefix("loading settings")?;
///     Ok(config)
/// }
///
/// let err = start().unwrap_err();
/// assert_eq!(err.to_string(), "loading settings: file not found");
/// ```
pub trait ResultExt<T> {
    /// Put `label` in front of the error's message.
    fn prefix(self, label: impl Into<String>) -> Result<T, Error>;

    /// Put a lazily computed label in front of the error's message.
    ///
    /// The closure only runs on `Err`.
    fn prefix_with<S: Into<String>>(self, f: impl FnOnce() -> S) -> Result<T, Error>;

    /// Replace the error's message, keeping the error as the cause.
    fn replace(self, message: impl Into<String>) -> Result<T, Error>;

    /// Prefix with `label` (skipped when empty) and capture the caller's stack.
    fn wrap(self, label: impl Into<String>) -> Result<T, Error>;

    /// Capture the caller's stack.
    fn with_stack(self) -> Result<T, Error>;

    /// Attach a secondary error, shown only in the detailed view.
    fn with_secondary(self, secondary: impl Into<Option<Error>>) -> Result<T, Error>;
}

impl<T> ResultExt<T> for Result<T, Error> {
    #[inline]
    fn prefix(self, label: impl Into<String>) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.prefix(label)),
        }
    }

    #[inline]
    fn prefix_with<S: Into<String>>(self, f: impl FnOnce() -> S) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.prefix(f())),
        }
    }

    #[inline]
    fn replace(self, message: impl Into<String>) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.replace(message)),
        }
    }

    #[inline(never)]
    fn wrap(self, label: impl Into<String>) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => {
                let label = label.into();
                let e = if label.is_empty() { e } else { e.prefix(label) };
                Err(e.attach(StackTrace::capture_skipping(1)))
            }
        }
    }

    #[inline(never)]
    fn with_stack(self) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.attach(StackTrace::capture_skipping(1))),
        }
    }

    #[inline]
    fn with_secondary(self, secondary: impl Into<Option<Error>>) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.with_secondary(secondary)),
        }
    }
}

// ============================================================================
// ResultTracedExt - for starting a chain from external errors
// ============================================================================

/// Extension trait for converting external errors into an [`Error`] chain.
///
/// For Results that already carry an [`Error`], use [`ResultExt::with_stack`]
/// instead; `traced` would nest the error as a foreign value.
///
/// ## Example
///
/// ```rust
/// use causeway::{ResultExt, ResultTracedExt};
///
/// fn parse_port(text: &str) -> Result<u16, causeway::Error> {
///     let port = text.parse::<u16>().traced().prefix("parsing port")?;
///     Ok(port)
/// }
///
/// let err = parse_port("http").unwrap_err();
/// assert_eq!(err.to_string(), "parsing port: invalid digit found in string");
/// ```
pub trait ResultTracedExt<T> {
    /// Wrap the error as a foreign node and capture the caller's stack.
    fn traced(self) -> Result<T, Error>;
}

impl<T, E: core::error::Error + Send + Sync + 'static> ResultTracedExt<T> for Result<T, E> {
    #[inline(never)]
    fn traced(self) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::from_std(e).attach(StackTrace::capture_skipping(1))),
        }
    }
}
