//! # causeway - Error chains and joins with tree rendering
//!
//! Wrap errors as they travel up the stack, then print either a one-line
//! summary or a numbered tree with stack traces:
//!
//! ```text
//! loading user: dialing db: connection refused
//! (1) attached stack trace
//!  │ -- stack trace:
//!  │ app::load_user
//!  │ 	src/user.rs:31
//! Wraps: (2) loading user
//! Wraps: (3) dialing db
//! Wraps: (4) connection refused
//! Error types: (1) StackAttached (2) Prefix (3) Prefix (4) Leaf
//! ```
//!
//! ## Try It Now
//!
//! ```rust
//! use causeway::{Error, ResultExt};
//!
//! fn dial() -> Result<(), Error> {
//!     Err(Error::leaf("connection refused"))
//! }
//!
//! fn load_user() -> Result<(), Error> {
//!     dial().prefix("dialing db").wrap("loading user")?;
//!     Ok(())
//! }
//!
//! let err = load_user().unwrap_err();
//! assert_eq!(err.to_string(), "loading user: dialing db: connection refused");
//! println!("{:?}", err); // numbered tree with the captured stack
//! ```
//!
//! ## Building Chains
//!
//! | Method | Node | Stack |
//! |--------|------|-------|
//! | [`Error::leaf`] | message, no cause | ❌ |
//! | [`Error::new`] / [`err!`] | message, no cause | ✅ |
//! | [`.prefix("label")`](Error::prefix) | `"label: cause"` | ❌ |
//! | [`.replace("msg")`](Error::replace) | `"msg"`, cause kept for the tree | ❌ |
//! | [`.wrap("label")`](Error::wrap) | prefix | ✅ |
//! | [`.with_stack()`](Error::with_stack) | message unchanged | ✅ |
//! | [`.with_secondary(err)`](Error::with_secondary) | message unchanged, extra error in the tree | ❌ |
//! | [`join(errs)`](join()) | messages separated by newlines | ❌ |
//!
//! The same operations exist on `Result<T, Error>` through [`ResultExt`].
//! External errors enter a chain through [`Error::from_std`] or
//! [`.traced()`](ResultTracedExt::traced).
//!
//! ## Rendering
//!
//! | Format | Output |
//! |--------|--------|
//! | `{}` | compact line |
//! | `{:?}` | detailed tree |
//! | `{:#?}` | structural rendering |
//! | `{:x}` / `{:X}` | hex bytes of the compact line |
//!
//! [`render`] and [`render_spec`] give the same output for a [`Mode`] or a
//! printf-style [`FormatSpec`], and accept an absent error.
//!
//! ## Stack Traces
//!
//! With the default `std` feature, constructors that capture record up to
//! [`FRAME_LIMIT`] frames with the `backtrace` crate. In the detailed tree the
//! deepest trace prints in full; traces closer to the root drop the frames
//! they share with it and end in `[...repeated from below...]`.
//!
//! Without `std` the crate is `no_std` + `alloc` and captured traces are empty.
//!
//! ## Custom Rendering
//!
//! Foreign error types can control their own line and detail text by
//! implementing [`ErrorPrinter`] and entering the chain through
//! [`Error::from_printer`]. Types that already record frames implement
//! [`HasStackTrace`] and use [`Error::from_traced`].

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod builder;
mod classify;
mod error;
mod ext;
pub mod prelude;
mod printer;
mod render;
mod stack;
mod syntax;
mod verb;

pub use classify::{Affix, classify};
pub use error::{Error, ErrorKind, ErrorRef, Foreign};
pub use ext::{ResultExt, ResultTracedExt};
pub use printer::{ErrorPrinter, HasStackTrace, Next, Printer};
pub use render::{Mode, render};
pub use stack::{FRAME_LIMIT, Frame, ResolvedFrame, StackTrace, elide_shared_suffix};
pub use verb::{FormatSpec, SpecError, render_spec};

use alloc::vec::Vec;

/// Aggregate independent errors into one node.
///
/// Absent inputs are skipped; with nothing left the result is `None`.
/// The joined message is the causes' messages separated by newlines.
///
/// ## Example
///
/// ```rust
/// use causeway::{Error, join};
///
/// let err = join([Error::leaf("disk full"), Error::leaf("quota exceeded")]).unwrap();
/// assert_eq!(err.to_string(), "disk full\nquota exceeded");
///
/// assert!(join([None, None]).is_none());
/// ```
pub fn join<I>(errs: I) -> Option<Error>
where
    I: IntoIterator,
    I::Item: Into<Option<Error>>,
{
    let causes: Vec<Error> = errs.into_iter().filter_map(Into::into).collect();
    if causes.is_empty() {
        return None;
    }
    Some(Error::joined(causes))
}

/// Create an error from a format string and capture the caller's stack.
///
/// ## Example
///
/// ```rust
/// use causeway::err;
///
/// let user = 42;
/// let e = err!("user {} not found", user);
/// assert_eq!(e.to_string(), "user 42 not found");
/// ```
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::new($crate::__private::format!($($arg)*))
    };
}

#[doc(hidden)]
pub mod __private {
    pub use alloc::format;
}
