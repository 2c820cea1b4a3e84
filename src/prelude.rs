//! Convenient re-exports for common usage.
//!
//! ## Usage
//!
//! ```rust
//! use causeway::prelude::*;
//!
//! fn connect() -> Result<(), Error> {
//!     Err(err!("connection refused on port {}", 5432))
//! }
//!
//! fn load_user() -> Result<(), Error> {
//!     connect().wrap("loading user")?;
//!     Ok(())
//! }
//!
//! let err = load_user().unwrap_err();
//! assert_eq!(err.to_string(), "loading user: connection refused on port 5432");
//! ```

pub use crate::Error;
pub use crate::ResultExt;
pub use crate::ResultTracedExt;
pub use crate::err;
pub use crate::join;
