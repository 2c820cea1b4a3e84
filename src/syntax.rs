//! Structural rendering for `{:#?}` and `%#v`.
//!
//! Crate nodes print as their variant name with named fields, causes nested
//! inside. Stack traces print as frame counts so the output is stable across
//! builds. A foreign value prints its own pretty `Debug` text.

use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::error::{Error, ErrorKind};

pub(crate) fn render(err: &Error) -> String {
    format!("{:#?}", Syntax(err))
}

struct Syntax<'a>(&'a Error);

struct Causes<'a>(&'a [Error]);

struct FrameCount(usize);

impl fmt::Debug for Syntax<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let err = self.0;
        match err.kind() {
            ErrorKind::Leaf => f
                .debug_struct("Leaf")
                .field("message", &err.message())
                .finish(),
            ErrorKind::Prefix { label, cause } => f
                .debug_struct("Prefix")
                .field("label", label)
                .field("cause", &Syntax(cause))
                .finish(),
            ErrorKind::Replace { cause } => f
                .debug_struct("Replace")
                .field("message", &err.message())
                .field("cause", &Syntax(cause))
                .finish(),
            ErrorKind::StackAttached { cause, stack } => f
                .debug_struct("StackAttached")
                .field("cause", &Syntax(cause))
                .field("stack", &FrameCount(stack.len()))
                .finish(),
            ErrorKind::SecondaryAttached { primary, secondary } => f
                .debug_struct("SecondaryAttached")
                .field("primary", &Syntax(primary))
                .field("secondary", &Syntax(secondary))
                .finish(),
            ErrorKind::Joined { causes } => f
                .debug_struct("Joined")
                .field("causes", &Causes(causes))
                .finish(),
            ErrorKind::Foreign(foreign) => fmt::Debug::fmt(foreign.error(), f),
        }
    }
}

impl fmt::Debug for Causes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter().map(Syntax)).finish()
    }
}

impl fmt::Debug for FrameCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => f.write_str("1 frame"),
            n => write!(f, "{n} frames"),
        }
    }
}
