//! Call-stack snapshots and shared-suffix elision.
//!
//! This module provides [`StackTrace`], an immutable list of [`Frame`]s captured
//! when an error node is constructed, and [`elide_shared_suffix`], which trims
//! the frames a trace shares with a previously rendered one.

use alloc::string::String;
use core::fmt::{self, Write as _};

/// Maximum number of frames recorded by a capture.
pub const FRAME_LIMIT: usize = 32;

// ============================================================================
// FrameVec - configurable storage for captured frames
// ============================================================================
//
// Frames are plain instruction pointers, so every backing store can hold them
// inline. When the tinyvec/smallvec features are enabled the whole capture
// (FRAME_LIMIT slots) lives inside the StackTrace without a heap allocation.

/// Inline frame storage using smallvec.
#[cfg(feature = "smallvec-32-frames")]
type FrameVec = smallvec::SmallVec<[Frame; FRAME_LIMIT]>;

/// Inline frame storage using tinyvec.
#[cfg(all(feature = "tinyvec-32-frames", not(feature = "smallvec-32-frames")))]
type FrameVec = tinyvec::TinyVec<[Frame; FRAME_LIMIT]>;

/// Heap-allocated frame storage (default, no tinyvec/smallvec feature).
#[cfg(not(any(feature = "tinyvec-32-frames", feature = "smallvec-32-frames")))]
type FrameVec = alloc::vec::Vec<Frame>;

// ============================================================================
// Frame - one opaque call-stack entry
// ============================================================================

/// One call-stack entry, stored as an instruction pointer and resolved lazily.
///
/// Two frames are equal when they point at the same instruction; that is the
/// comparison [`elide_shared_suffix`] uses.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Frame {
    ip: usize,
}

impl Frame {
    /// Create a frame from a raw instruction pointer.
    ///
    /// Useful when importing traces recorded by another error library.
    #[inline]
    pub const fn from_ip(ip: usize) -> Self {
        Self { ip }
    }

    /// The raw instruction pointer.
    #[inline]
    pub const fn ip(&self) -> usize {
        self.ip
    }

    /// Resolve this frame to its function name, file and line.
    ///
    /// Any part that cannot be resolved is `None`. Without the `std` feature
    /// nothing can be resolved.
    pub fn resolve(&self) -> ResolvedFrame {
        #[cfg_attr(not(feature = "std"), allow(unused_mut))]
        let mut resolved = ResolvedFrame::default();
        #[cfg(feature = "std")]
        {
            use alloc::format;

            backtrace::resolve(self.ip as *mut core::ffi::c_void, |symbol| {
                if resolved.function.is_none() {
                    resolved.function = symbol.name().map(|name| format!("{name:#}"));
                }
                if resolved.file.is_none() {
                    resolved.file = symbol
                        .filename()
                        .map(|path| path.to_string_lossy().into_owned());
                    resolved.line = symbol.lineno();
                }
            });
        }
        if resolved.function.is_none() && resolved.file.is_none() {
            log::trace!("could not resolve frame {:#x}", self.ip);
        }
        resolved
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({:#x})", self.ip)
    }
}

/// A [`Frame`] resolved to source information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFrame {
    function: Option<String>,
    file: Option<String>,
    line: Option<u32>,
}

impl ResolvedFrame {
    /// Demangled function name, if known.
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    /// Source file path, if known.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Source line, if known.
    pub fn line(&self) -> Option<u32> {
        self.line
    }
}

/// Two lines per frame: the function, then a tab-indented `file:line`.
/// Unknown parts print as `unknown` and `unknown:0`.
impl fmt::Display for ResolvedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.function, &self.file) {
            (None, None) => write!(f, "unknown\n\tunknown:0"),
            (function, file) => write!(
                f,
                "{}\n\t{}:{}",
                function.as_deref().unwrap_or("unknown"),
                file.as_deref().unwrap_or("unknown"),
                self.line.unwrap_or(0)
            ),
        }
    }
}

// ============================================================================
// StackTrace - captured call frames
// ============================================================================

/// Call frames captured when an error node was created, most recent call first.
///
/// A trace is never modified after capture. Rendering resolves frames on demand.
///
/// ## Example
///
/// ```rust
/// use causeway::StackTrace;
///
/// let trace = StackTrace::capture();
/// assert!(trace.len() <= causeway::FRAME_LIMIT);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
    frames: FrameVec,
}

impl StackTrace {
    /// Create an empty trace.
    #[inline]
    pub fn new() -> Self {
        Self {
            frames: FrameVec::new(),
        }
    }

    /// Capture the caller's stack, starting at the function that called `capture`.
    ///
    /// Yields an empty trace when frame walking is unavailable.
    #[inline(never)]
    pub fn capture() -> Self {
        Self::capture_skipping(1)
    }

    /// Build a trace from frames recorded elsewhere, most recent call first.
    ///
    /// At most [`FRAME_LIMIT`] frames are kept.
    pub fn from_frames(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().take(FRAME_LIMIT).collect(),
        }
    }

    /// Capture frames, dropping this function's own frame and then `skip` more.
    ///
    /// Frames are located relative to this function's symbol address so that
    /// the frames of the unwinder itself are never recorded. If the platform
    /// does not report symbol addresses, only `skip` frames are dropped.
    #[cfg(feature = "std")]
    #[inline(never)]
    pub(crate) fn capture_skipping(skip: usize) -> Self {
        let marker = Self::capture_skipping as fn(usize) -> Self as usize;
        let mut raw: alloc::vec::Vec<(usize, usize)> = alloc::vec::Vec::new();
        backtrace::trace(|frame| {
            raw.push((frame.ip() as usize, frame.symbol_address() as usize));
            raw.len() < FRAME_LIMIT + 16
        });

        let start = match raw.iter().position(|&(_, sym)| sym == marker) {
            Some(pos) => pos + 1 + skip,
            None => skip,
        };
        let trace = Self::from_frames(raw.iter().skip(start).map(|&(ip, _)| Frame::from_ip(ip)));
        if trace.is_empty() {
            log::debug!("stack capture yielded no frames; frame walking may be unsupported here");
        }
        trace
    }

    #[cfg(not(feature = "std"))]
    #[inline(never)]
    pub(crate) fn capture_skipping(_skip: usize) -> Self {
        log::trace!("stack capture disabled without the `std` feature");
        Self::new()
    }

    /// The captured frames, most recent call first.
    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of captured frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if no frames were captured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Debug for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.frames.iter()).finish()
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&frame_detail(self.frames()))
    }
}

/// Render frames the way the detailed view prints them: each frame starts on
/// a new line.
pub(crate) fn frame_detail(frames: &[Frame]) -> String {
    let mut out = String::new();
    for frame in frames {
        let _ = write!(out, "\n{}", frame.resolve());
    }
    out
}

// ============================================================================
// Elision
// ============================================================================

/// Trim the frames `current` shares with `previous` at their oldest ends.
///
/// Frames are compared pairwise starting from the outermost caller; the
/// matching run is dropped from the tail of `current`. At least one frame of a
/// non-empty `current` is always kept. Returns the remaining frames and
/// whether anything was dropped.
///
/// ## Example
///
/// ```rust
/// use causeway::{Frame, elide_shared_suffix};
///
/// let f = |ip| Frame::from_ip(ip);
/// let previous = [f(9), f(2), f(1)];
/// let current = [f(5), f(4), f(2), f(1)];
///
/// let (kept, trimmed) = elide_shared_suffix(&previous, &current);
/// assert_eq!(kept, &[f(5), f(4)]);
/// assert!(trimmed);
/// ```
pub fn elide_shared_suffix<'a>(previous: &[Frame], current: &'a [Frame]) -> (&'a [Frame], bool) {
    if previous.is_empty() || current.is_empty() {
        return (current, false);
    }
    let shared = current
        .iter()
        .rev()
        .zip(previous.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let keep = (current.len() - shared).max(1);
    (&current[..keep], keep < current.len())
}
