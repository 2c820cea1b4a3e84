//! Integration tests for error output formatting.

use causeway::{Error, ErrorRef, Frame, HasStackTrace, Mode, ResultExt, StackTrace, err, render};

#[derive(Debug)]
enum TestError {
    NotFound,
    InvalidInput(String),
}

impl core::fmt::Display for TestError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TestError::NotFound => write!(f, "not found"),
            TestError::InvalidInput(s) => write!(f, "invalid input: {}", s),
        }
    }
}

impl core::error::Error for TestError {}

#[inline(never)]
fn failing_operation() -> Result<(), Error> {
    Err(Error::new("boom"))
}

#[inline(never)]
fn calling_operation() -> Result<(), Error> {
    failing_operation().wrap("calling")
}

// ============================================================================
// Compact Output
// ============================================================================

#[test]
fn display_joins_chain_with_separator() {
    let err = Error::leaf("connection refused")
        .prefix("dialing db")
        .prefix("loading user");
    assert_eq!(format!("{}", err), "loading user: dialing db: connection refused");
}

#[test]
fn display_skips_stack_nodes() {
    let err = Error::leaf("x").with_stack();
    assert_eq!(err.to_string(), "x");

    let err = Error::leaf("x").wrap("ctx").with_stack();
    assert_eq!(err.to_string(), "ctx: x");
}

#[test]
fn display_stops_at_replacement() {
    let err = Error::leaf("connection refused")
        .prefix("dialing db")
        .replace("database unavailable")
        .prefix("loading user");
    assert_eq!(err.to_string(), "loading user: database unavailable");
}

#[test]
fn display_of_foreign_error() {
    let err = Error::from_std(TestError::InvalidInput("port".into())).prefix("parsing");
    assert_eq!(err.to_string(), "parsing: invalid input: port");
}

#[test]
fn prefix_render_matches_cause_render() {
    for message in ["eof", "two words", "multi\nline"] {
        let cause = Error::leaf(message).prefix("inner");
        let expected = format!("P: {}", cause);
        let wrapped = cause.prefix("P");
        assert_eq!(render(Some(&wrapped), Mode::Compact), expected);
    }
}

#[test]
fn err_macro_formats_message() {
    let id = 7;
    let e = err!("user {id} not found");
    assert_eq!(e.to_string(), "user 7 not found");
    assert_eq!(e.type_name(), "StackAttached");
}

// ============================================================================
// Detailed Output
// ============================================================================

#[test]
fn detailed_starts_with_compact_line() {
    let errors = [
        Error::leaf("x"),
        Error::leaf("x").prefix("a").prefix("b"),
        Error::leaf("x").replace("y"),
        Error::leaf("x").with_stack(),
        Error::leaf("x").with_secondary(Error::leaf("side")),
        Error::from_std(TestError::NotFound),
    ];
    for err in &errors {
        let compact = err.to_string();
        let detailed = format!("{:?}", err);
        assert_eq!(
            detailed.lines().next(),
            Some(compact.as_str()),
            "detailed view should open with the compact line. Got:\n{}",
            detailed
        );
    }
}

#[test]
fn detailed_numbers_outermost_first() {
    let err = Error::leaf("connection refused")
        .prefix("dialing db")
        .prefix("loading user");
    assert_eq!(
        format!("{:?}", err),
        "loading user: dialing db: connection refused\n\
         (1) loading user\n\
         Wraps: (2) dialing db\n\
         Wraps: (3) connection refused\n\
         Error types: (1) Prefix (2) Prefix (3) Leaf"
    );
}

#[test]
fn detailed_shows_replaced_cause() {
    let err = Error::leaf("connection refused").replace("database unavailable");
    let output = format!("{:?}", err);
    assert!(output.starts_with("database unavailable\n"));
    assert!(
        output.contains("Wraps: (2) connection refused"),
        "replaced cause should still be listed. Got:\n{}",
        output
    );
}

#[test]
fn detailed_foreign_type_name() {
    let err = Error::from_std(TestError::NotFound);
    let output = format!("{:?}", err);
    assert!(output.starts_with("not found\n(1) not found\n"));
    assert!(
        output.ends_with("TestError"),
        "foreign node should be named by its type. Got:\n{}",
        output
    );
}

#[test]
fn detailed_multiline_message_is_indented() {
    let err = Error::leaf("first line\nsecond line\nthird line").prefix("ctx");
    assert_eq!(
        err.detail(),
        "ctx: first line\nsecond line\nthird line\n\
         (1) ctx\n\
         Wraps: (2) first line\n \
         │ second line\n \
         │ third line\n\
         Error types: (1) Prefix (2) Leaf"
    );
}

#[test]
fn detailed_message_starting_with_newline() {
    let err = Error::leaf("\nbody");
    assert_eq!(
        err.detail(),
        "\nbody\n(1)\n │ body\nError types: (1) Leaf"
    );
}

#[test]
fn detailed_renders_imported_frames() {
    let trace = StackTrace::from_frames([Frame::from_ip(0)]);
    let err = Error::leaf("x").with_stack_trace(trace);
    // address zero never resolves, so both lines fall back to placeholders
    assert_eq!(
        err.detail(),
        "x\n(1) attached stack trace\n │ -- stack trace:\n │ unknown\n │ \tunknown:0\n\
         Wraps: (2) x\nError types: (1) StackAttached (2) Leaf"
    );
}

// ============================================================================
// Captured Stacks
// ============================================================================

#[cfg(feature = "std")]
#[test]
fn captured_stack_names_caller() {
    let err = failing_operation().unwrap_err();
    let trace = err.stack_trace().expect("Error::new attaches a trace");
    assert!(!trace.is_empty(), "frame walking should work on test targets");

    let output = format!("{:?}", err);
    assert!(output.contains("-- stack trace:"));
    assert!(
        output.contains("failing_operation"),
        "trace should start at the caller. Got:\n{}",
        output
    );
}

#[cfg(feature = "std")]
#[test]
fn captured_stack_starts_at_caller() {
    let err = failing_operation().unwrap_err();
    let trace = err.stack_trace().unwrap();
    let first = trace.frames()[0].resolve();
    // demangled without the trailing symbol hash
    assert!(
        first
            .function()
            .is_some_and(|name| name.ends_with("::failing_operation")),
        "first frame should be the caller, got {:?}",
        first.function()
    );
}

#[cfg(feature = "std")]
#[test]
fn every_wrap_prints_its_own_trace() {
    let err = calling_operation().unwrap_err();
    let output = format!("{:?}", err);
    assert_eq!(output.matches("-- stack trace:").count(), 2);
    assert!(output.starts_with("calling: boom\n(1) attached stack trace\n"));
    assert!(output.ends_with("Error types: (1) StackAttached (2) Prefix (3) StackAttached (4) Leaf"));
}

#[test]
fn stack_trace_lookup_through_ref() {
    let err = Error::leaf("x").with_stack_trace(StackTrace::from_frames([Frame::from_ip(9)]));
    let node: ErrorRef<'_> = err.as_ref();
    assert_eq!(node.stack_trace().map(StackTrace::len), Some(1));
    assert!(err.unwrap_once().unwrap().stack_trace().is_none());
}
