//! Worst-case scenarios for causeway usage patterns.
//!
//! These tests explore edge cases and problematic patterns to ensure
//! the library behaves correctly under stress and misuse.

use causeway::{Error, FormatSpec, Mode, ResultExt, StackTrace, join, render, render_spec};

// ============================================================================
// Deep chains
// ============================================================================

/// 100-level deep chain built through Results
#[test]
fn deep_chain_100_levels() {
    fn level(n: u32) -> Result<(), Error> {
        if n == 0 {
            Err(Error::leaf("bottom"))
        } else {
            level(n - 1).prefix_with(|| format!("level {n}"))
        }
    }

    let err = level(99).unwrap_err();
    let line = err.to_string();
    assert!(line.starts_with("level 99: level 98: "));
    assert!(line.ends_with("level 1: bottom"));
    assert_eq!(line.matches(": ").count(), 99);

    let detailed = err.detail();
    assert!(detailed.starts_with(&format!("{line}\n(1) level 99\nWraps: (2) level 98\n")));
    assert!(detailed.contains("\nWraps: (99) level 1\nWraps: (100) bottom\n"));
}

/// Many stack attachments in one chain each get their own block.
#[test]
fn deep_chain_of_stacks() {
    let mut err = Error::leaf("bottom");
    for _ in 0..20 {
        err = err.with_stack_trace(StackTrace::new());
    }
    let detailed = err.detail();
    assert_eq!(err.to_string(), "bottom");
    assert_eq!(detailed.matches("-- stack trace:").count(), 20);
    assert!(detailed.ends_with("(20) StackAttached (21) Leaf"));
}

/// Wide joins keep every child in order.
#[test]
fn wide_join() {
    let err = join((0..50).map(|i| Error::leaf(format!("e{i}")))).unwrap();
    let line = err.to_string();
    assert_eq!(line.lines().count(), 50);
    assert_eq!(line.lines().next(), Some("e0"));
    assert_eq!(line.lines().last(), Some("e49"));

    let detailed = err.detail();
    assert_eq!(detailed.matches(" ├─ Wraps:").count(), 49);
    assert_eq!(detailed.matches(" └─ Wraps:").count(), 1);
}

/// Deeply nested joins, each adding one indentation level.
#[test]
fn deeply_nested_joins() {
    let mut err = Error::leaf("core");
    for i in 0..10 {
        err = join([err, Error::leaf(format!("side {i}"))]).unwrap();
    }
    let line = err.to_string();
    assert_eq!(line.lines().next(), Some("core"));
    assert_eq!(line.lines().count(), 11);

    // the innermost leaf sits under ten branch connectors
    let detailed = err.detail();
    let indent = " │ ".repeat(9);
    assert!(
        detailed.contains(&format!("\n{indent} ├─ Wraps: (11) core")),
        "Got:\n{}",
        detailed
    );
}

// ============================================================================
// Empty and odd messages
// ============================================================================

#[test]
fn empty_leaf_message() {
    let err = Error::leaf("");
    assert_eq!(err.to_string(), "");
    assert_eq!(err.detail(), "\n(1) Leaf\nError types: (1) Leaf");
}

#[test]
fn empty_leaf_under_prefix() {
    let err = Error::leaf("").prefix("ctx");
    assert_eq!(err.message(), "ctx: ");
    assert_eq!(err.to_string(), "ctx");
}

#[test]
fn empty_labels_everywhere() {
    let err = Error::leaf("x").prefix("").prefix("").wrap("");
    assert_eq!(err.to_string(), "x");
    assert_eq!(err.message(), "x");
}

#[test]
fn replace_with_empty_message() {
    let err = Error::leaf("x").replace("").prefix("ctx");
    assert_eq!(err.to_string(), "ctx");
}

#[test]
fn unicode_messages_survive_padding() {
    let err = Error::leaf("ошибка").prefix("読み込み");
    assert_eq!(err.to_string(), "読み込み: ошибка");
    assert_eq!(format!("{:.4}", err), "読み込み");
    assert_eq!(format!("{:>14}", err), "  読み込み: ошибка");
}

// ============================================================================
// Secondary attachments
// ============================================================================

#[test]
fn secondary_never_reaches_compact_line() {
    let err = Error::leaf("primary")
        .with_secondary(Error::leaf("cleanup failed").prefix("rollback"))
        .prefix("saving");
    assert_eq!(err.to_string(), "saving: primary");

    let detailed = err.detail();
    assert!(detailed.contains("secondary error attachment"));
    assert!(detailed.contains("rollback: cleanup failed"));
}

#[test]
fn nested_secondaries_indent_twice() {
    let inner = Error::leaf("b").with_secondary(Error::leaf("c"));
    let err = Error::leaf("a").with_secondary(inner);
    let detailed = err.detail();
    assert!(
        detailed.contains("\n │  │ (1) c"),
        "second-level attachment should be indented twice. Got:\n{}",
        detailed
    );
}

// ============================================================================
// Verb misuse
// ============================================================================

#[test]
fn unsupported_verbs_never_fail() {
    let err = Error::leaf("x");
    for verb in ["%d", "%f", "%t", "%p", "%%"] {
        let spec: FormatSpec = verb.parse().unwrap();
        let out = render_spec(Some(&err), &spec);
        assert!(out.starts_with("%!"), "{verb} gave {out}");
        assert!(out.ends_with("(Leaf)"), "{verb} gave {out}");
    }
}

#[test]
fn huge_precision_is_harmless() {
    let err = Error::leaf("short");
    let spec: FormatSpec = "%.1000v".parse().unwrap();
    assert_eq!(render_spec(Some(&err), &spec), "short");
    let spec: FormatSpec = "%.1000x".parse().unwrap();
    assert_eq!(render_spec(Some(&err), &spec), "73686f7274");
}

#[test]
fn absent_error_in_every_mode() {
    for mode in [Mode::Compact, Mode::Detailed, Mode::Syntax, Mode::Quoted] {
        assert_eq!(render(None, mode), "<nil>");
    }
    let spec: FormatSpec = "%8v".parse().unwrap();
    assert_eq!(render_spec(None, &spec), "   <nil>");
}
