//! Tests for `SourceSpan` containment and measurement.

use crate::SourcePosition;
use crate::SourceSpan;

fn span(start: usize, end: usize) -> SourceSpan {
    SourceSpan::new(
        SourcePosition::new(start, 1, start + 1),
        SourcePosition::new(end, 1, end + 1),
    )
}

/// Length is measured in UTF-16 code units over the half-open range.
#[test]
fn test_len_and_emptiness() {
    assert_eq!(span(3, 7).len_utf16(), 4);
    assert!(!span(3, 7).is_empty());
    assert_eq!(span(5, 5).len_utf16(), 0);
    assert!(span(5, 5).is_empty());
}

/// Containment is inclusive at both bounds of the outer span.
#[test]
fn test_contains() {
    let outer = span(2, 10);
    assert!(outer.contains(&span(2, 10)), "a span contains itself");
    assert!(outer.contains(&span(4, 6)));
    assert!(outer.contains(&span(2, 2)), "zero-width at start edge");
    assert!(outer.contains(&span(10, 10)), "zero-width at end edge");
    assert!(!outer.contains(&span(1, 5)), "starts before the outer span");
    assert!(!outer.contains(&span(6, 11)), "ends past the outer span");
}
