use crate::SourcePosition;

/// Represents a span of source text from start to end position.
///
/// The span is a half-open interval: `[start, end)`.
/// - `start`: Position of the first character of the spanned text
/// - `end`: Position immediately after the last character
///
/// Invariants maintained by the parser: `start.offset() <=
/// end.offset()`, every node's span is contained within its parent's
/// span, and sibling spans are disjoint and appear in source order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SourceSpan {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceSpan {
    /// Creates a span from start (inclusive) to end (exclusive).
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }

    /// Returns the length of this span in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        self.end.offset() - self.start.offset()
    }

    /// Returns `true` if this span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start.offset() == self.end.offset()
    }

    /// Returns `true` if `other` lies entirely within this span.
    pub fn contains(&self, other: &SourceSpan) -> bool {
        self.start.offset() <= other.start.offset()
            && other.end.offset() <= self.end.offset()
    }
}
