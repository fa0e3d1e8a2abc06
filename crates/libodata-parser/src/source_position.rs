/// Source position information for parsing.
///
/// This is a pure data struct with no mutation methods. The parser's
/// scanning cursor is responsible for computing position values as it
/// consumes input.
///
/// # Indexing Convention
///
/// - `offset`: 0-based UTF-16 code-unit count from the start of the
///   document. This matches how editor hosts address text buffers, so
///   published diagnostic spans can be handed to a host without
///   re-measuring the document. Characters outside the Basic
///   Multilingual Plane (e.g. emoji) advance this by 2.
/// - `line`: 1-based line number (first line is 1).
/// - `column`: 1-based column within the current line, counted in
///   UTF-16 code units (first column is 1).
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SourcePosition {
    /// UTF-16 code-unit offset from document start (0-based).
    offset: usize,

    /// Line number (1-based: first line is 1).
    line: usize,

    /// Column within the current line (1-based: first column is 1).
    column: usize,
}

impl SourcePosition {
    /// Creates a new SourcePosition.
    ///
    /// # Arguments
    /// - `offset`: 0-based UTF-16 code-unit offset from document start
    /// - `line`: 1-based line number
    /// - `column`: 1-based column within the current line
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Returns the position of the very first character of a document.
    pub fn document_start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the 0-based UTF-16 code-unit offset from document start.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 1-based column within the current line.
    pub fn column(&self) -> usize {
        self.column
    }
}
