use crate::SourceSpan;

/// A hard parse failure with location information.
///
/// Raised only when the input cannot be matched at the root production
/// at all (e.g. empty input). Locally unparseable fragments inside an
/// otherwise valid document never produce this error — they are
/// recovered into embedded
/// [`ErrorSyntax`](crate::syntax::ErrorSyntax) nodes so best-effort
/// consumers (formatting, completion) still get a tree. Callers that
/// need a single canonical message (e.g. a status-bar report) use this
/// hard path.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct ODataParseError {
    /// Human-readable primary error message.
    message: String,

    /// The span where the error was detected.
    span: SourceSpan,
}

impl ODataParseError {
    /// Creates a new parse error.
    pub fn new(message: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Returns the human-readable error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the span where the error was detected.
    pub fn span(&self) -> &SourceSpan {
        &self.span
    }

    /// Formats this error as a single-line summary.
    ///
    /// Produces output like:
    /// ```text
    /// 1:1: error: Expected a service root.
    /// ```
    pub fn format_oneline(&self) -> String {
        format!(
            "{}:{}: error: {}",
            self.span.start.line(),
            self.span.start.column(),
            self.message,
        )
    }

    /// Formats this error as a diagnostic string with a source
    /// snippet, for CLI output.
    ///
    /// Produces output like:
    /// ```text
    /// error: Expected a service root.
    ///   --> 1:1
    ///    |
    ///  1 | ?$select=id
    ///    | ^
    /// ```
    ///
    /// # Arguments
    /// - `source`: Optional source text for snippet extraction. If
    ///   `None`, snippets are omitted but line/column info is still
    ///   shown.
    pub fn format_detailed(&self, source: Option<&str>) -> String {
        let mut output = String::new();

        output.push_str("error: ");
        output.push_str(&self.message);
        output.push('\n');

        let line = self.span.start.line();
        let column = self.span.start.column();
        output.push_str(&format!("  --> {line}:{column}\n"));

        if let Some(src) = source
            && let Some(snippet) = self.format_source_snippet(src)
        {
            output.push_str(&snippet);
        }

        output
    }

    /// Formats the source snippet for the error span.
    fn format_source_snippet(&self, source: &str) -> Option<String> {
        let lines: Vec<&str> = source.lines().collect();
        let line_num = self.span.start.line();

        // Line numbers are 1-based; an error at the very end of the
        // document may point one past the last line.
        if line_num == 0 || line_num > lines.len().max(1) {
            return None;
        }
        let line_content = lines.get(line_num - 1).copied().unwrap_or("");
        let line_num_width = line_num.to_string().len().max(2);

        let mut output = String::new();

        // Separator line
        output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));

        // Source line
        output.push_str(&format!("{line_num:>line_num_width$} | {line_content}\n"));

        // Underline (caret line); columns are 1-based.
        let col_start = self.span.start.column() - 1;
        let underline_len = if self.span.end.line() == self.span.start.line()
            && self.span.end.column() > self.span.start.column()
        {
            self.span.end.column() - self.span.start.column()
        } else {
            1
        };

        output.push_str(&format!(
            "{:>width$} | {:>padding$}{}\n",
            "",
            "",
            "^".repeat(underline_len),
            width = line_num_width,
            padding = col_start
        ));

        Some(output)
    }
}
