//! The diagnostic model and syntax-error collection.
//!
//! User-input failures are always recovered into [`Diagnostic`]
//! values — they never propagate as errors past the analysis
//! boundary. A hard parse failure maps to exactly one diagnostic at
//! the parser's location; a soft-recovered parse yields one
//! diagnostic per embedded error node.

use libodata_parser::syntax::SyntaxNode;
use libodata_parser::syntax::SyntaxTree;
use libodata_parser::visit::SyntaxWalker;
use libodata_parser::ODataParseError;
use libodata_parser::SourceSpan;

/// Message reported for every locally recovered syntax error.
pub const UNEXPECTED_CHARACTER_MESSAGE: &str = "Unexpected character detected.";

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Severity {
    Error,
    Warning,
}

/// One published problem report, anchored to a source span.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Diagnostic {
    pub span: SourceSpan,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    /// Creates an error-severity diagnostic.
    pub fn error(span: SourceSpan, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Maps a hard parse failure to its single canonical diagnostic.
    pub fn from_parse_error(error: &ODataParseError) -> Self {
        Self::error(*error.span(), error.message())
    }
}

/// Collects one diagnostic per embedded error node in the tree.
pub fn collect_syntax_diagnostics(tree: &SyntaxTree) -> Vec<Diagnostic> {
    let mut collector = SyntaxErrorCollector {
        diagnostics: Vec::new(),
    };
    collector.walk(tree.root_node());
    collector.diagnostics
}

struct SyntaxErrorCollector {
    diagnostics: Vec<Diagnostic>,
}

impl SyntaxWalker for SyntaxErrorCollector {
    fn on_node(&mut self, node: SyntaxNode<'_>) {
        if let SyntaxNode::Error(error) = node {
            self.diagnostics.push(Diagnostic::error(
                error.span,
                UNEXPECTED_CHARACTER_MESSAGE,
            ));
        }
    }
}
