//! Canonical re-rendering of query documents.
//!
//! A [`SyntaxVisitor`] renders each node to its textual form
//! bottom-up. `$select` rendering is width-aware: the single-line form
//! is emitted when its character count fits `line_width`, otherwise
//! each property goes on its own line behind two indent units.
//! Property order is preserved exactly as parsed, never sorted, and
//! unanalyzed clauses (`$filter`, `$top`, …) re-emit verbatim in the
//! position they were written. Embedded error nodes render as empty
//! text — formatting is best-effort over a recovered tree, while a
//! hard parse failure yields no output at all (callers keep the
//! original text).

use libodata_parser::syntax::PropertySyntax;
use libodata_parser::syntax::SelectSyntax;
use libodata_parser::syntax::SyntaxNode;
use libodata_parser::syntax::UnanalyzedClauseSyntax;
use libodata_parser::syntax::UriSyntax;
use libodata_parser::visit::SyntaxVisitor;
use libodata_parser::ODataParseError;
use libodata_parser::ODataParser;

/// Layout options for canonical rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct FormatOptions {
    /// Maximum character count for the one-line `$select` form.
    pub line_width: usize,

    /// Newline sequence to emit.
    pub newline: String,

    /// One indent unit.
    pub indent: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            line_width: 100,
            newline: "\r\n".to_string(),
            indent: "    ".to_string(),
        }
    }
}

/// Parses `text` and renders its canonical form.
///
/// A hard parse failure is returned to the caller, who preserves the
/// original text rather than emitting partial output.
pub fn format_document(
    text: &str,
    options: &FormatOptions,
) -> Result<String, ODataParseError> {
    let tree = ODataParser::new(text).parse_document()?;
    let mut visitor = FormattingVisitor { options };
    Ok(visitor.visit(tree.root_node()))
}

/// Renders each node to its textual form.
pub struct FormattingVisitor<'opts> {
    pub options: &'opts FormatOptions,
}

impl SyntaxVisitor for FormattingVisitor<'_> {
    type Output = String;

    fn visit_default(&mut self, _node: SyntaxNode<'_>) -> String {
        String::new()
    }

    fn visit_primitive_property(&mut self, node: &PropertySyntax) -> String {
        node.property_name.clone()
    }

    fn visit_navigation_property(&mut self, node: &PropertySyntax) -> String {
        node.property_name.clone()
    }

    fn visit_select(&mut self, node: &SelectSyntax) -> String {
        let rendered: Vec<String> = node
            .items
            .iter()
            .map(|item| self.visit(item.as_node()))
            .collect();

        let oneline = format!("$select={}", rendered.join(", "));
        if oneline.chars().count() <= self.options.line_width {
            return oneline;
        }

        let item_prefix = format!(
            "{}{}{}",
            self.options.newline, self.options.indent, self.options.indent,
        );
        format!(
            "$select={item_prefix}{}",
            rendered.join(&format!(",{item_prefix}")),
        )
    }

    fn visit_unanalyzed_clause(
        &mut self,
        node: &UnanalyzedClauseSyntax,
    ) -> String {
        node.text.clone()
    }

    fn visit_uri(&mut self, node: &UriSyntax) -> String {
        // Clauses re-emit in source order: unanalyzed clauses must
        // survive a format pass in the position they were written.
        let mut clauses: Vec<(usize, String)> = Vec::new();
        if let Some(select) = &node.select {
            clauses.push((
                select.span.start.offset(),
                self.visit_select(select),
            ));
        }
        for clause in &node.unanalyzed {
            clauses.push((
                clause.span.start.offset(),
                self.visit_unanalyzed_clause(clause),
            ));
        }
        if clauses.is_empty() {
            return node.service_root.clone();
        }
        clauses.sort_by_key(|(offset, _)| *offset);

        let rendered: Vec<String> =
            clauses.into_iter().map(|(_, text)| text).collect();
        format!(
            "{}{}{}?{}",
            node.service_root,
            self.options.newline,
            self.options.indent,
            rendered.join("&"),
        )
    }
}
