//! Error-tolerant parser for OData query documents.
//!
//! # Failure modes
//!
//! The parser has two deliberately distinct failure modes:
//!
//! - **Hard** ([`ODataParseError`]): the input cannot be matched at
//!   the root production at all (empty text, or no service root before
//!   the query marker). No tree is produced.
//! - **Soft** ([`ErrorSyntax`](crate::syntax::ErrorSyntax)): a locally
//!   unparseable fragment inside an otherwise valid document is
//!   recorded on the `error` field of the nearest enclosing node, with
//!   a span covering exactly the offending character range, and
//!   parsing continues. Best-effort consumers (formatting, binding,
//!   completion) use the recovered tree; diagnostics collection turns
//!   each embedded error node into a report.
//!
//! # Grammar
//!
//! The service root is everything before the first `?`, captured
//! verbatim (whitespace inside it is significant; trivia between the
//! root and the marker is trimmed). The query string is split into
//! `$keyword=value` clauses on `&`. `$select` values split on the list
//! separator, each element becoming a property node in source order;
//! whitespace around elements is insignificant. Other clause keywords
//! (`$filter`, `$top`, `$skip`, `$apply`, …) are accepted as
//! unanalyzed regions.

use crate::syntax::ErrorSyntax;
use crate::syntax::NodeId;
use crate::syntax::PropertySyntax;
use crate::syntax::SelectItemSyntax;
use crate::syntax::SelectSyntax;
use crate::syntax::SyntaxTree;
use crate::syntax::UnanalyzedClauseSyntax;
use crate::syntax::UriSyntax;
use crate::ODataParseError;
use crate::SourcePosition;
use crate::SourceSpan;
use memchr::memchr;
use smallvec::SmallVec;

/// Clause keywords the grammar accepts without modeling their value.
const UNANALYZED_CLAUSE_KEYWORDS: &[&str] = &[
    "$apply",
    "$count",
    "$expand",
    "$filter",
    "$format",
    "$orderby",
    "$search",
    "$skip",
    "$skiptoken",
    "$top",
];

// =============================================================================
// Scanning cursor
// =============================================================================

/// A character cursor over the source text that maintains position
/// tracking as it consumes input.
///
/// Advances exactly one [`SourcePosition`] per consumed character,
/// including across line breaks: `\n` and `\r` each increment the
/// line and reset the column to 1, and `\r\n` is counted as the two
/// characters it is (the `\n` of a pair consumes one offset unit
/// without incrementing the line a second time).
struct Cursor<'src> {
    /// The full source text being scanned.
    source: &'src str,

    /// Current byte offset from the start of `source`.
    ///
    /// The remaining text to scan is `&source[byte_offset..]`.
    byte_offset: usize,

    /// Current UTF-16 code-unit offset from document start (0-based).
    offset_utf16: usize,

    /// Current 1-based line number.
    line: usize,

    /// Current 1-based column, in UTF-16 code units.
    column: usize,

    /// Whether the previous character was `\r`, so a following `\n`
    /// does not increment the line number again.
    last_char_was_cr: bool,
}

impl<'src> Cursor<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            byte_offset: 0,
            offset_utf16: 0,
            line: 1,
            column: 1,
            last_char_was_cr: false,
        }
    }

    /// Returns the remaining source text to be scanned.
    fn remaining(&self) -> &'src str {
        &self.source[self.byte_offset..]
    }

    /// Returns the current source position.
    fn position(&self) -> SourcePosition {
        SourcePosition::new(self.offset_utf16, self.line, self.column)
    }

    /// Peeks at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Returns `true` once all input has been consumed.
    fn is_at_end(&self) -> bool {
        self.byte_offset >= self.source.len()
    }

    /// Consumes the next character and updates position tracking.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek()?;

        if ch == '\n' {
            if self.last_char_was_cr {
                // The \n of a \r\n pair: the line was already
                // incremented when the \r was consumed.
                self.last_char_was_cr = false;
            } else {
                self.line += 1;
                self.column = 1;
            }
        } else if ch == '\r' {
            self.line += 1;
            self.column = 1;
            self.last_char_was_cr = true;
        } else {
            self.column += ch.len_utf16();
            self.last_char_was_cr = false;
        }

        self.offset_utf16 += ch.len_utf16();
        self.byte_offset += ch.len_utf8();
        Some(ch)
    }
}

// =============================================================================
// Parser
// =============================================================================

/// A single-pass parser over one query document.
///
/// # Usage
///
/// ```
/// use libodata_parser::ODataParser;
///
/// let tree = ODataParser::new("http://host/svc/Items?$select=id,name")
///     .parse_document()
///     .unwrap();
///
/// assert_eq!(tree.root.service_root, "http://host/svc/Items");
/// let select = tree.root.select.as_ref().unwrap();
/// assert_eq!(select.items.len(), 2);
/// ```
pub struct ODataParser<'src> {
    cursor: Cursor<'src>,

    /// Next node id to hand out; ids are assigned in creation order.
    next_node_id: u32,
}

impl<'src> ODataParser<'src> {
    /// Creates a new parser over `source`.
    pub fn new<S: AsRef<str> + ?Sized>(source: &'src S) -> Self {
        Self {
            cursor: Cursor::new(source.as_ref()),
            next_node_id: 0,
        }
    }

    /// Parses the full document into a [`SyntaxTree`].
    ///
    /// Fails hard only when no tree can be produced at all; partially
    /// well-formed input yields a tree with embedded error nodes (see
    /// the module docs).
    pub fn parse_document(mut self) -> Result<SyntaxTree, ODataParseError> {
        let root = self.parse_uri()?;
        Ok(SyntaxTree { root })
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    fn parse_uri(&mut self) -> Result<UriSyntax, ODataParseError> {
        let doc_start = self.cursor.position();

        if self.cursor.source.is_empty() {
            return Err(ODataParseError::new(
                "Expected a service root.",
                SourceSpan::new(doc_start, doc_start),
            ));
        }

        let uri_id = self.next_id();
        let has_query = memchr(b'?', self.cursor.source.as_bytes()).is_some();

        // Service root: everything up to the query marker.
        while let Some(ch) = self.cursor.peek() {
            if ch == '?' {
                break;
            }
            self.cursor.consume();
        }
        let service_root_raw = &self.cursor.source[..self.cursor.byte_offset];

        // Trivia between the root text and the marker (the formatter
        // emits newline+indent there) is not part of the literal root.
        let service_root = service_root_raw.trim_end();

        if service_root.trim_start().is_empty() {
            let span = SourceSpan::new(doc_start, self.cursor.position());
            return Err(ODataParseError::new(
                "Expected a service root before the query string.",
                span,
            ));
        }

        let mut uri = UriSyntax {
            id: uri_id,
            span: SourceSpan::new(doc_start, doc_start),
            service_root: service_root.to_string(),
            select: None,
            unanalyzed: Vec::new(),
            error: None,
        };

        if has_query {
            self.cursor.consume(); // the '?' marker
            self.parse_query(&mut uri);
        }

        uri.span = SourceSpan::new(doc_start, self.cursor.position());
        Ok(uri)
    }

    /// Parses the query string into clauses, attaching results to
    /// `uri`.
    fn parse_query(&mut self, uri: &mut UriSyntax) {
        loop {
            // Skip clause separators and stray whitespace between
            // clauses.
            while let Some(ch) = self.cursor.peek() {
                if ch == '&' || ch.is_whitespace() {
                    self.cursor.consume();
                } else {
                    break;
                }
            }
            if self.cursor.is_at_end() {
                break;
            }
            self.parse_clause(uri);
        }
    }

    /// Parses one `$keyword=value` clause.
    fn parse_clause(&mut self, uri: &mut UriSyntax) {
        let clause_start = self.cursor.position();
        let keyword_start_byte = self.cursor.byte_offset;

        while let Some(ch) = self.cursor.peek() {
            if ch == '=' || ch == '&' {
                break;
            }
            self.cursor.consume();
        }
        let keyword = self.cursor.source
            [keyword_start_byte..self.cursor.byte_offset]
            .trim();

        let has_value = self.cursor.peek() == Some('=');
        if has_value {
            self.cursor.consume(); // '='
        }

        if keyword == "$select" && has_value && uri.select.is_none() {
            uri.select = Some(self.parse_select_clause(clause_start));
        } else if has_value
            && UNANALYZED_CLAUSE_KEYWORDS.contains(&keyword)
        {
            // Accepted but not modeled: carry the clause verbatim so
            // re-rendering preserves it.
            self.skip_clause_value();
            let text = self.cursor.source
                [keyword_start_byte..self.cursor.byte_offset]
                .trim_end();
            uri.unanalyzed.push(UnanalyzedClauseSyntax {
                id: self.next_id(),
                span: SourceSpan::new(clause_start, self.cursor.position()),
                text: text.to_string(),
            });
        } else {
            // Unknown keyword, missing `=`, duplicate `$select`, or
            // stray text: recover locally with an error node covering
            // the whole clause.
            self.skip_clause_value();
            let span = SourceSpan::new(clause_start, self.cursor.position());
            if uri.error.is_none() {
                uri.error = Some(ErrorSyntax {
                    id: self.next_id(),
                    span,
                });
            }
        }
    }

    /// Consumes the rest of the current clause's value.
    fn skip_clause_value(&mut self) {
        while let Some(ch) = self.cursor.peek() {
            if ch == '&' {
                break;
            }
            self.cursor.consume();
        }
    }

    /// Parses the value of a `$select` clause into an ordered item
    /// list. The cursor is positioned immediately after the `=`.
    fn parse_select_clause(
        &mut self,
        clause_start: SourcePosition,
    ) -> SelectSyntax {
        let select_id = self.next_id();
        let mut items: SmallVec<[SelectItemSyntax; 4]> = SmallVec::new();
        let mut error: Option<ErrorSyntax> = None;

        loop {
            // Leading whitespace around list elements is
            // insignificant and excluded from item spans.
            while let Some(ch) = self.cursor.peek() {
                if ch.is_whitespace() {
                    self.cursor.consume();
                } else {
                    break;
                }
            }

            let elem_start = self.cursor.position();
            let elem_start_byte = self.cursor.byte_offset;
            let mut elem_end = elem_start;
            let mut elem_end_byte = elem_start_byte;

            while let Some(ch) = self.cursor.peek() {
                if ch == ',' || ch == '&' {
                    break;
                }
                self.cursor.consume();
                if !ch.is_whitespace() {
                    elem_end = self.cursor.position();
                    elem_end_byte = self.cursor.byte_offset;
                }
            }

            let text = &self.cursor.source[elem_start_byte..elem_end_byte];
            let span = SourceSpan::new(elem_start, elem_end);

            if is_valid_property_path(text) {
                let property = PropertySyntax {
                    id: self.next_id(),
                    span,
                    property_name: text.to_string(),
                };
                items.push(if text.contains('/') {
                    SelectItemSyntax::NavigationProperty(property)
                } else {
                    SelectItemSyntax::PrimitiveProperty(property)
                });
            } else if error.is_none() {
                // Empty element or invalid characters: the span covers
                // exactly the offending range (zero-width for an
                // empty element).
                error = Some(ErrorSyntax {
                    id: self.next_id(),
                    span,
                });
            }

            if self.cursor.peek() == Some(',') {
                self.cursor.consume();
            } else {
                break;
            }
        }

        SelectSyntax {
            id: select_id,
            span: SourceSpan::new(clause_start, self.cursor.position()),
            items,
            error,
        }
    }
}

/// Returns `true` if `text` is a valid property path: one or more
/// `/`-separated property names.
fn is_valid_property_path(text: &str) -> bool {
    !text.is_empty() && text.split('/').all(is_valid_property_name)
}

/// Returns `true` if `name` is a valid property name: an ASCII letter
/// or underscore followed by letters, digits, underscores, or dots
/// (dots appear in namespace-qualified names like `System.Title`).
fn is_valid_property_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
