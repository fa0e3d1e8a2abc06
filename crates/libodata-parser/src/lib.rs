//! An error-tolerant parsing library for OData-style URI query
//! documents.
//!
//! This crate is the pure syntactic layer of the workspace: source
//! positions and spans, the closed syntax-tree node set, the
//! visitor/walker traversal framework, and the recovering parser. It
//! performs no I/O and has no async surface; semantic analysis lives
//! in `libodata-core`.

mod parse_error;
mod parser;
mod source_position;
mod source_span;
pub mod syntax;
pub mod visit;

pub use parse_error::ODataParseError;
pub use parser::ODataParser;
pub use source_position::SourcePosition;
pub use source_span::SourceSpan;

#[cfg(test)]
mod tests;
