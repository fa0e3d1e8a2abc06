//! Semantic analysis for OData query documents.
//!
//! This crate sits on top of `libodata-parser` and provides the
//! passes an editor host drives: EDMX metadata loading and
//! service-root resolution, property binding, debounced diagnostics,
//! canonical formatting, and the host configuration surface.

pub mod analyzer;
pub mod binder;
pub mod config;
pub mod diagnostics;
pub mod format;
pub mod metadata;

pub use analyzer::analyze;
pub use analyzer::DocumentAnalyzer;
pub use analyzer::DiagnosticsSink;
pub use analyzer::DEBOUNCE_QUIET_PERIOD;
pub use binder::bind;
pub use binder::BindOutcome;
pub use binder::PropertySymbol;
pub use config::HostConfig;
pub use diagnostics::collect_syntax_diagnostics;
pub use diagnostics::Diagnostic;
pub use diagnostics::Severity;
pub use format::format_document;
pub use format::FormatOptions;

#[cfg(test)]
mod tests;
