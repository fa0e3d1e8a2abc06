//! Debounced per-document analysis and diagnostic publishing.
//!
//! Each change notification restarts a quiet-period timer for its
//! document; the full analysis (parse → syntax diagnostics → resolve
//! metadata → bind) runs only once the quiet period elapses with no
//! further change. At most one timer is pending per document: the
//! previous timer is always canceled before a new one is stored.
//!
//! Published diagnostics replace any prior set for the document
//! wholesale — there is no partial or interleaved visibility, and no
//! shared mutable tree state between cycles (every cycle parses
//! fresh). A cycle whose document changed again before completion is
//! superseded by the next cycle's results; serializing delivery of a
//! stale cycle that is already past its timer is the host's concern.

use crate::binder::bind;
use crate::diagnostics::collect_syntax_diagnostics;
use crate::diagnostics::Diagnostic;
use crate::metadata::MetadataResolver;
use libodata_parser::ODataParser;
use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Quiet period that must elapse after the most recent change before
/// a recomputation runs.
pub const DEBOUNCE_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Where recomputed diagnostics are delivered.
///
/// `publish` replaces the document's entire prior diagnostic set.
pub trait DiagnosticsSink: Send + Sync + 'static {
    fn publish(&self, document_id: &str, diagnostics: Vec<Diagnostic>);
}

/// Runs one full analysis pass over `text`.
///
/// A hard parse failure yields exactly one diagnostic at the parser's
/// location. A recovered parse yields the embedded syntax errors plus
/// the binder's findings. A metadata resolution failure degrades the
/// cycle to syntax-only diagnostics — reported, never propagated.
pub async fn analyze(
    text: &str,
    resolver: &MetadataResolver,
) -> Vec<Diagnostic> {
    let tree = match ODataParser::new(text).parse_document() {
        Ok(tree) => tree,
        Err(error) => return vec![Diagnostic::from_parse_error(&error)],
    };

    let mut diagnostics = collect_syntax_diagnostics(&tree);

    match resolver.resolve(&tree.root.service_root).await {
        Ok(metadata) => {
            diagnostics.extend(bind(&tree, &metadata).diagnostics);
        }
        Err(error) => {
            // No schema available this cycle; semantic analysis is
            // skipped, not failed.
            log::warn!("Skipping property binding: {error}");
        }
    }

    diagnostics
}

/// A scheduled recomputation awaiting its quiet period.
///
/// The generation distinguishes this task from any newer one for the
/// same document, so a finished task only ever removes itself.
struct PendingAnalysis {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Debounced analysis driver for a set of open documents.
pub struct DocumentAnalyzer {
    resolver: Arc<MetadataResolver>,
    sink: Arc<dyn DiagnosticsSink>,

    /// The single pending timer per document, keyed by document id.
    /// Entries are removed on supersession and when the task itself
    /// completes; the table only holds live timers.
    pending: Arc<Mutex<HashMap<String, PendingAnalysis>>>,

    next_generation: AtomicU64,
}

impl DocumentAnalyzer {
    pub fn new(
        resolver: Arc<MetadataResolver>,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            resolver,
            sink,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Returns `true` while a recomputation for `document_id` is
    /// scheduled or running.
    pub fn has_pending_analysis(&self, document_id: &str) -> bool {
        self.pending
            .lock()
            .expect("pending-timer table lock poisoned")
            .contains_key(document_id)
    }

    /// Handles a change notification for `document_id`.
    ///
    /// Cancels the document's pending recomputation (if any) and
    /// schedules a fresh one for after the quiet period.
    pub fn document_changed(&self, document_id: &str, text: String) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let mut pending = self
            .pending
            .lock()
            .expect("pending-timer table lock poisoned");

        // Cancel before superseding: the old timer must never fire
        // after a newer one is scheduled.
        if let Some(stale) = pending.remove(document_id) {
            stale.handle.abort();
            log::trace!("Superseded pending analysis of `{document_id}`.");
        }

        let resolver = Arc::clone(&self.resolver);
        let sink = Arc::clone(&self.sink);
        let pending_table = Arc::clone(&self.pending);
        let document = document_id.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE_QUIET_PERIOD).await;
            let diagnostics = analyze(&text, &resolver).await;
            log::debug!(
                "Publishing {} diagnostic(s) for `{document}`.",
                diagnostics.len(),
            );
            sink.publish(&document, diagnostics);

            // Drop our own entry, unless a newer task already took the
            // slot.
            let mut pending = pending_table
                .lock()
                .expect("pending-timer table lock poisoned");
            if pending
                .get(&document)
                .is_some_and(|entry| entry.generation == generation)
            {
                pending.remove(&document);
            }
        });
        pending.insert(
            document_id.to_string(),
            PendingAnalysis { generation, handle },
        );
    }
}
