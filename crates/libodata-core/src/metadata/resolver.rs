//! Mapping service roots to metadata documents.
//!
//! The host supplies an ordered list of `(urlPrefix, schemaPath)`
//! entries. Resolution is a case-insensitive prefix match where the
//! FIRST configured entry wins: the list's order is a
//! correctness-relevant tie-break the resolver honors exactly as
//! given, never re-sorted by specificity.
//!
//! Backing file reads go through a memoizing async cache keyed by
//! schema path: concurrent resolutions for the same path coalesce
//! into a single read, and a successfully loaded document is served
//! from the cache for the process lifetime. Failed loads are not
//! cached.

use crate::metadata::EdmxReader;
use crate::metadata::Metadata;
use crate::metadata::MetadataError;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::OnceCell;

/// One entry of the host's `metadata.map` configuration.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MetadataMapEntry {
    /// Service-root URL prefix, matched case-insensitively.
    pub url: String,

    /// Path of the EDMX document describing services under `url`.
    pub path: PathBuf,
}

/// A failure to produce metadata for a service root.
///
/// Callers degrade gracefully on this: the analyzer reports and
/// publishes syntax-only diagnostics for the cycle rather than
/// crashing the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("No metadata mapping registered for service root `{service_root}`.")]
    UnregisteredMapping { service_root: String },

    #[error("Failed to read metadata file `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// Resolves service roots to cached [`Metadata`] documents.
pub struct MetadataResolver {
    /// Configured mappings, in host order.
    map: Vec<MetadataMapEntry>,

    /// One cell per schema path; the cell coalesces concurrent loads
    /// and memoizes the first success.
    cache: Mutex<HashMap<PathBuf, Arc<OnceCell<Arc<Metadata>>>>>,
}

impl MetadataResolver {
    /// Creates a resolver over the host's ordered mapping list.
    pub fn new(map: Vec<MetadataMapEntry>) -> Self {
        Self {
            map,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the first configured entry whose URL prefix matches
    /// `service_root`, case-insensitively.
    pub fn lookup(
        &self,
        service_root: &str,
    ) -> Result<&MetadataMapEntry, ResolveError> {
        let needle = service_root.to_lowercase();
        self.map
            .iter()
            .find(|entry| needle.starts_with(&entry.url.to_lowercase()))
            .ok_or_else(|| ResolveError::UnregisteredMapping {
                service_root: service_root.to_string(),
            })
    }

    /// Resolves `service_root` to its metadata document, reading and
    /// caching the mapped schema file on first use.
    pub async fn resolve(
        &self,
        service_root: &str,
    ) -> Result<Arc<Metadata>, ResolveError> {
        let entry = self.lookup(service_root)?;
        self.load(&entry.path).await
    }

    async fn load(&self, path: &Path) -> Result<Arc<Metadata>, ResolveError> {
        let cell = {
            let mut cache = self.cache.lock().await;
            cache.entry(path.to_path_buf()).or_default().clone()
        };

        cell.get_or_try_init(|| async {
            log::debug!("Loading metadata from `{}`.", path.display());
            let text = tokio::fs::read_to_string(path).await.map_err(
                |source| ResolveError::Io {
                    path: path.to_path_buf(),
                    source,
                },
            )?;
            let metadata = EdmxReader::read(&text)?;
            log::debug!(
                "Loaded {} schema(s) from `{}`.",
                metadata.schemas.len(),
                path.display(),
            );
            Ok(Arc::new(metadata))
        })
        .await
        .cloned()
    }
}
