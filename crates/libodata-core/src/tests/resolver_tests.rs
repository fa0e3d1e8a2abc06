//! Tests for the metadata resolver.
//!
//! These tests verify:
//! - First-match prefix lookup in configured order
//! - Case-insensitive matching
//! - File-backed resolution and per-path caching
//! - Failed loads surfacing errors without poisoning the cache

use crate::metadata::MetadataMapEntry;
use crate::metadata::MetadataResolver;
use crate::metadata::ResolveError;
use crate::tests::fixtures::SAMPLE_EDMX;
use std::path::PathBuf;
use std::sync::Arc;

fn entry(url: &str, path: impl Into<PathBuf>) -> MetadataMapEntry {
    MetadataMapEntry {
        url: url.to_string(),
        path: path.into(),
    }
}

/// The FIRST configured entry whose prefix matches wins, even when a
/// later entry matches more specifically.
#[test]
fn test_lookup_honors_configured_order() {
    let resolver = MetadataResolver::new(vec![
        entry("http://a/", "A.xml"),
        entry("http://a/b/", "B.xml"),
    ]);

    let matched = resolver.lookup("http://a/b/Entities").unwrap();
    assert_eq!(matched.path, PathBuf::from("A.xml"));
}

#[test]
fn test_lookup_is_case_insensitive() {
    let resolver = MetadataResolver::new(vec![entry(
        "http://Host/Analytics/",
        "analytics.xml",
    )]);

    assert!(resolver.lookup("HTTP://HOST/analytics/WorkItems").is_ok());
    assert!(resolver.lookup("http://host/other/WorkItems").is_err());
}

#[test]
fn test_lookup_unregistered_service_root() {
    let resolver = MetadataResolver::new(Vec::new());
    match resolver.lookup("http://nowhere/svc") {
        Err(ResolveError::UnregisteredMapping { service_root }) => {
            assert_eq!(service_root, "http://nowhere/svc");
        }
        other => panic!("expected UnregisteredMapping, got {other:?}"),
    }
}

/// Resolution reads the mapped schema file and returns the parsed
/// model.
#[tokio::test]
async fn test_resolve_reads_mapped_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analytics.xml");
    std::fs::write(&path, SAMPLE_EDMX).unwrap();

    let resolver =
        MetadataResolver::new(vec![entry("http://host/analytics/", path)]);
    let metadata = resolver
        .resolve("http://host/analytics/WorkItems")
        .await
        .expect("resolution should succeed");
    assert_eq!(metadata.schemas[0].namespace, "Analytics");
}

/// Repeated resolutions of the same path serve the identical cached
/// document.
#[tokio::test]
async fn test_resolve_caches_per_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analytics.xml");
    std::fs::write(&path, SAMPLE_EDMX).unwrap();

    let resolver =
        MetadataResolver::new(vec![entry("http://host/analytics/", path)]);
    let first = resolver.resolve("http://host/analytics/A").await.unwrap();
    let second = resolver.resolve("http://host/analytics/B").await.unwrap();
    assert!(
        Arc::ptr_eq(&first, &second),
        "second resolution must hit the cache"
    );
}

/// A missing schema file is an `Io` error; the failure is not cached,
/// so resolution succeeds once the file appears.
#[tokio::test]
async fn test_resolve_failure_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("late.xml");

    let resolver = MetadataResolver::new(vec![entry(
        "http://host/analytics/",
        path.clone(),
    )]);
    match resolver.resolve("http://host/analytics/WorkItems").await {
        Err(ResolveError::Io { path: failed, .. }) => {
            assert_eq!(failed, path);
        }
        other => panic!("expected Io error, got {other:?}"),
    }

    std::fs::write(&path, SAMPLE_EDMX).unwrap();
    assert!(resolver.resolve("http://host/analytics/WorkItems").await.is_ok());
}

/// A schema file that fails EDMX reading surfaces a metadata error.
#[tokio::test]
async fn test_resolve_rejects_invalid_schema_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.xml");
    std::fs::write(&path, "<catalog/>").unwrap();

    let resolver =
        MetadataResolver::new(vec![entry("http://host/analytics/", path)]);
    match resolver.resolve("http://host/analytics/WorkItems").await {
        Err(ResolveError::Metadata(_)) => {}
        other => panic!("expected Metadata error, got {other:?}"),
    }
}
