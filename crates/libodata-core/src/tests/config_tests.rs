//! Tests for the host configuration surface.

use crate::config::FormatConfig;
use crate::config::HostConfig;
use crate::metadata::MetadataMapEntry;
use std::path::PathBuf;

/// An empty document yields the documented defaults: every gate
/// enabled, decode off, no metadata mappings.
#[test]
fn test_defaults_from_empty_document() {
    let config: HostConfig = serde_json::from_str("{}").unwrap();
    assert!(config.diagnostic.enable);
    assert!(config.completion.enable);
    assert!(config.format.enable);
    assert!(!config.format.decode);
    assert!(config.format.syntax);
    assert!(config.metadata.map.is_empty());
    assert_eq!(config, HostConfig::default());
}

/// Partial documents override only the fields they name.
#[test]
fn test_partial_override_keeps_other_defaults() {
    let config: HostConfig = serde_json::from_str(
        r#"{
          "diagnostic": { "enable": false },
          "format": { "decode": true }
        }"#,
    )
    .unwrap();
    assert!(!config.diagnostic.enable);
    assert!(config.format.decode);
    assert!(config.format.enable, "unnamed fields keep their defaults");
    assert!(config.format.syntax);
    assert!(config.completion.enable);
}

#[test]
fn test_format_syntax_gate_can_be_disabled() {
    let config: FormatConfig =
        serde_json::from_str(r#"{ "syntax": false }"#).unwrap();
    assert!(config.enable);
    assert!(!config.syntax);
}

/// The metadata map deserializes in document order, which the
/// resolver depends on.
#[test]
fn test_metadata_map_preserves_document_order() {
    let config: HostConfig = serde_json::from_str(
        r#"{
          "metadata": {
            "map": [
              { "url": "http://a/", "path": "A.xml" },
              { "url": "http://a/b/", "path": "B.xml" }
            ]
          }
        }"#,
    )
    .unwrap();
    assert_eq!(
        config.metadata.map,
        vec![
            MetadataMapEntry {
                url: "http://a/".to_string(),
                path: PathBuf::from("A.xml"),
            },
            MetadataMapEntry {
                url: "http://a/b/".to_string(),
                path: PathBuf::from("B.xml"),
            },
        ],
    );
}

#[test]
fn test_config_round_trips_through_serialization() {
    let mut config = HostConfig::default();
    config.format.decode = true;
    config.metadata.map.push(MetadataMapEntry {
        url: "http://host/svc/".to_string(),
        path: PathBuf::from("svc.xml"),
    });

    let text = serde_json::to_string(&config).unwrap();
    let back: HostConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back, config);
}
