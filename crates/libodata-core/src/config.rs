//! The host-supplied configuration surface.
//!
//! The core consumes this; it never computes or persists it. Feature
//! gates default to enabled, and the `metadata.map` list is honored
//! in exactly the order the host supplies it (see
//! [`MetadataResolver`](crate::metadata::MetadataResolver)).

use crate::metadata::MetadataMapEntry;

fn enabled() -> bool {
    true
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct HostConfig {
    pub diagnostic: DiagnosticConfig,
    pub completion: CompletionConfig,
    pub format: FormatConfig,
    pub metadata: MetadataConfig,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DiagnosticConfig {
    pub enable: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self { enable: true }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub enable: bool,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self { enable: true }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct FormatConfig {
    pub enable: bool,

    /// Percent-decode the rendered text (for queries pasted straight
    /// from an address bar).
    pub decode: bool,

    /// Perform syntax-aware re-rendering (as opposed to decode-only).
    #[serde(default = "enabled")]
    pub syntax: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            enable: true,
            decode: false,
            syntax: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub map: Vec<MetadataMapEntry>,
}
