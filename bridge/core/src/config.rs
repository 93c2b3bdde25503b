//! Extension Configuration
//!
//! The configuration value shared by every role of the extension, the record
//! form the host persists it in, and the normalizer that turns whatever the
//! host hands back into a well-formed value.
//!
//! # Normalization
//!
//! Persisted content is untrusted: it may be missing (the broadcaster never
//! saved), malformed, or well-formed JSON of the wrong shape. All of these
//! resolve to the canonical default. The UI never sees an error value, only
//! an [`ExtensionConfig`].

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Protocol version stamped on every persisted write.
///
/// Fixed; never negotiated and never compared on read.
pub const CONFIG_VERSION: &str = "0.0.1";

/// A reference to one of the configured colors
pub type ColorRef = serde_json::Value;

/// A color definition offered to the broadcaster
pub type ColorDef = serde_json::Value;

/// A drawing tool definition
pub type ToolDef = serde_json::Value;

/// The synchronized extension configuration
///
/// Treated as a replace-on-receive snapshot: each delivery to the UI is the
/// full authoritative value, never a delta. Element shapes belong to the UI
/// and are carried through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionConfig {
    /// Colors the broadcaster has picked for viewers
    pub selected_colors: Vec<ColorRef>,
    /// All colors available to pick from
    pub colors: Vec<ColorDef>,
    /// Enabled tools
    pub tools: Vec<ToolDef>,
}

impl ExtensionConfig {
    /// The canonical default: three empty sequences
    #[must_use]
    pub fn canonical_default() -> Self {
        Self::default()
    }

    /// Whether this value equals the canonical default
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.selected_colors.is_empty() && self.colors.is_empty() && self.tools.is_empty()
    }

    /// Serialize to the compact JSON string stored as record content
    ///
    /// # Errors
    ///
    /// Only fails if a contained value cannot be represented as JSON, which
    /// cannot happen for values that were themselves parsed from JSON.
    pub fn to_content(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Configuration segment a record belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigScope {
    /// The single writable record owned by the channel's broadcaster
    Broadcaster,
}

impl ConfigScope {
    /// Wire name of the scope
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Broadcaster => "broadcaster",
        }
    }
}

impl std::fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The form in which the host stores a configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    /// Owning scope
    pub scope: ConfigScope,
    /// Protocol version the writer stamped
    pub version: String,
    /// Serialized [`ExtensionConfig`] (untrusted on read)
    pub content: String,
}

impl PersistedRecord {
    /// Build the broadcaster record for a write, stamped with [`CONFIG_VERSION`]
    pub fn broadcaster(content: impl Into<String>) -> Self {
        Self {
            scope: ConfigScope::Broadcaster,
            version: CONFIG_VERSION.to_string(),
            content: content.into(),
        }
    }
}

/// Turn raw persisted content into a well-formed configuration
///
/// `None` means no record exists yet. Content that does not parse, or parses
/// into something other than an object carrying all three sequences, is
/// replaced wholesale by the canonical default. Fields are never merged.
/// Unknown top-level keys are dropped. A top-level key that appears twice
/// makes the whole content unusable, so it also yields the default.
#[must_use]
pub fn normalize(raw: Option<&str>) -> ExtensionConfig {
    let Some(raw) = raw else {
        return ExtensionConfig::default();
    };

    match serde_json::from_str::<ExtensionConfig>(raw) {
        Ok(config) => config,
        Err(e) => {
            debug!(error = %e, "Persisted configuration unusable, falling back to default");
            ExtensionConfig::default()
        }
    }
}

/// [`normalize`] applied to the content of an optional host record
#[must_use]
pub fn normalize_record(record: Option<&PersistedRecord>) -> ExtensionConfig {
    normalize(record.map(|r| r.content.as_str()))
}
