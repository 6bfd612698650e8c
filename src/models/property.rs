//! Property Entry Module
//!
//! Defines the domain object for a dynamic configuration property.

use serde::{Deserialize, Serialize};

// == Property Entry ==
/// A single dynamic configuration property as stored by the backend.
///
/// Entries are immutable once read: the cache hands out shared references
/// and never mutates a stored entry in place. The `metadata` blob is opaque
/// to the caching layer; it is carried through untouched for callers that
/// attach provenance or type information to a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyEntry {
    /// Unique property name
    pub name: String,
    /// Current property value
    pub value: String,
    /// Opaque caller-defined metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl PropertyEntry {
    // == Constructor ==
    /// Creates a new property entry without metadata.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            metadata: None,
        }
    }

    /// Creates a new property entry carrying an opaque metadata blob.
    pub fn with_metadata(
        name: impl Into<String>,
        value: impl Into<String>,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            metadata: Some(metadata),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_new() {
        let entry = PropertyEntry::new("registry.limits.max", "100");
        assert_eq!(entry.name, "registry.limits.max");
        assert_eq!(entry.value, "100");
        assert!(entry.metadata.is_none());
    }

    #[test]
    fn test_entry_with_metadata() {
        let entry =
            PropertyEntry::with_metadata("feature.enabled", "true", json!({"type": "boolean"}));
        assert_eq!(entry.metadata, Some(json!({"type": "boolean"})));
    }

    #[test]
    fn test_entry_serialize_omits_empty_metadata() {
        let entry = PropertyEntry::new("a", "1");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("metadata"));
    }

    #[test]
    fn test_entry_roundtrip() {
        let entry = PropertyEntry::with_metadata("a", "1", json!({"source": "env"}));
        let json = serde_json::to_string(&entry).unwrap();
        let back: PropertyEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
