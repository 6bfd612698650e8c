//! Request DTOs for the property cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

// == Public Constants ==
/// Maximum allowed property name length in characters
pub const MAX_NAME_LENGTH: usize = 256;

/// Request body for the SET operation (PUT /properties/:name)
///
/// # Fields
/// - `value`: The value to store for the property
/// - `metadata`: Optional opaque metadata carried through to the store
#[derive(Debug, Clone, Deserialize)]
pub struct SetPropertyRequest {
    /// The value to store
    pub value: String,
    /// Optional opaque metadata
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Validates a property name taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_property_name(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("Property name cannot be empty".to_string());
    }
    if name.len() > MAX_NAME_LENGTH {
        return Some(format!(
            "Property name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        ));
    }
    None
}
