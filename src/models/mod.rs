//! Domain and transport models for the property cache server
//!
//! Holds the `PropertyEntry` domain object along with the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod property;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use property::PropertyEntry;
pub use requests::{validate_property_name, SetPropertyRequest, MAX_NAME_LENGTH};
pub use responses::{
    DeletePropertyResponse, ErrorResponse, HealthResponse, SetPropertyResponse, StatsResponse,
};
