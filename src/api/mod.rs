//! API Module
//!
//! HTTP handlers and routing for the property cache REST API.
//!
//! # Endpoints
//! - `GET /properties` - List all stored properties
//! - `GET /properties/:name` - Read one property (cached)
//! - `PUT /properties/:name` - Set a property value
//! - `DELETE /properties/:name` - Reset a property to its default
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
