//! API Routes
//!
//! Configures the Axum router with all property cache endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_property_handler, get_property_handler, health_handler, list_properties_handler,
    set_property_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /properties` - List all stored properties
/// - `GET /properties/:name` - Read one property (cached)
/// - `PUT /properties/:name` - Set a property value
/// - `DELETE /properties/:name` - Reset a property to its default
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/properties", get(list_properties_handler))
        .route(
            "/properties/:name",
            get(get_property_handler)
                .put(set_property_handler)
                .delete(delete_property_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
