//! Response DTOs for the property cache API
//!
//! Defines the structure of outgoing HTTP response bodies. Property reads
//! return the `PropertyEntry` domain object directly; the types here cover
//! the remaining endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Response body for the SET operation (PUT /properties/:name)
#[derive(Debug, Clone, Serialize)]
pub struct SetPropertyResponse {
    /// Success message
    pub message: String,
    /// The property that was written
    pub name: String,
}

impl SetPropertyResponse {
    /// Creates a new SetPropertyResponse
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            message: format!("Property '{}' set successfully", name),
            name,
        }
    }
}

/// Response body for the DELETE operation (DELETE /properties/:name)
#[derive(Debug, Clone, Serialize)]
pub struct DeletePropertyResponse {
    /// Success message
    pub message: String,
    /// The property that was reset
    pub name: String,
}

impl DeletePropertyResponse {
    /// Creates a new DeletePropertyResponse
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            message: format!("Property '{}' reset to default", name),
            name,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of reads answered from the cache
    pub hits: u64,
    /// Number of reads that had to query the backend
    pub misses: u64,
    /// Number of full cache clears performed
    pub invalidations: u64,
    /// Current number of cached slots
    pub entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Completion time of the last successful staleness poll, if any
    pub last_refresh: Option<DateTime<Utc>>,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(
        hits: u64,
        misses: u64,
        invalidations: u64,
        entries: usize,
        last_refresh: Option<DateTime<Utc>>,
    ) -> Self {
        let total_requests = hits + misses;
        let hit_rate = if total_requests > 0 {
            hits as f64 / total_requests as f64
        } else {
            0.0
        };
        Self {
            hits,
            misses,
            invalidations,
            entries,
            hit_rate,
            last_refresh,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_response_serialize() {
        let resp = SetPropertyResponse::new("my.property");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("my.property"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_delete_response_serialize() {
        let resp = DeletePropertyResponse::new("reset.property");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("reset.property"));
        assert!(json.contains("reset"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let resp = StatsResponse::new(80, 20, 5, 10, None);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::new(0, 0, 0, 0, None);
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_stats_response_includes_last_refresh() {
        let now = Utc::now();
        let resp = StatsResponse::new(1, 1, 0, 1, Some(now));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("last_refresh"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
