//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether property reads go through the cache at all
    pub cache_enabled: bool,
    /// Background staleness check interval in seconds
    pub refresh_interval: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ENABLED` - Read-through caching on/off (default: true)
    /// - `REFRESH_INTERVAL` - Staleness check frequency in seconds, must be
    ///   positive (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            cache_enabled: env::var("CACHE_ENABLED")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
            // Zero would panic the interval timer; treat it like unset.
            refresh_interval: env::var("REFRESH_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&secs| secs > 0)
                .unwrap_or(5),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            refresh_interval: 5,
            server_port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.cache_enabled);
        assert_eq!(config.refresh_interval, 5);
        assert_eq!(config.server_port, 3000);
    }

    // One test owns all env mutation; the test runner is multi-threaded
    // and process env is shared.
    #[test]
    fn test_config_from_env() {
        env::remove_var("CACHE_ENABLED");
        env::remove_var("REFRESH_INTERVAL");
        env::remove_var("SERVER_PORT");

        // Defaults when nothing is set
        let config = Config::from_env();
        assert!(config.cache_enabled);
        assert_eq!(config.refresh_interval, 5);
        assert_eq!(config.server_port, 3000);

        env::set_var("CACHE_ENABLED", "false");
        env::set_var("REFRESH_INTERVAL", "30");
        let config = Config::from_env();
        assert!(!config.cache_enabled);
        assert_eq!(config.refresh_interval, 30);

        env::set_var("CACHE_ENABLED", "FALSE");
        assert!(!Config::from_env().cache_enabled);

        // Anything other than "false" keeps the cache on,
        // and unparseable or zero intervals fall back to the default.
        env::set_var("CACHE_ENABLED", "yes");
        env::set_var("REFRESH_INTERVAL", "soon");
        let config = Config::from_env();
        assert!(config.cache_enabled);
        assert_eq!(config.refresh_interval, 5);

        env::set_var("REFRESH_INTERVAL", "0");
        assert_eq!(Config::from_env().refresh_interval, 5);

        env::remove_var("CACHE_ENABLED");
        env::remove_var("REFRESH_INTERVAL");
    }
}
