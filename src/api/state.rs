//! Application State
//!
//! Shared state accessible by all handlers, wrapped in an Arc by the router.

use std::sync::Arc;
use std::time::Instant;

use crate::sheets::SheetSource;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Where report sheets are read from
    pub source: Arc<dyn SheetSource>,
    /// Server configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(source: Arc<dyn SheetSource>, config: ApiConfig) -> Self {
        Self {
            source,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ApiConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addr() {
        assert_eq!(ApiConfig::default().addr(), "0.0.0.0:5000");
        assert_eq!(ApiConfig::new("127.0.0.1", 8080).addr(), "127.0.0.1:8080");
    }
}
