//! Gateway configuration loaded from environment variables.

use std::time::Duration;

/// Server and downstream configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `8080`)
/// - `CARS_SERVICE_URL` — inventory base URL (default: `"http://cars:8070"`)
/// - `PAYMENT_SERVICE_URL` — payment base URL (default: `"http://payment:8050"`)
/// - `RENTAL_SERVICE_URL` — ledger base URL (default: `"http://rental:8060"`)
/// - `REQUEST_TIMEOUT_SECS` — per-call downstream deadline (default: `10`)
///
/// The values are handed to each client at construction; nothing reads them
/// ambiently after startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cars_service_url: String,
    pub payment_service_url: String,
    pub rental_service_url: String,
    pub request_timeout: Duration,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cars_service_url: env_or("CARS_SERVICE_URL", "http://cars:8070"),
            payment_service_url: env_or("PAYMENT_SERVICE_URL", "http://payment:8050"),
            rental_service_url: env_or("RENTAL_SERVICE_URL", "http://rental:8060"),
            request_timeout: Duration::from_secs(
                std::env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cars_service_url: "http://cars:8070".to_string(),
            payment_service_url: "http://payment:8050".to_string(),
            rental_service_url: "http://rental:8060".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}
