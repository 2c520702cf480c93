//! Centralized configuration management for roster

use anyhow::{Context, Result};
use std::time::Duration;

/// Default user-directory endpoint.
const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the user-directory collection endpoint
    pub endpoint: String,
    /// Rows shown per table page (also sizes the page-control group)
    pub rows_per_page: usize,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "roster/0.1.0".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let endpoint =
            std::env::var("ROSTER_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let rows_per_page = parse_env_var("ROSTER_ROWS_PER_PAGE")?.unwrap_or(3);

        let http = HttpConfig {
            timeout_seconds: parse_env_var("ROSTER_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("ROSTER_USER_AGENT")
                .unwrap_or_else(|_| "roster/0.1.0".to_string()),
        };

        Ok(Config {
            endpoint,
            rows_per_page,
            http,
        })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(anyhow::anyhow!("Endpoint URL must not be empty"));
        }

        if self.rows_per_page == 0 {
            return Err(anyhow::anyhow!("Rows per page must be at least 1"));
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
