//! API Configuration Module
//!
//! Bind address, CORS and environment settings for the HTTP surface.
//! Configuration is loaded from environment variables with development
//! defaults.

use std::net::SocketAddr;

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind, e.g. "0.0.0.0".
    pub bind: String,

    /// TCP port to listen on.
    pub port: u16,

    // ========================================================================
    // CORS Configuration
    // ========================================================================
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    /// Example: "https://tickets.example.com,https://*.example.com"
    pub cors_origins: Vec<String>,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    /// Deployment environment name ("development", "production", ...).
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(), // Empty = allow all
            cors_max_age_secs: 86400, // 24 hours
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `TICKETRY_API_BIND`: Interface to bind (default: 0.0.0.0)
    /// - `PORT` or `TICKETRY_API_PORT`: Listen port (default: 3000)
    /// - `TICKETRY_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `TICKETRY_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `TICKETRY_ENVIRONMENT`: Environment name (default: development)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins = std::env::var("TICKETRY_CORS_ORIGINS")
            .ok()
            .map(|s| parse_origins(&s))
            .unwrap_or_default();

        let port = std::env::var("PORT")
            .or_else(|_| std::env::var("TICKETRY_API_PORT"))
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        Self {
            bind: std::env::var("TICKETRY_API_BIND").unwrap_or(defaults.bind),
            port,
            cors_origins,
            cors_max_age_secs: std::env::var("TICKETRY_CORS_MAX_AGE_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cors_max_age_secs),
            environment: std::env::var("TICKETRY_ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Socket address to listen on. An unparsable bind falls back to all
    /// interfaces.
    pub fn socket_addr(&self) -> SocketAddr {
        let addr = format!("{}:{}", self.bind, self.port);
        addr.parse().unwrap_or_else(|_| {
            tracing::warn!(bind = %self.bind, "Invalid bind address, using 0.0.0.0");
            SocketAddr::from(([0, 0, 0, 0], self.port))
        })
    }

    /// Check if running in production mode (strict CORS).
    pub fn is_production(&self) -> bool {
        !self.cors_origins.is_empty()
    }

    /// Check if a given origin is allowed.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        if self.cors_origins.is_empty() {
            return true;
        }

        self.cors_origins.iter().any(|allowed| {
            if allowed == origin {
                return true;
            }
            // *.example.com matches any https subdomain
            if let Some(suffix) = allowed.strip_prefix("*.") {
                if let Some(host) = origin.strip_prefix("https://") {
                    return host == suffix || host.ends_with(&format!(".{}", suffix));
                }
            }
            false
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.cors_max_age_secs, 86400);
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_socket_addr() {
        let config = ApiConfig {
            bind: "127.0.0.1".to_string(),
            port: 8080,
            ..ApiConfig::default()
        };
        assert_eq!(config.socket_addr(), SocketAddr::from(([127, 0, 0, 1], 8080)));

        let bad = ApiConfig {
            bind: "not an address".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(bad.socket_addr(), SocketAddr::from(([0, 0, 0, 0], 3000)));
    }

    #[test]
    fn test_parse_origins_skips_blanks() {
        assert_eq!(
            parse_origins(" https://a.example.com, ,https://b.example.com "),
            vec!["https://a.example.com", "https://b.example.com"]
        );
    }

    #[test]
    fn test_origin_allowed_dev_mode() {
        let config = ApiConfig::default();
        assert!(!config.is_production());
        assert!(config.is_origin_allowed("http://localhost:3000"));
    }

    #[test]
    fn test_origin_allowed_production() {
        let config = ApiConfig {
            cors_origins: vec![
                "https://tickets.example.com".to_string(),
                "*.internal.example.com".to_string(),
            ],
            ..ApiConfig::default()
        };

        assert!(config.is_production());
        assert!(config.is_origin_allowed("https://tickets.example.com"));
        assert!(config.is_origin_allowed("https://ops.internal.example.com"));
        assert!(config.is_origin_allowed("https://internal.example.com"));
        assert!(!config.is_origin_allowed("https://evilinternal.example.com"));
        assert!(!config.is_origin_allowed("http://ops.internal.example.com"));
        assert!(!config.is_origin_allowed("https://other.com"));
    }
}
