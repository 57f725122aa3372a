use std::env;

use photomap_core::config::LayeredConfig;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 64;

const BYTES_PER_MB: usize = 1024 * 1024;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub max_upload_mb: usize,
    /// Pipeline and map settings (`PHOTOMAP_*` variables)
    pub photomap: LayeredConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            photomap: LayeredConfig::with_defaults(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (environment-shaped)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PHOTOMAP_PORT").and_then(|p| p.parse().ok()).unwrap_or(DEFAULT_PORT);

        let cors_origin =
            lookup("PHOTOMAP_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let max_upload_mb = match lookup("PHOTOMAP_MAX_UPLOAD_MB") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(mb) if mb > 0 && mb.checked_mul(BYTES_PER_MB).is_some() => mb,
                _ => {
                    tracing::warn!(
                        "Invalid PHOTOMAP_MAX_UPLOAD_MB value '{}': using default {}",
                        raw,
                        DEFAULT_MAX_UPLOAD_MB
                    );
                    DEFAULT_MAX_UPLOAD_MB
                }
            },
            None => DEFAULT_MAX_UPLOAD_MB,
        };

        let photomap = LayeredConfig::with_defaults().load_from_lookup(&lookup);

        Self {
            port,
            cors_origin,
            max_upload_mb,
            photomap,
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Request body limit for uploads
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(BYTES_PER_MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(|_| None);
        assert_eq!(config.port, 3001);
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.max_upload_bytes(), 64 * 1024 * 1024);
        assert_eq!(config.bind_address(), "0.0.0.0:3001");
    }

    #[test]
    fn test_env_values() {
        let vars: HashMap<&str, &str> = [
            ("PHOTOMAP_PORT", "8080"),
            ("PHOTOMAP_MAX_UPLOAD_MB", "0"),
            ("PHOTOMAP_MAX_CONCURRENCY", "3"),
        ]
        .into_iter()
        .collect();

        let config = ApiConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.port, 8080);
        // Zero is rejected
        assert_eq!(config.max_upload_mb, 64);
        assert_eq!(config.photomap.max_concurrency.value, 3);
    }

    #[test]
    fn test_oversized_upload_limit_falls_back() {
        let config = ApiConfig::from_lookup(|key| {
            (key == "PHOTOMAP_MAX_UPLOAD_MB").then(|| "100000000000000".to_string())
        });
        assert_eq!(config.max_upload_mb, DEFAULT_MAX_UPLOAD_MB);
        assert_eq!(config.max_upload_bytes(), 64 * 1024 * 1024);

        let config = ApiConfig {
            max_upload_mb: usize::MAX,
            ..ApiConfig::default()
        };
        assert_eq!(config.max_upload_bytes(), usize::MAX);
    }
}
