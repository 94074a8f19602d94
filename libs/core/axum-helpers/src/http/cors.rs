use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, FromEnv};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Allowed browser origins.
///
/// An empty list means any origin is accepted. Credentials are only allowed
/// with an explicit list, because browsers reject `*` combined with
/// credentials.
#[derive(Clone, Debug, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<HeaderValue>,
}

impl CorsConfig {
    pub fn any_origin() -> Self {
        Self::default()
    }

    /// Parse a comma-separated origin list. `*` or an empty value allows any origin.
    pub fn parse(origins: &str) -> Result<Self, ConfigError> {
        let trimmed = origins.trim();
        if trimmed.is_empty() || trimmed == "*" {
            return Ok(Self::any_origin());
        }

        let allowed_origins = trimmed
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(HeaderValue::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: e.to_string(),
            })?;

        Ok(Self { allowed_origins })
    }

    pub fn is_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

impl FromEnv for CorsConfig {
    /// Reads `CORS_ALLOWED_ORIGIN`, falling back to `FRONTEND_URL`.
    fn from_env() -> Result<Self, ConfigError> {
        let origins = std::env::var("CORS_ALLOWED_ORIGIN")
            .or_else(|_| std::env::var("FRONTEND_URL"))
            .unwrap_or_default();

        Self::parse(&origins)
    }
}

const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
];

/// Creates a CORS layer for the API.
///
/// - Methods: GET, POST, PUT, DELETE, PATCH, OPTIONS
/// - Headers: Content-Type, Authorization, Accept, Cookie
/// - Max age: 1 hour
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(ALLOWED_METHODS)
        .max_age(Duration::from_secs(3600));

    if config.is_any_origin() {
        tracing::info!("CORS configured to allow any origin");
        return layer.allow_origin(Any).allow_headers(Any);
    }

    tracing::info!(origins = ?config.allowed_origins, "CORS configured with allowed origins");
    layer
        .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::COOKIE,
        ])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wildcard() {
        assert!(CorsConfig::parse("*").unwrap().is_any_origin());
        assert!(CorsConfig::parse("").unwrap().is_any_origin());
    }

    #[test]
    fn test_parse_origin_list() {
        let config = CorsConfig::parse("http://localhost:8081, https://thrift.example.com").unwrap();
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.allowed_origins[1], "https://thrift.example.com");
    }

    #[test]
    fn test_from_env_falls_back_to_frontend_url() {
        temp_env::with_vars(
            [
                ("CORS_ALLOWED_ORIGIN", None),
                ("FRONTEND_URL", Some("http://localhost:19006")),
            ],
            || {
                let config = CorsConfig::from_env().unwrap();
                assert_eq!(config.allowed_origins, vec!["http://localhost:19006"]);
            },
        );
    }

    #[test]
    fn test_from_env_defaults_to_any_origin() {
        temp_env::with_vars_unset(["CORS_ALLOWED_ORIGIN", "FRONTEND_URL"], || {
            assert!(CorsConfig::from_env().unwrap().is_any_origin());
        });
    }

    #[test]
    fn test_layers_build_for_both_modes() {
        let _ = create_cors_layer(&CorsConfig::any_origin());
        let _ = create_cors_layer(&CorsConfig::parse("http://localhost:3000").unwrap());
    }
}
