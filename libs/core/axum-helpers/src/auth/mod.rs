//! Authentication module.
//!
//! This module provides:
//! - Stateless HS256 JWT creation and verification
//! - Middleware that attaches verified claims to the request
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, optional_jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let routes = Router::new()
//!     .route("/products", get(list).post(create))
//!     .layer(axum::middleware::from_fn_with_state(auth, optional_jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims};
pub use middleware::{jwt_auth_middleware, optional_jwt_auth_middleware};
