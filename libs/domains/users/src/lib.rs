//! Users Domain
//!
//! Marketplace accounts: registration, login and the caller's profile.
//!
//! # Features
//!
//! - Argon2 password hashing
//! - Lowercased, unique emails
//! - `customer` / `seller` roles chosen at sign-up
//! - HS256 tokens issued through [`axum_helpers::JwtAuth`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /auth endpoints, token issuance
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Normalization, password hashing, credential checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + SeaORM implementation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs, Role
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use domain_users::{SqlUserRepository, UserService, handlers};
//!
//! let service = UserService::new(SqlUserRepository::new(db.clone()));
//! let router = handlers::router(service, jwt_auth);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sql;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    AuthResponse, LoginRequest, NewUser, ProfileResponse, RegisterRequest, Role, User,
    UserResponse,
};
pub use repository::UserRepository;
pub use service::{UserService, hash_password};
pub use sql::SqlUserRepository;
