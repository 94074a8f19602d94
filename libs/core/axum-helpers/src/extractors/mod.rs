//! Custom extractors for Axum handlers.
//!
//! Every extractor here rejects with [`AppError`](crate::errors::AppError), so
//! malformed input renders the same `{ "error": ... }` body as domain errors.

pub mod auth_user;
pub mod id_path;
pub mod validated_json;
pub mod validated_query;

pub use auth_user::AuthUser;
pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
