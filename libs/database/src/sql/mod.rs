//! SeaORM connection management, migration running, and health checks.
//!
//! Works with any backend SeaORM was compiled for. The service runs on
//! PostgreSQL; tests use in-memory SQLite.

mod config;
mod connector;
mod health;

pub use config::DatabaseConfig;
pub use connector::{connect, connect_from_config, connect_with_retry, run_migrations};
pub use health::check_health;

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
