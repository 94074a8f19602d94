//! Database connection helpers built on SeaORM.
//!
//! # Features
//!
//! - `config` (default) - `core_config::FromEnv` support for [`sql::DatabaseConfig`]
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::{RetryConfig, sql};
//! use migration::Migrator;
//!
//! let config = sql::DatabaseConfig::from_env()?;
//! let db = sql::connect_with_retry(config, RetryConfig::default()).await?;
//! sql::run_migrations::<Migrator>(&db, "thrift-api").await?;
//! ```

pub mod common;
pub mod sql;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
