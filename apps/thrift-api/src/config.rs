//! Configuration for the Thrift API

use axum_helpers::{CorsConfig, JwtConfig};
use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use database::sql::DatabaseConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            cors: CorsConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
