use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::DatabaseConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Connect with explicit connection options.
///
/// # Example
/// ```ignore
/// use database::sql::{ConnectOptions, connect};
///
/// let mut opt = ConnectOptions::new("sqlite::memory:");
/// opt.max_connections(1);
/// let db = connect(opt).await?;
/// ```
pub async fn connect(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!(backend = ?db.get_database_backend(), "Connected to database");
    Ok(db)
}

/// Connect using a [`DatabaseConfig`].
pub async fn connect_from_config(config: DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    connect(config.into_connect_options()).await
}

/// Connect with exponential backoff, for databases that start alongside the service.
///
/// # Example
/// ```ignore
/// let config = DatabaseConfig::from_env()?;
/// let db = connect_with_retry(config, RetryConfig::new().with_max_retries(5)).await?;
/// ```
pub async fn connect_with_retry(
    config: DatabaseConfig,
    retry_config: RetryConfig,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();
    retry_with_backoff(|| connect(options.clone()), retry_config).await
}

/// Apply all pending migrations of `M`.
///
/// # Example
/// ```ignore
/// use migration::Migrator;
///
/// run_migrations::<Migrator>(&db, "thrift-api").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}
