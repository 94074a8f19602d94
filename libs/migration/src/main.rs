//! Standalone migration CLI (`up`, `down`, `status`, `fresh`, ...).
//!
//! Reads `DATABASE_URL`. The API server also applies pending migrations on
//! startup, so this is only needed for manual schema work.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
