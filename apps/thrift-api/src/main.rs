//! Thrift API - second-hand clothing marketplace REST server

use axum_helpers::server::create_production_app;
use axum_helpers::JwtAuth;
use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::sql::{connect_with_retry, run_migrations};
use database::RetryConfig;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod seed;
mod state;

use config::Config;
use state::AppState;

#[derive(Parser)]
#[command(name = "thrift-api")]
#[command(about = "Marketplace API for second-hand clothing listings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Replace the demo sellers and listings
    Seed,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = connect_with_retry(config.database.clone(), RetryConfig::default()).await?;
    run_migrations::<migration::Migrator>(&db, "thrift-api").await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Seed => {
            let summary = seed::seed_demo_data(&db).await?;
            info!(
                sellers = summary.sellers,
                products = summary.products,
                "Seed finished, demo password is {}",
                seed::DEMO_PASSWORD
            );
            db.close().await?;
            Ok(())
        }
        Commands::Serve => serve(config, db).await,
    }
}

async fn serve(config: Config, db: sea_orm::DatabaseConnection) -> eyre::Result<()> {
    let state = AppState {
        jwt_auth: JwtAuth::new(&config.jwt),
        config: config.clone(),
        db,
    };

    let app = api::app(&state);

    info!(
        "Starting {} v{} on port {}",
        config.app.name, config.app.version, config.server.port
    );

    let db = state.db.clone();
    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connections");
        if let Err(e) = db.close().await {
            tracing::error!("Failed to close database: {}", e);
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Thrift API shutdown complete");
    Ok(())
}
