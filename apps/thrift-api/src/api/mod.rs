//! API routes module

pub mod auth;
pub mod health;
pub mod products;

use axum::{routing::get, Router};
use axum_helpers::server::{create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Full HTTP application: documented API under `/api` plus `/health` and `/ready`
pub fn app(state: &AppState) -> Router {
    create_router::<ApiDoc>(routes(state), &state.config.cors)
        .merge(health_router(state.config.app.clone()))
        .merge(ready_router(state.clone()))
}

/// Create all API routes, mounted under `/api` by `create_router`
pub fn routes(state: &AppState) -> Router {
    let (products, categories) = products::routers(state);

    Router::new()
        .nest("/products", products)
        .nest("/categories", categories)
        .nest("/auth", auth::router(state))
}

/// Readiness endpoint, merged at the root next to `/health`
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
