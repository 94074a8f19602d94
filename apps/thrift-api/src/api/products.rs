//! Catalog routes

use axum::Router;
use domain_products::{handlers, ProductService, SqlProductRepository};
use std::sync::Arc;

use crate::state::AppState;

/// Products and categories routers sharing one service
pub fn routers(state: &AppState) -> (Router, Router) {
    let repository = SqlProductRepository::new(state.db.clone());
    let service = Arc::new(ProductService::new(repository));

    (
        handlers::router(service.clone(), state.jwt_auth.clone()),
        handlers::categories_router(service),
    )
}
