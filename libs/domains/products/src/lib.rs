//! Products Domain
//!
//! The marketplace catalog: listing, search and ownership-scoped writes over
//! products, their images and variants, plus the category list.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /products and /categories endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Normalization, business rules, owner checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + SeaORM implementation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use domain_products::{ProductService, SqlProductRepository, handlers};
//! use std::sync::Arc;
//!
//! let service = Arc::new(ProductService::new(SqlProductRepository::new(db.clone())));
//!
//! let products = handlers::router(service.clone(), jwt_auth.clone());
//! let categories = handlers::categories_router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sql;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    Category, Condition, CreateProduct, NewProduct, Product, ProductDetail, ProductFilter,
    ProductImage, ProductVariant, UpdateProduct, money,
};
pub use repository::ProductRepository;
pub use service::ProductService;
pub use sql::SqlProductRepository;
