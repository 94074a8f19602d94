//! SeaORM entities for the catalog tables
//!
//! `seller` is a read-only projection of the `users` table holding only the
//! columns the catalog displays.

pub mod category;
pub mod product;
pub mod product_image;
pub mod product_variant;
pub mod seller;
