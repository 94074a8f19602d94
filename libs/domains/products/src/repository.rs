use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{Category, NewProduct, Product, ProductDetail, ProductFilter, UpdateProduct};

/// Repository trait for catalog persistence
///
/// Writes are scoped to the owning seller: `update` and `delete` touch a row
/// only when both the id and the seller match, and report `false` otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// One page of active, unsold products, newest first (ties by id, descending)
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Any product by id, including inactive and sold ones
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<ProductDetail>>;

    /// Insert the product and its images in one transaction, returning the new id
    async fn create(&self, product: NewProduct) -> ProductResult<i32>;

    async fn update(&self, seller_id: i32, id: i32, changes: UpdateProduct) -> ProductResult<bool>;

    async fn delete(&self, seller_id: i32, id: i32) -> ProductResult<bool>;

    /// Active categories ordered by name
    async fn list_categories(&self) -> ProductResult<Vec<Category>>;
}
