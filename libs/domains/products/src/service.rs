//! Product Service - Business logic layer

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    Category, CreateProduct, MAX_IMAGE_URL_LEN, MAX_IMAGES, NewProduct, Product, ProductDetail,
    ProductFilter, UpdateProduct, money, price_error,
};
use crate::repository::ProductRepository;

/// Product service providing the catalog's query and command operations
///
/// Input that passed the request validators is normalized here (trimmed,
/// blank optional strings dropped) and checked for the rules the derive
/// attributes cannot express.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List active, unsold products
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter).await
    }

    /// Get a product by ID, including inactive and sold ones
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<ProductDetail> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a listing owned by `seller_id` and return its id
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, seller_id: i32, input: CreateProduct) -> ProductResult<i32> {
        let name = required_text("name", &input.name)?;
        let description = required_text("description", &input.description)?;
        check_price(input.price)?;
        if let Some(compare_at_price) = input.compare_at_price {
            check_compare_at_price(compare_at_price)?;
        }
        check_images(&input.images)?;

        self.repository
            .create(NewProduct {
                seller_id,
                category_id: input.category_id,
                name,
                description,
                price: money(input.price),
                compare_at_price: input.compare_at_price.map(money),
                condition: input.condition.unwrap_or_default(),
                size: optional_text(input.size),
                brand: optional_text(input.brand),
                image_urls: input.images.into_iter().map(|url| url.trim().to_string()).collect(),
            })
            .await
    }

    /// Apply a partial update to a product the caller owns
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        seller_id: i32,
        id: i32,
        input: UpdateProduct,
    ) -> ProductResult<()> {
        let changes = normalize_update(input)?;

        if self.repository.update(seller_id, id, changes).await? {
            Ok(())
        } else {
            Err(ProductError::NotFoundOrUnauthorized)
        }
    }

    /// Delete a product the caller owns, with its images and variants
    #[instrument(skip(self))]
    pub async fn delete_product(&self, seller_id: i32, id: i32) -> ProductResult<()> {
        if self.repository.delete(seller_id, id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFoundOrUnauthorized)
        }
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> ProductResult<Vec<Category>> {
        self.repository.list_categories().await
    }
}

// Validation helpers

fn required_text(field: &str, value: &str) -> ProductResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProductError::Validation(format!("{} must not be blank", field)));
    }
    Ok(trimmed.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_price(price: Decimal) -> ProductResult<()> {
    match price_error(price, false) {
        Some(reason) => Err(ProductError::Validation(format!("price {}", reason))),
        None => Ok(()),
    }
}

fn check_compare_at_price(price: Decimal) -> ProductResult<()> {
    match price_error(price, true) {
        Some(reason) => Err(ProductError::Validation(format!(
            "compareAtPrice {}",
            reason
        ))),
        None => Ok(()),
    }
}

fn check_images(urls: &[String]) -> ProductResult<()> {
    if urls.len() as u64 > MAX_IMAGES {
        return Err(ProductError::Validation(format!(
            "at most {} images are allowed",
            MAX_IMAGES
        )));
    }
    for url in urls {
        let len = url.trim().len() as u64;
        if len == 0 || len > MAX_IMAGE_URL_LEN {
            return Err(ProductError::Validation(format!(
                "image URLs must be 1-{} characters",
                MAX_IMAGE_URL_LEN
            )));
        }
    }
    Ok(())
}

fn normalize_update(input: UpdateProduct) -> ProductResult<UpdateProduct> {
    if let Some(price) = input.price {
        check_price(price)?;
    }
    if let Some(Some(compare_at_price)) = input.compare_at_price {
        check_compare_at_price(compare_at_price)?;
    }

    Ok(UpdateProduct {
        name: input
            .name
            .as_deref()
            .map(|name| required_text("name", name))
            .transpose()?,
        description: input
            .description
            .as_deref()
            .map(|description| required_text("description", description))
            .transpose()?,
        price: input.price.map(money),
        compare_at_price: input.compare_at_price.map(|price| price.map(money)),
        size: input.size.map(optional_text),
        brand: input.brand.map(optional_text),
        ..input
    })
}
