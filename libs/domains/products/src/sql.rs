//! SeaORM implementation of [`ProductRepository`]

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
    TransactionTrait,
};
use std::collections::HashMap;

use crate::entity::{category, product, product_image, product_variant, seller};
use crate::error::{ProductError, ProductResult};
use crate::models::{
    Category, Condition, NewProduct, Product, ProductDetail, ProductFilter, ProductImage,
    UpdateProduct, money,
};
use crate::repository::ProductRepository;

/// Case-insensitive match of the search pattern against name or description.
///
/// Postgres needs `ILIKE`; SQLite `LIKE` already ignores ASCII case and
/// compares other characters exactly. `!` escapes literal `%` and `_`.
fn search_clause(backend: DbBackend) -> &'static str {
    match backend {
        DbBackend::Postgres => {
            "(products.name ILIKE ? ESCAPE '!' OR products.description ILIKE ? ESCAPE '!')"
        }
        _ => "(products.name LIKE ? ESCAPE '!' OR products.description LIKE ? ESCAPE '!')",
    }
}

/// Product columns plus the joined seller and category display fields
#[derive(Debug, FromQueryResult)]
struct ProductRow {
    id: i32,
    seller_id: i32,
    category_id: Option<i32>,
    name: String,
    description: String,
    price: Decimal,
    compare_at_price: Option<Decimal>,
    condition: Condition,
    size: Option<String>,
    brand: Option<String>,
    stock_quantity: i32,
    is_active: bool,
    is_sold: bool,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
    seller_first_name: Option<String>,
    seller_last_name: Option<String>,
    seller_email: Option<String>,
    category_name: Option<String>,
}

impl ProductRow {
    fn into_product(self, images: Vec<ProductImage>) -> Product {
        Product {
            id: self.id,
            seller_id: self.seller_id,
            category_id: self.category_id,
            name: self.name,
            description: self.description,
            price: money(self.price),
            compare_at_price: self.compare_at_price.map(money),
            condition: self.condition,
            size: self.size,
            brand: self.brand,
            stock_quantity: self.stock_quantity,
            is_active: self.is_active,
            is_sold: self.is_sold,
            created_at: self.created_at.with_timezone(&Utc),
            updated_at: self.updated_at.with_timezone(&Utc),
            seller_name: display_name(self.seller_first_name, self.seller_last_name),
            seller_email: self.seller_email,
            category_name: self.category_name,
            images,
        }
    }
}

/// "First Last" from whichever parts are present.
fn display_name(first: Option<String>, last: Option<String>) -> Option<String> {
    let name = [first, last]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!name.is_empty()).then_some(name)
}

/// Escape LIKE wildcards in `term` and wrap it for a substring match.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '!' | '%' | '_') {
            pattern.push('!');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Products left-joined with their seller and category.
fn select_products() -> Select<product::Entity> {
    product::Entity::find()
        .join(JoinType::LeftJoin, product::Relation::Seller.def())
        .join(JoinType::LeftJoin, product::Relation::Category.def())
        .column_as(seller::Column::FirstName, "seller_first_name")
        .column_as(seller::Column::LastName, "seller_last_name")
        .column_as(seller::Column::Email, "seller_email")
        .column_as(category::Column::Name, "category_name")
}

/// Images of the given products grouped by product id, each list in display order.
async fn load_images<C: ConnectionTrait>(
    db: &C,
    product_ids: &[i32],
) -> ProductResult<HashMap<i32, Vec<ProductImage>>> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let images = product_image::Entity::find()
        .filter(product_image::Column::ProductId.is_in(product_ids.iter().copied()))
        .order_by_asc(product_image::Column::ProductId)
        .order_by_asc(product_image::Column::DisplayOrder)
        .order_by_asc(product_image::Column::Id)
        .all(db)
        .await?;

    let mut grouped: HashMap<i32, Vec<ProductImage>> = HashMap::new();
    for image in images {
        grouped
            .entry(image.product_id)
            .or_default()
            .push(image.into());
    }
    Ok(grouped)
}

async fn ensure_category_exists<C: ConnectionTrait>(db: &C, category_id: i32) -> ProductResult<()> {
    match category::Entity::find_by_id(category_id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(ProductError::UnknownCategory(category_id)),
    }
}

/// Product repository backed by a SeaORM connection pool
#[derive(Clone)]
pub struct SqlProductRepository {
    db: DatabaseConnection,
}

impl SqlProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for SqlProductRepository {
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let mut query = select_products()
            .filter(product::Column::IsActive.eq(true))
            .filter(product::Column::IsSold.eq(false));

        if let Some(category_id) = filter.category_id {
            query = query.filter(product::Column::CategoryId.eq(category_id));
        }

        if let Some(term) = filter.search_term() {
            let pattern = like_pattern(term);
            query = query.filter(Expr::cust_with_values(
                search_clause(self.db.get_database_backend()),
                [pattern.clone(), pattern],
            ));
        }

        let rows = query
            .order_by_desc(product::Column::CreatedAt)
            .order_by_desc(product::Column::Id)
            .limit(filter.limit)
            .offset(filter.offset())
            .into_model::<ProductRow>()
            .all(&self.db)
            .await?;

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let mut images = load_images(&self.db, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let product_images = images.remove(&row.id).unwrap_or_default();
                row.into_product(product_images)
            })
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<ProductDetail>> {
        let Some(row) = select_products()
            .filter(product::Column::Id.eq(id))
            .into_model::<ProductRow>()
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let images = load_images(&self.db, &[id])
            .await?
            .remove(&id)
            .unwrap_or_default();

        let variants = product_variant::Entity::find()
            .filter(product_variant::Column::ProductId.eq(id))
            .order_by_asc(product_variant::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(Some(ProductDetail {
            product: row.into_product(images),
            variants,
        }))
    }

    async fn create(&self, product: NewProduct) -> ProductResult<i32> {
        let txn = self.db.begin().await?;

        ensure_category_exists(&txn, product.category_id).await?;

        let now = Utc::now().fixed_offset();
        let created = product::ActiveModel {
            seller_id: Set(product.seller_id),
            category_id: Set(Some(product.category_id)),
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            compare_at_price: Set(product.compare_at_price),
            condition: Set(product.condition),
            size: Set(product.size),
            brand: Set(product.brand),
            stock_quantity: Set(1),
            is_active: Set(true),
            is_sold: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !product.image_urls.is_empty() {
            let images = product
                .image_urls
                .into_iter()
                .enumerate()
                .map(|(position, url)| product_image::ActiveModel {
                    product_id: Set(created.id),
                    image_url: Set(url),
                    is_primary: Set(position == 0),
                    display_order: Set(position as i32),
                    ..Default::default()
                });
            product_image::Entity::insert_many(images).exec(&txn).await?;
        }

        txn.commit().await?;

        tracing::info!(product_id = created.id, seller_id = created.seller_id, "Created product");
        Ok(created.id)
    }

    async fn update(&self, seller_id: i32, id: i32, changes: UpdateProduct) -> ProductResult<bool> {
        let txn = self.db.begin().await?;

        if let Some(Some(category_id)) = changes.category_id {
            ensure_category_exists(&txn, category_id).await?;
        }

        let mut model = product::ActiveModel {
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        if let Some(category_id) = changes.category_id {
            model.category_id = Set(category_id);
        }
        if let Some(name) = changes.name {
            model.name = Set(name);
        }
        if let Some(description) = changes.description {
            model.description = Set(description);
        }
        if let Some(price) = changes.price {
            model.price = Set(price);
        }
        if let Some(compare_at_price) = changes.compare_at_price {
            model.compare_at_price = Set(compare_at_price);
        }
        if let Some(condition) = changes.condition {
            model.condition = Set(condition);
        }
        if let Some(size) = changes.size {
            model.size = Set(size);
        }
        if let Some(brand) = changes.brand {
            model.brand = Set(brand);
        }
        if let Some(is_active) = changes.is_active {
            model.is_active = Set(is_active);
        }
        if let Some(is_sold) = changes.is_sold {
            model.is_sold = Set(is_sold);
        }

        let result = product::Entity::update_many()
            .set(model)
            .filter(product::Column::Id.eq(id))
            .filter(product::Column::SellerId.eq(seller_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        let updated = result.rows_affected > 0;
        if updated {
            tracing::info!(product_id = id, seller_id, "Updated product");
        }
        Ok(updated)
    }

    async fn delete(&self, seller_id: i32, id: i32) -> ProductResult<bool> {
        let result = product::Entity::delete_many()
            .filter(product::Column::Id.eq(id))
            .filter(product::Column::SellerId.eq(seller_id))
            .exec(&self.db)
            .await?;

        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(product_id = id, seller_id, "Deleted product");
        }
        Ok(deleted)
    }

    async fn list_categories(&self) -> ProductResult<Vec<Category>> {
        let categories = category::Entity::find()
            .filter(category::Column::IsActive.eq(true))
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;

        Ok(categories.into_iter().map(Into::into).collect())
    }
}
