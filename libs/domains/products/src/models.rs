use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;
pub const MAX_IMAGES: u64 = 10;
pub const MAX_IMAGE_URL_LEN: u64 = 2048;
pub const MAX_NAME_LEN: u64 = 255;
pub const MAX_DESCRIPTION_LEN: u64 = 5000;
pub const MAX_LABEL_LEN: u64 = 100;
/// Highest page whose offset still fits a signed 64-bit SQL bind
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PAGE_SIZE + 1;
/// Prices are stored as `DECIMAL(10, 2)`
pub const PRICE_SCALE: u32 = 2;

/// Largest amount a `DECIMAL(10, 2)` column holds
pub fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, PRICE_SCALE)
}

/// Reason `amount` cannot be stored as a price, if any.
///
/// `allow_zero` admits a zero amount (compare-at prices).
pub fn price_error(amount: Decimal, allow_zero: bool) -> Option<&'static str> {
    if amount < Decimal::ZERO {
        Some("must not be negative")
    } else if amount.is_zero() && !allow_zero {
        Some("must be greater than 0")
    } else if amount.normalize().scale() > PRICE_SCALE {
        Some("must have at most 2 decimal places")
    } else if amount > max_price() {
        Some("must not exceed 99999999.99")
    } else {
        None
    }
}

/// Amount with exactly two decimal places, as stored
pub fn money(mut amount: Decimal) -> Decimal {
    amount.rescale(PRICE_SCALE);
    amount
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    match price_error(*price, false) {
        Some(message) => Err(ValidationError::new("range").with_message(message.into())),
        None => Ok(()),
    }
}

fn validate_compare_at_price(price: &Decimal) -> Result<(), ValidationError> {
    match price_error(*price, true) {
        Some(message) => Err(ValidationError::new("range").with_message(message.into())),
        None => Ok(()),
    }
}

/// Condition of a second-hand item
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Condition {
    #[sea_orm(string_value = "new")]
    New,
    #[sea_orm(string_value = "like_new")]
    LikeNew,
    #[default]
    #[sea_orm(string_value = "good")]
    Good,
    #[sea_orm(string_value = "fair")]
    Fair,
    #[sea_orm(string_value = "poor")]
    Poor,
}

/// Product image, ordered by `displayOrder`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: i32,
    pub url: String,
    /// The first image of a listing is flagged primary
    pub is_primary: bool,
    pub display_order: i32,
}

/// Size/colour style option of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductVariant {
    pub id: i32,
    pub name: String,
    pub value: String,
    pub price_adjustment: Decimal,
    pub stock_quantity: i32,
    pub sku: Option<String>,
}

/// Product listing as returned by the catalog
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub seller_id: i32,
    pub category_id: Option<i32>,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Original retail price, shown struck through
    pub compare_at_price: Option<Decimal>,
    pub condition: Condition,
    pub size: Option<String>,
    pub brand: Option<String>,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub is_sold: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// "First Last" of the owning seller; `null` if the seller row is gone
    pub seller_name: Option<String>,
    pub seller_email: Option<String>,
    /// `null` when the product has no category or it was deleted
    pub category_name: Option<String>,
    pub images: Vec<ProductImage>,
}

/// Single product with its variants
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub variants: Vec<ProductVariant>,
}

/// Request body for creating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub category_id: i32,
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    pub name: String,
    #[validate(length(min = 1, max = MAX_DESCRIPTION_LEN))]
    pub description: String,
    /// Up to two decimal places
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(custom(function = "validate_compare_at_price"))]
    pub compare_at_price: Option<Decimal>,
    /// Defaults to `good`
    pub condition: Option<Condition>,
    #[validate(length(max = MAX_LABEL_LEN))]
    pub size: Option<String>,
    #[validate(length(max = MAX_LABEL_LEN))]
    pub brand: Option<String>,
    /// Image URLs; the first becomes the primary image
    #[serde(default)]
    #[validate(length(max = MAX_IMAGES))]
    pub images: Vec<String>,
}

/// Request body for a partial update
///
/// Omitted fields keep their stored value. Nullable columns accept an
/// explicit `null` to clear them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>, nullable)]
    pub category_id: Option<Option<i32>>,
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = MAX_DESCRIPTION_LEN))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub compare_at_price: Option<Option<Decimal>>,
    pub condition: Option<Condition>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub size: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub brand: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_sold: Option<bool>,
}

/// Distinguishes a field sent as `null` (`Some(None)`) from one left out (`None`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query parameters for listing products
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Exact category match
    pub category_id: Option<i32>,
    /// Case-insensitive substring of name or description
    pub search: Option<String>,
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1, max = MAX_PAGE))]
    pub page: u64,
    /// Page size
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = MAX_PAGE_SIZE))]
    pub limit: u64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category_id: None,
            search: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl ProductFilter {
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Search term with surrounding whitespace removed; blank means no search.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Validated, trimmed fields for inserting a product
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub seller_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
    pub condition: Condition,
    pub size: Option<String>,
    pub brand: Option<String>,
    pub image_urls: Vec<String>,
}

/// Product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreatedResponse {
    pub message: String,
    pub product_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;
    use serde_json::json;

    fn amount(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_condition_column_values() {
        assert_eq!(Condition::LikeNew.to_value(), "like_new");
        assert_eq!(
            Condition::try_from_value(&"fair".to_string()).unwrap(),
            Condition::Fair
        );
        assert!(Condition::try_from_value(&"mint".to_string()).is_err());
    }

    #[test]
    fn test_condition_wire_names() {
        assert_eq!(
            serde_json::to_value(Condition::LikeNew).unwrap(),
            json!("like_new")
        );
        assert_eq!("poor".parse::<Condition>().unwrap(), Condition::Poor);
        assert_eq!(Condition::default(), Condition::Good);
    }

    #[test]
    fn test_update_distinguishes_null_from_missing() {
        let update: UpdateProduct =
            serde_json::from_value(json!({ "compareAtPrice": null, "price": 12.5 })).unwrap();

        assert_eq!(update.compare_at_price, Some(None));
        assert_eq!(update.price, Some(amount("12.5")));
        assert_eq!(update.size, None);
        assert_eq!(update.category_id, None);

        let update: UpdateProduct =
            serde_json::from_value(json!({ "compareAtPrice": 40.0 })).unwrap();
        assert_eq!(update.compare_at_price, Some(Some(amount("40"))));
    }

    #[test]
    fn test_create_product_accepts_camel_case() {
        let create: CreateProduct = serde_json::from_value(json!({
            "categoryId": 1,
            "name": "Test Shirt",
            "description": "Soft cotton",
            "price": 10.0,
            "compareAtPrice": 25.0,
            "condition": "like_new",
            "images": ["a.jpg", "b.jpg"]
        }))
        .unwrap();

        assert_eq!(create.category_id, 1);
        assert_eq!(create.condition, Some(Condition::LikeNew));
        assert_eq!(create.images, vec!["a.jpg", "b.jpg"]);
        assert_eq!(create.price, amount("10"));
        assert!(create.validate().is_ok());
    }

    #[test]
    fn test_price_rules() {
        assert_eq!(price_error(amount("0.01"), false), None);
        assert_eq!(price_error(amount("99999999.99"), false), None);
        assert_eq!(price_error(amount("12.50"), false), None);
        assert_eq!(price_error(amount("12.500"), false), None);
        assert_eq!(price_error(amount("0"), true), None);

        assert!(price_error(amount("0"), false).is_some());
        assert!(price_error(amount("-1"), true).is_some());
        assert!(price_error(amount("0.001"), false).is_some());
        assert!(price_error(amount("100000000"), false).is_some());
    }

    #[test]
    fn test_prices_serialize_with_two_decimals() {
        assert_eq!(money(amount("10.5")).to_string(), "10.50");
        assert_eq!(
            serde_json::to_value(money(amount("45"))).unwrap(),
            json!("45.00")
        );
    }

    #[test]
    fn test_create_product_rejects_sub_cent_price() {
        let create: CreateProduct = serde_json::from_value(json!({
            "categoryId": 1,
            "name": "Test Shirt",
            "description": "Soft cotton",
            "price": 0.001
        }))
        .unwrap();

        let errors = create.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_create_product_rejects_non_positive_price() {
        let create: CreateProduct = serde_json::from_value(json!({
            "categoryId": 1,
            "name": "Test Shirt",
            "description": "Soft cotton",
            "price": 0.0
        }))
        .unwrap();

        let errors = create.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_filter_defaults_and_offset() {
        let filter: ProductFilter = serde_json::from_value(json!({})).unwrap();
        assert_eq!(filter, ProductFilter::default());
        assert_eq!(filter.offset(), 0);

        let filter = ProductFilter {
            page: 2,
            limit: 10,
            ..Default::default()
        };
        assert_eq!(filter.offset(), 10);
    }

    #[test]
    fn test_filter_page_upper_bound() {
        let last = ProductFilter {
            page: MAX_PAGE,
            limit: MAX_PAGE_SIZE,
            ..Default::default()
        };
        assert!(last.validate().is_ok());
        assert!(last.offset() <= i64::MAX as u64);

        let beyond = ProductFilter {
            page: MAX_PAGE + 1,
            ..Default::default()
        };
        assert!(beyond.validate().is_err());

        let huge = ProductFilter {
            page: u64::MAX,
            limit: MAX_PAGE_SIZE,
            ..Default::default()
        };
        assert!(huge.validate().is_err());
        assert_eq!(huge.offset(), u64::MAX);
    }

    #[test]
    fn test_filter_limit_bounds() {
        let too_big = ProductFilter {
            limit: MAX_PAGE_SIZE + 1,
            ..Default::default()
        };
        assert!(too_big.validate().is_err());

        let zero_page = ProductFilter {
            page: 0,
            ..Default::default()
        };
        assert!(zero_page.validate().is_err());
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = ProductFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_term(), None);

        let filter = ProductFilter {
            search: Some("  Denim ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_term(), Some("Denim"));
    }

    #[test]
    fn test_detail_flattens_product_fields() {
        let product = Product {
            id: 3,
            seller_id: 1,
            category_id: None,
            name: "Jacket".to_string(),
            description: "Denim".to_string(),
            price: amount("30.00"),
            compare_at_price: None,
            condition: Condition::Fair,
            size: Some("M".to_string()),
            brand: None,
            stock_quantity: 1,
            is_active: true,
            is_sold: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            seller_name: Some("Emma Chen".to_string()),
            seller_email: Some("emma@thrift.ivy".to_string()),
            category_name: None,
            images: vec![ProductImage {
                id: 1,
                url: "a.jpg".to_string(),
                is_primary: true,
                display_order: 0,
            }],
        };

        let json = serde_json::to_value(ProductDetail {
            product,
            variants: vec![],
        })
        .unwrap();

        assert_eq!(json["seller_name"], "Emma Chen");
        assert_eq!(json["price"], "30.00");
        assert_eq!(json["category_name"], serde_json::Value::Null);
        assert_eq!(json["images"][0]["isPrimary"], true);
        assert_eq!(json["images"][0]["displayOrder"], 0);
        assert!(json["variants"].as_array().unwrap().is_empty());
    }
}
