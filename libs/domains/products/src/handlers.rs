//! HTTP handlers for the product catalog

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, AuthUser, IdPath, JwtAuth, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    optional_jwt_auth_middleware,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    Category, CategoryListResponse, Condition, CreateProduct, MessageResponse, Product,
    ProductCreatedResponse, ProductDetail, ProductFilter, ProductImage, ProductListResponse,
    ProductVariant, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the catalog endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        list_categories,
    ),
    components(
        schemas(
            Product, ProductDetail, ProductImage, ProductVariant, Condition,
            CreateProduct, UpdateProduct, ProductFilter, Category,
            ProductListResponse, CategoryListResponse, ProductCreatedResponse,
            MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Marketplace listings"),
        (name = "Categories", description = "Product categories")
    )
)]
pub struct ApiDoc;

/// Create the products router
///
/// Every route runs under the optional JWT middleware; writes then demand a
/// caller through [`AuthUser`].
pub fn router<R: ProductRepository + 'static>(
    service: Arc<ProductService<R>>,
    jwt_auth: JwtAuth,
) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .layer(middleware::from_fn_with_state(
            jwt_auth,
            optional_jwt_auth_middleware,
        ))
        .with_state(service)
}

/// Create the categories router
pub fn categories_router<R: ProductRepository + 'static>(
    service: Arc<ProductService<R>>,
) -> Router {
    Router::new()
        .route("/", get(list_categories))
        .with_state(service)
}

/// List active, unsold products, newest first
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "One page of products", body = ProductListResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(filter): ValidatedQuery<ProductFilter>,
) -> ProductResult<Json<ProductListResponse>> {
    let products = service.list_products(filter).await?;
    Ok(Json(ProductListResponse { products }))
}

/// Create a new listing owned by the caller
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductCreatedResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<impl IntoResponse, AppError> {
    let seller_id: i32 = auth.user_id()?;
    let product_id = service.create_product(seller_id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductCreatedResponse {
            message: "Product created successfully".to_string(),
            product_id,
        }),
    ))
}

/// Get a product with its images and variants
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductDetail),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<ProductDetail>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Partially update a product the caller owns
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> Result<Json<MessageResponse>, AppError> {
    let seller_id: i32 = auth.user_id()?;
    service.update_product(seller_id, id, input).await?;

    Ok(Json(MessageResponse {
        message: "Product updated successfully".to_string(),
    }))
}

/// Delete a product the caller owns
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, AppError> {
    let seller_id: i32 = auth.user_id()?;
    service.delete_product(seller_id, id).await?;

    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}

/// List active categories ordered by name
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All active categories", body = CategoryListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<CategoryListResponse>> {
    let categories = service.list_categories().await?;
    Ok(Json(CategoryListResponse { categories }))
}
