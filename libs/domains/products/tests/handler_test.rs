//! Handler tests for the catalog endpoints
//!
//! These drive the products and categories routers with `oneshot` and check
//! status codes, wire casing and the auth requirements of each route.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use axum_helpers::{JwtAuth, JwtConfig};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use test_utils::{TestDataBuilder, TestDatabase};
use tower::ServiceExt;

const SECRET: &str = "test-secret-key-that-is-at-least-32-characters";

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

struct TestApp {
    _db: TestDatabase,
    products: Router,
    categories: Router,
    jwt_auth: JwtAuth,
    seller: i32,
    other_seller: i32,
}

impl TestApp {
    async fn new(test_name: &str) -> Self {
        let db = TestDatabase::new().await;
        let builder = TestDataBuilder::from_test_name(test_name);
        let seller = db.create_test_user(&builder.email("seller")).await;
        let other_seller = db.create_test_user(&builder.email("other")).await;

        let jwt_auth = JwtAuth::new(&JwtConfig::new(SECRET).unwrap());
        let service = Arc::new(ProductService::new(SqlProductRepository::new(
            db.connection(),
        )));

        Self {
            products: handlers::router(service.clone(), jwt_auth.clone()),
            categories: handlers::categories_router(service),
            _db: db,
            jwt_auth,
            seller,
            other_seller,
        }
    }

    fn token(&self, user_id: i32) -> String {
        self.jwt_auth
            .create_token(
                &user_id.to_string(),
                "seller@example.com",
                "Test Seller",
                &["seller".to_string()],
            )
            .unwrap()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.products.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, json_body(response.into_body()).await)
    }

    async fn create(&self, user_id: i32, body: Value) -> i32 {
        let (status, body) = self
            .send(with_json(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("authorization", format!("Bearer {}", self.token(user_id))),
                body,
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["productId"].as_i64().unwrap() as i32
    }
}

fn with_json(builder: axum::http::request::Builder, body: Value) -> Request<Body> {
    builder
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn shirt() -> Value {
    json!({
        "categoryId": 1,
        "name": "Test Shirt",
        "description": "Soft cotton tee",
        "price": 10.0,
        "images": ["a.jpg", "b.jpg"]
    })
}

#[tokio::test]
async fn test_create_then_get_product() {
    let app = TestApp::new("handler_create_then_get").await;
    let id = app.create(app.seller, shirt()).await;

    let (status, body) = app.send(get(&format!("/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Test Shirt");
    assert_eq!(body["price"], "10.00");
    assert_eq!(body["condition"], "good");
    assert_eq!(body["seller_id"], app.seller);
    assert_eq!(body["category_name"], "Tops");
    assert_eq!(body["compare_at_price"], Value::Null);
    assert_eq!(body["images"][0]["url"], "a.jpg");
    assert_eq!(body["images"][0]["isPrimary"], true);
    assert_eq!(body["images"][1]["url"], "b.jpg");
    assert_eq!(body["images"][1]["isPrimary"], false);
    assert_eq!(body["variants"], json!([]));
}

#[tokio::test]
async fn test_create_returns_message_and_id() {
    let app = TestApp::new("handler_create_message").await;

    let (status, body) = app
        .send(with_json(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("authorization", format!("Bearer {}", app.token(app.seller))),
            shirt(),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Product created successfully");
    assert!(body["productId"].is_i64());
}

#[tokio::test]
async fn test_create_requires_token() {
    let app = TestApp::new("handler_create_no_token").await;

    let (status, body) = app
        .send(with_json(Request::builder().method("POST").uri("/"), shirt()))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Access token required");
}

#[tokio::test]
async fn test_create_validation_errors_return_400() {
    let app = TestApp::new("handler_create_invalid").await;
    let auth = format!("Bearer {}", app.token(app.seller));

    let cases = [
        json!({ "categoryId": 1, "name": "Shirt", "description": "Tee", "price": 0 }),
        json!({ "categoryId": 1, "name": "Shirt", "description": "Tee", "price": 0.001 }),
        json!({ "categoryId": 1, "name": "Shirt", "description": "Tee", "price": 100000000 }),
        json!({ "categoryId": 1, "name": "Shirt", "description": "Tee", "price": 5, "compareAtPrice": 9.999 }),
        json!({ "categoryId": 1, "name": "", "description": "Tee", "price": 5 }),
        json!({ "categoryId": 1, "name": "Shirt", "description": "Tee", "price": 5, "condition": "mint" }),
        json!({ "name": "Shirt", "description": "Tee", "price": 5 }),
        json!({ "categoryId": 999, "name": "Shirt", "description": "Tee", "price": 5 }),
    ];

    for case in cases {
        let (status, body) = app
            .send(with_json(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("authorization", auth.as_str()),
                case.clone(),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", case);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_list_products_with_filters() {
    let app = TestApp::new("handler_list").await;

    app.create(app.seller, shirt()).await;
    app.create(
        app.seller,
        json!({
            "categoryId": 2,
            "name": "Wide Leg Trousers",
            "description": "Linen blend",
            "price": 22.0
        }),
    )
    .await;

    let (status, body) = app.send(get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
    assert_eq!(body["products"][0]["name"], "Wide Leg Trousers");
    assert!(body["products"][0]["seller_name"].is_string());

    let (_, body) = app.send(get("/?categoryId=1")).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Test Shirt");

    let (_, body) = app.send(get("/?search=LINEN")).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["category_id"], 2);

    let (_, body) = app.send(get("/?page=2&limit=1")).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Test Shirt");
}

#[tokio::test]
async fn test_list_rejects_bad_paging() {
    let app = TestApp::new("handler_list_paging").await;

    for uri in [
        "/?page=0",
        "/?limit=0",
        "/?limit=101",
        "/?page=abc",
        "/?page=100000000000000000",
        "/?page=18446744073709551615&limit=100",
        "/?page=18446744073709551616",
    ] {
        let (status, _) = app.send(get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_list_far_page_is_empty() {
    let app = TestApp::new("handler_list_far_page").await;
    app.create(app.seller, shirt()).await;

    for uri in ["/?page=1000000", "/?page=92233720368547759&limit=100"] {
        let (status, body) = app.send(get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["products"], json!([]));
    }
}

#[tokio::test]
async fn test_list_ignores_invalid_token() {
    let app = TestApp::new("handler_list_bad_token").await;

    let (status, body) = app
        .send(
            Request::builder()
                .uri("/")
                .header("authorization", "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"], json!([]));
}

#[tokio::test]
async fn test_get_product_errors() {
    let app = TestApp::new("handler_get_errors").await;

    let (status, body) = app.send(get("/424242")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");

    let (status, _) = app.send(get("/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_owner_can_update_and_delete() {
    let app = TestApp::new("handler_owner_writes").await;
    let id = app.create(app.seller, shirt()).await;
    let auth = format!("Bearer {}", app.token(app.seller));

    let (status, body) = app
        .send(with_json(
            Request::builder()
                .method("PUT")
                .uri(format!("/{}", id))
                .header("authorization", auth.as_str()),
            json!({ "price": 12.5, "isSold": true }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product updated successfully");

    let (_, body) = app.send(get(&format!("/{}", id))).await;
    assert_eq!(body["price"], "12.50");
    assert_eq!(body["is_sold"], true);
    assert_eq!(body["name"], "Test Shirt");

    let (_, listed) = app.send(get("/")).await;
    assert_eq!(listed["products"], json!([]));

    let (status, body) = app
        .send(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", id))
                .header("authorization", auth.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let (status, _) = app.send(get(&format!("/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_owner_writes_return_404() {
    let app = TestApp::new("handler_non_owner").await;
    let id = app.create(app.seller, shirt()).await;
    let intruder = format!("Bearer {}", app.token(app.other_seller));

    let (status, body) = app
        .send(with_json(
            Request::builder()
                .method("PUT")
                .uri(format!("/{}", id))
                .header("authorization", intruder.as_str()),
            json!({ "price": 1.0 }),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found or unauthorized");

    let (status, body) = app
        .send(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", id))
                .header("authorization", intruder.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found or unauthorized");

    let (_, body) = app.send(get(&format!("/{}", id))).await;
    assert_eq!(body["price"], "10.00");
}

#[tokio::test]
async fn test_update_requires_token() {
    let app = TestApp::new("handler_update_no_token").await;
    let id = app.create(app.seller, shirt()).await;

    let (status, _) = app
        .send(with_json(
            Request::builder().method("PUT").uri(format!("/{}", id)),
            json!({ "price": 1.0 }),
        ))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_categories() {
    let app = TestApp::new("handler_categories").await;

    let response = app.categories.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 5);
    assert_eq!(categories[0]["name"], "Accessories");
    assert_eq!(categories[0]["slug"], "accessories");
}
