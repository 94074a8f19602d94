//! Repository and service tests against a migrated SQLite database

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase};

fn new_user(email: &str, role: Role) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: hash_password("password123").unwrap(),
        first_name: "Emma".to_string(),
        last_name: "Chen".to_string(),
        phone: Some("555-0100".to_string()),
        role,
    }
}

fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: "password123".to_string(),
        first_name: "Noah".to_string(),
        last_name: "Park".to_string(),
        phone: None,
        role: Some(Role::Seller),
    }
}

#[tokio::test]
async fn test_create_and_fetch_user() {
    let db = TestDatabase::new().await;
    let repo = SqlUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_fetch_user");
    let email = builder.email("seller");

    let created = repo.create(new_user(&email, Role::Seller)).await.unwrap();
    assert!(created.id > 0);
    assert!(created.is_active);
    assert!(!created.is_verified);

    let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, email);
    assert_eq!(by_id.role, Role::Seller);
    assert_eq!(by_id.phone.as_deref(), Some("555-0100"));

    let by_email = repo.get_by_email(&email).await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);
    assert!(repo.email_exists(&email).await.unwrap());
}

#[tokio::test]
async fn test_missing_user_returns_none() {
    let db = TestDatabase::new().await;
    let repo = SqlUserRepository::new(db.connection());

    assert!(repo.get_by_id(999).await.unwrap().is_none());
    assert!(repo.get_by_email("ghost@example.com").await.unwrap().is_none());
    assert!(!repo.email_exists("ghost@example.com").await.unwrap());
}

#[tokio::test]
async fn test_unique_violation_maps_to_duplicate_email() {
    let db = TestDatabase::new().await;
    let repo = SqlUserRepository::new(db.connection());
    let email = TestDataBuilder::from_test_name("unique_violation").email("buyer");

    repo.create(new_user(&email, Role::Customer)).await.unwrap();
    let result = repo.create(new_user(&email, Role::Customer)).await;

    assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
}

#[tokio::test]
async fn test_register_then_login() {
    let db = TestDatabase::new().await;
    let service = UserService::new(SqlUserRepository::new(db.connection()));

    let registered = service
        .register(register_request("Noah@Thrift.Ivy"))
        .await
        .unwrap();
    assert_eq!(registered.email, "noah@thrift.ivy");

    let logged_in = service
        .login(LoginRequest {
            email: "NOAH@thrift.ivy".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(logged_in.id, registered.id);

    let wrong = service
        .login(LoginRequest {
            email: "noah@thrift.ivy".to_string(),
            password: "password124".to_string(),
        })
        .await;
    assert!(matches!(wrong, Err(UserError::InvalidCredentials)));
}

#[tokio::test]
async fn test_register_is_case_insensitive_for_duplicates() {
    let db = TestDatabase::new().await;
    let service = UserService::new(SqlUserRepository::new(db.connection()));

    service
        .register(register_request("liam@thrift.ivy"))
        .await
        .unwrap();
    let result = service.register(register_request("LIAM@thrift.ivy")).await;

    assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
}
