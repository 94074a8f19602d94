use chrono::{DateTime, Utc};
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

pub const MIN_PASSWORD_LEN: u64 = 6;
pub const MAX_PASSWORD_LEN: u64 = 128;

/// Account role
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    #[sea_orm(string_value = "customer")]
    Customer,
    #[sea_orm(string_value = "seller")]
    Seller,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// User account as stored
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    /// Argon2 PHC string, never serialized
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Fields needed to insert a user; the password is already hashed
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            role: user.role,
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = MIN_PASSWORD_LEN, max = MAX_PASSWORD_LEN))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    /// `customer` (default) or `seller`
    pub role: Option<Role>,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Token plus the account it was issued for
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn test_role_column_values() {
        assert_eq!(Role::Seller.to_value(), "seller");
        assert_eq!(
            Role::try_from_value(&"admin".to_string()).unwrap(),
            Role::Admin
        );
        assert!(Role::try_from_value(&"moderator".to_string()).is_err());
    }

    #[test]
    fn test_role_round_trips_through_strings() {
        assert_eq!(Role::Seller.to_string(), "seller");
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("moderator".parse::<Role>().is_err());
    }

    #[test]
    fn test_register_request_uses_camel_case() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "emma@thrift.ivy",
            "password": "password123",
            "firstName": "Emma",
            "lastName": "Chen",
            "role": "seller"
        }))
        .unwrap();

        assert_eq!(request.first_name, "Emma");
        assert_eq!(request.role, Some(Role::Seller));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_short_password() {
        let request = RegisterRequest {
            email: "emma@thrift.ivy".to_string(),
            password: "12345".to_string(),
            first_name: "Emma".to_string(),
            last_name: "Chen".to_string(),
            phone: None,
            role: None,
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_user_response_hides_password_hash() {
        let user = User {
            id: 1,
            email: "emma@thrift.ivy".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            first_name: "Emma".to_string(),
            last_name: "Chen".to_string(),
            phone: None,
            role: Role::Seller,
            is_verified: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["firstName"], "Emma");
        assert_eq!(json["role"], "seller");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
