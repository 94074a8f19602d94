use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::{NewUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; a taken email yields `UserError::DuplicateEmail`
    async fn create(&self, user: NewUser) -> UserResult<User>;

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// Look up by email; callers pass the normalized (lowercase) form
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> UserResult<bool>;
}
