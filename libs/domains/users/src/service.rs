use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, NewUser, RegisterRequest, Role, User};
use crate::repository::UserRepository;

/// Service layer for account registration and authentication
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new account.
    ///
    /// The email is trimmed and lowercased before the duplicate check and the
    /// insert. `admin` cannot be requested here.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<User> {
        let role = input.role.unwrap_or_default();
        if role == Role::Admin {
            return Err(UserError::Validation(
                "Role must be customer or seller".to_string(),
            ));
        }

        let email = normalize_email(&input.email);
        if self.repository.email_exists(&email).await? {
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = hash_password(&input.password)?;

        let user = self
            .repository
            .create(NewUser {
                email,
                password_hash,
                first_name: input.first_name.trim().to_string(),
                last_name: input.last_name.trim().to_string(),
                phone: input
                    .phone
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty()),
                role,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Check credentials. Unknown email, wrong password and a deactivated
    /// account all fail with `InvalidCredentials`.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<User> {
        let email = normalize_email(&input.email);

        let Some(user) = self.repository.get_by_email(&email).await? else {
            tracing::debug!("Login for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        if !user.is_active {
            tracing::debug!(user_id = user.id, "Login for inactive account");
            return Err(UserError::InvalidCredentials);
        }

        if !verify_password(&input.password, &user.password_hash)? {
            tracing::debug!(user_id = user.id, "Password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: i32) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hash a password into an argon2 PHC string.
pub fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
