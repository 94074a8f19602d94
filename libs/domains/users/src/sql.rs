use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::entity::{self, Column, Entity};
use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

/// SeaORM implementation of UserRepository
#[derive(Clone)]
pub struct SqlUserRepository {
    db: DatabaseConnection,
}

impl SqlUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn create(&self, user: NewUser) -> UserResult<User> {
        let now = Utc::now().fixed_offset();
        let email = user.email.clone();

        let model = entity::ActiveModel {
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            phone: Set(user.phone),
            role: Set(user.role),
            is_verified: Set(false),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| UserError::from_insert(e, &email))?;

        tracing::info!(user_id = model.id, email = %model.email, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let model = Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = Entity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let count = Entity::find()
            .filter(Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
