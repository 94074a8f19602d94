//! In-memory SQLite test infrastructure
//!
//! Every `TestDatabase` is a private database with the full migration set
//! applied (including the seeded categories), so tests run in parallel
//! without sharing state.

use database::sql::{ConnectOptions, DatabaseConnection, connect, run_migrations};
use migration::Migrator;
use sea_orm::{ConnectionTrait, Statement, Value};

/// Test database wrapper
pub struct TestDatabase {
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    /// Create a new in-memory database with migrations applied
    ///
    /// The pool is pinned to a single connection: each SQLite `:memory:`
    /// connection is its own database.
    ///
    /// ```ignore
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// let repo = MyRepository::new(db.connection());
    /// # }
    /// ```
    pub async fn new() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let connection = connect(options)
            .await
            .expect("Failed to open in-memory SQLite database");

        run_migrations::<Migrator>(&connection, "test")
            .await
            .expect("Failed to run migrations");

        Self { connection }
    }

    /// Get a cloned connection (useful for passing to repositories)
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Create a seller account and return its id
    ///
    /// Tests that create products need a `users` row to satisfy the
    /// seller foreign key. The name is derived from the email's local part.
    pub async fn create_test_user(&self, email: &str) -> i32 {
        let local = email.split('@').next().unwrap_or(email);
        let now = chrono::Utc::now().fixed_offset();

        let stmt = Statement::from_sql_and_values(
            self.connection.get_database_backend(),
            "INSERT INTO users (email, password_hash, first_name, last_name, role, created_at, updated_at) \
             VALUES (?, ?, ?, ?, 'seller', ?, ?) RETURNING id",
            [
                Value::from(email.to_string()),
                Value::from("$argon2id$v=19$m=19456,t=2,p=1$test$test".to_string()),
                Value::from("Test".to_string()),
                Value::from(local.to_string()),
                Value::from(now),
                Value::from(now),
            ],
        );

        let row = self
            .connection
            .query_one_raw(stmt)
            .await
            .expect("Failed to create test user")
            .expect("INSERT ... RETURNING returned no row");

        row.try_get::<i32>("", "id").expect("Missing id column")
    }

    /// Run a scalar `SELECT COUNT(*) ...` query
    pub async fn count(&self, sql: &str) -> i64 {
        let stmt = Statement::from_string(self.connection.get_database_backend(), sql);
        let row = self
            .connection
            .query_one_raw(stmt)
            .await
            .expect("Count query failed")
            .expect("Count query returned no row");

        row.try_get_by_index::<i64>(0).expect("Count is not an integer")
    }
}
