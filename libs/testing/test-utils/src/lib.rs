//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: migrated in-memory SQLite database, dropped with the test
//! - `TestDataBuilder`: deterministic test data generation
//! - `assertions`: custom assertion helpers
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_repository_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_repository_test");
//!
//!     let seller_id = db.create_test_user(&builder.email("seller")).await;
//!     let name = builder.name("product", "main");
//! }
//! ```

mod sqlite;

pub use sqlite::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// Seeding from the test name keeps generated values stable between runs
/// while keeping them distinct between tests.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique email address for a test user
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let email = TestDataBuilder::new(7).email("seller");
    /// assert_eq!(email, "seller-7@example.com");
    /// ```
    pub fn email(&self, role: &str) -> String {
        format!("{}-{}@example.com", role, self.seed)
    }

    /// Generate a unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let name = TestDataBuilder::new(12345).name("product", "main");
    /// assert_eq!(name, "test-product-12345-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `values` never increases from one element to the next
    pub fn assert_non_increasing<T: PartialOrd + std::fmt::Debug>(values: &[T], context: &str) {
        for pair in values.windows(2) {
            assert!(
                pair[0] >= pair[1],
                "{}: {:?} is followed by larger {:?}",
                context,
                pair[0],
                pair[1]
            );
        }
    }
}
