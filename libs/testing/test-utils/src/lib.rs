//! Shared test utilities for the users workspace
//!
//! - `TestUsersServer`: in-process `/users` REST collection on an ephemeral port
//! - `TestDataBuilder`: deterministic test data generation
//! - `assertions`: custom assertion helpers
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestUsersServer};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!     let server = TestUsersServer::new().await;
//!
//!     let payload = builder.user_json("main");
//!     let url = server.base_url();
//! }
//! ```

mod users_server;

pub use users_server::{DeleteReply, TestUsersServer, id_of};

use serde_json::{Value, json};

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data.
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
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Unique, valid email address
    pub fn email(&self, suffix: &str) -> String {
        format!("test-{}-{}@example.com", self.seed, suffix)
    }

    /// Deterministic phone number
    pub fn phone(&self) -> String {
        format!("555-{:04}", self.seed % 10_000)
    }

    /// Editable user fields in wire form (camelCase, no `id`)
    pub fn user_json(&self, suffix: &str) -> Value {
        json!({
            "firstName": format!("First-{}", suffix),
            "lastName": format!("Last-{}", self.seed % 10_000),
            "email": self.email(suffix),
            "phone": self.phone(),
        })
    }

    /// Stored user record in wire form, with `id`
    pub fn stored_user_json(&self, id: &str, suffix: &str) -> Value {
        let mut user = self.user_json(suffix);
        user["id"] = Value::String(id.to_string());
        user
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that two id sequences match, in order
    pub fn assert_ids_eq<A, B>(actual: &[A], expected: &[B], context: &str)
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let actual: Vec<&str> = actual.iter().map(|a| a.as_ref()).collect();
        let expected: Vec<&str> = expected.iter().map(|e| e.as_ref()).collect();
        assert_eq!(actual, expected, "{}: id order differs", context);
    }
}
