use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::client::UsersApi;
use crate::error::{UserError, UserResult};
use crate::models::{User, UserFields, UserId};

/// In-process [`UsersApi`] that behaves like a json-server collection
/// (for development/testing)
///
/// Ids are assigned from a counter as decimal strings. Updating or
/// deleting an unknown id yields a 404 [`UserError::Status`], like the
/// real collection would.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUsersApi {
    inner: Arc<RwLock<Collection>>,
}

#[derive(Debug, Default)]
struct Collection {
    users: Vec<User>,
    next_id: u64,
}

impl InMemoryUsersApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the collection; the id counter continues after the highest numeric id.
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users
            .iter()
            .filter_map(|u| u.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            inner: Arc::new(RwLock::new(Collection { users, next_id })),
        }
    }

    /// Current server-side collection, in insertion order
    pub async fn snapshot(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    fn not_found() -> UserError {
        UserError::Status {
            status: 404,
            body: "{}".to_string(),
        }
    }
}

#[async_trait]
impl UsersApi for InMemoryUsersApi {
    async fn list_users(&self) -> UserResult<Vec<User>> {
        Ok(self.snapshot().await)
    }

    async fn create_user(&self, fields: UserFields) -> UserResult<User> {
        let mut collection = self.inner.write().await;
        collection.next_id += 1;

        let user = User::from_fields(UserId::new(collection.next_id.to_string()), fields);
        collection.users.push(user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, fields: UserFields) -> UserResult<User> {
        let mut collection = self.inner.write().await;
        let slot = collection
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(Self::not_found)?;

        *slot = User::from_fields(id, fields);

        tracing::info!(user_id = %slot.id, "Updated user");
        Ok(slot.clone())
    }

    async fn delete_user(&self, id: UserId) -> UserResult<serde_json::Value> {
        let mut collection = self.inner.write().await;
        let before = collection.users.len();
        collection.users.retain(|u| u.id != id);

        if collection.users.len() == before {
            return Err(Self::not_found());
        }

        tracing::info!(user_id = %id, "Deleted user");
        Ok(serde_json::json!({}))
    }
}
