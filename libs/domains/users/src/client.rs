use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{UserError, UserResult};
use crate::models::{User, UserFields, UserId};

/// Client for the users REST collection
///
/// The controller only talks to the collection through this trait, so a
/// fake can stand in for the HTTP implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// GET the whole collection
    async fn list_users(&self) -> UserResult<Vec<User>>;

    /// POST a new record; the server assigns the id
    async fn create_user(&self, fields: UserFields) -> UserResult<User>;

    /// PUT a full replacement of the record at `id`
    async fn update_user(&self, id: UserId, fields: UserFields) -> UserResult<User>;

    /// DELETE the record at `id`, returning whatever body the server sent
    async fn delete_user(&self, id: UserId) -> UserResult<serde_json::Value>;
}

/// [`UsersApi`] over HTTP with reqwest
#[derive(Debug, Clone)]
pub struct HttpUsersApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUsersApi {
    /// `base_url` is the collection URL, e.g. `http://localhost:3000/users`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &UserId) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(id.as_str()))
    }

    /// Read the body of a successful response, rejecting other statuses.
    async fn read_body(response: reqwest::Response) -> UserResult<Vec<u8>> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!(status = %status, body = %body, "Users API request rejected");
            return Err(UserError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body.to_vec())
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> UserResult<T> {
        let body = Self::read_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    #[instrument(skip(self), fields(url = %self.base_url))]
    async fn list_users(&self) -> UserResult<Vec<User>> {
        let response = self.client.get(&self.base_url).send().await?;
        let users: Vec<User> = Self::read_json(response).await?;

        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    #[instrument(skip(self, fields), fields(url = %self.base_url))]
    async fn create_user(&self, fields: UserFields) -> UserResult<User> {
        let response = self
            .client
            .post(&self.base_url)
            .json(&fields)
            .send()
            .await?;
        let user: User = Self::read_json(response).await?;

        debug!(user_id = %user.id, "Created user");
        Ok(user)
    }

    #[instrument(skip(self, fields), fields(user_id = %id))]
    async fn update_user(&self, id: UserId, fields: UserFields) -> UserResult<User> {
        let response = self
            .client
            .put(self.item_url(&id))
            .json(&fields)
            .send()
            .await?;
        let user: User = Self::read_json(response).await?;

        debug!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn delete_user(&self, id: UserId) -> UserResult<serde_json::Value> {
        let response = self
            .client
            .delete(self.item_url(&id))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await?;
        let body = Self::read_body(response).await?;

        // Empty bodies are common for DELETE
        let value = if body.iter().all(u8::is_ascii_whitespace) {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body)?
        };

        debug!("Deleted user");
        Ok(value)
    }
}
