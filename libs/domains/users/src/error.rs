use thiserror::Error;

use crate::models::UserId;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Request to users API failed: {0}")]
    Http(String),

    #[error("Users API responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response from users API: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<validator::ValidationErrors> for UserError {
    fn from(errors: validator::ValidationErrors) -> Self {
        UserError::Validation(errors.to_string())
    }
}

impl From<reqwest::Error> for UserError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            UserError::Decode(error.to_string())
        } else {
            UserError::Http(error.to_string())
        }
    }
}

impl From<serde_json::Error> for UserError {
    fn from(error: serde_json::Error) -> Self {
        UserError::Decode(error.to_string())
    }
}
