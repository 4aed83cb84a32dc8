use url::Url;

use crate::{env_or_default, ConfigError, FromEnv};

/// Collection URL used when `USERS_API_URL` is not set
pub const DEFAULT_USERS_API_URL: &str = "http://localhost:3000/users";

/// Location of the upstream users REST collection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsersApiConfig {
    base_url: String,
}

impl UsersApiConfig {
    /// Validates that `url` is an absolute http(s) URL and strips trailing slashes.
    pub fn new(url: &str) -> Result<Self, ConfigError> {
        let invalid = |details: String| ConfigError::ParseError {
            key: "USERS_API_URL".to_string(),
            details,
        };

        let parsed = Url::parse(url.trim()).map_err(|e| invalid(format!("'{}': {}", url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("'{}' is not an http(s) URL", url)));
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(invalid(format!("'{}' has no host", url)));
        }

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl FromEnv for UsersApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::new(&env_or_default("USERS_API_URL", DEFAULT_USERS_API_URL))
    }
}

impl Default for UsersApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_USERS_API_URL.to_string(),
        }
    }
}
