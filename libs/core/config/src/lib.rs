//! Environment-driven configuration shared by the users admin workspace.
//!
//! - `server`: bind address of the web shell (`HOST`, `PORT`)
//! - `users_api`: location of the upstream users REST resource (`USERS_API_URL`)
//! - `tracing`: subscriber setup keyed on [`Environment`]

pub mod server;
pub mod tracing;
pub mod users_api;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Runtime environment, selected with `APP_ENV`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development, // Local runs, pretty logs
    Production,  // Deployed, JSON logs
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env_or_default("APP_ENV", "development");

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load an environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load an environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Load `key` (falling back to `default`) and parse it into `T`
pub fn env_parse_or<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_or_default(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("USERS_TEST_VAR", Some("set"), || {
            assert_eq!(env_or_default("USERS_TEST_VAR", "fallback"), "set");
        });
        temp_env::with_var_unset("USERS_TEST_VAR", || {
            assert_eq!(env_or_default("USERS_TEST_VAR", "fallback"), "fallback");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("USERS_REQUIRED_VAR", || {
            let err = env_required("USERS_REQUIRED_VAR").unwrap_err();
            assert!(err.to_string().contains("USERS_REQUIRED_VAR"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_parse_or_reports_key() {
        temp_env::with_var("USERS_PARSE_VAR", Some("nope"), || {
            let err = env_parse_or::<u16>("USERS_PARSE_VAR", "1").unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "USERS_PARSE_VAR"));
        });
        temp_env::with_var_unset("USERS_PARSE_VAR", || {
            assert_eq!(env_parse_or::<u16>("USERS_PARSE_VAR", "42").unwrap(), 42);
        });
    }
}
