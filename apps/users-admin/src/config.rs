//! Configuration for the users admin web shell

use core_config::{server::ServerConfig, users_api::UsersApiConfig, FromEnv};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub users_api: UsersApiConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            users_api: UsersApiConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
