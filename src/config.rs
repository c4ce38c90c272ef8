use std::env;

use http_api::ServerConfig;
use thiserror::Error;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const PORT: &str = "PORT";
pub const NODE_ENV: &str = "NODE_ENV";
pub const APP_ENV: &str = "APP_ENV";
pub const FRONTEND_URL: &str = "FRONTEND_URL";

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

pub struct AppConfig {
    pub openai_api_key: String,
    pub server: ServerConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_key", &"[REDACTED]")
            .field("server", &self.server)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let openai_api_key = read(OPENAI_API_KEY).ok_or(ConfigError::Missing(OPENAI_API_KEY))?;

        let port = match read(PORT) {
            Some(value) => match value.trim().parse::<u16>() {
                Ok(port) => port,
                Err(_) => return Err(ConfigError::Invalid { name: PORT, value }),
            },
            None => DEFAULT_PORT,
        };

        Ok(AppConfig {
            openai_api_key,
            server: ServerConfig {
                port,
                environment: read(NODE_ENV).or_else(|| read(APP_ENV)),
                frontend_url: read(FRONTEND_URL),
            },
        })
    }
}
