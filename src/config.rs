use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a number, got `{value}`")]
    NotANumber { name: &'static str, value: String },

    #[error("ARTICLE_STORE must be `mongo` or `memory`, got `{0}`")]
    UnknownStore(String),
}

/// Which persistence backend the service runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

/// Service configuration, read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub mongodb_uri: String,
    pub database: String,
    pub collection: String,
    pub mongo_timeout: Duration,
    /// Reported in the `service` field of error bodies.
    pub service_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let mongodb_uri = match lookup("MONGODB_URI") {
            Some(uri) => uri,
            None => format!(
                "mongodb://{}:{}/",
                var("MONGO_HOST", "mongodb"),
                parse_number::<u16>("MONGO_PORT", &var("MONGO_PORT", "27017"))?
            ),
        };

        let store = match var("ARTICLE_STORE", "mongo").to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => StoreBackend::Mongo,
            "memory" => StoreBackend::Memory,
            other => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        Ok(Config {
            host: var("HOST", "0.0.0.0"),
            port: parse_number("PORT", &var("PORT", "5000"))?,
            store,
            mongodb_uri,
            database: var("MONGO_DATABASE", "articles_db"),
            collection: var("MONGO_COLLECTION", "articles"),
            mongo_timeout: Duration::from_secs(parse_number(
                "MONGO_TIMEOUT_SECS",
                &var("MONGO_TIMEOUT_SECS", "5"),
            )?),
            service_name: var("SERVICE_NAME", "Unknown"),
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber {
        name,
        value: value.to_string(),
    })
}
