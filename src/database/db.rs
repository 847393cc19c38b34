use std::sync::Arc;

use log::{info, warn};
use mongodb::{Client, options::ClientOptions};

use crate::article::memory::InMemoryArticleStore;
use crate::article::store::{ArticleStore, MongoArticleStore};
use crate::config::{Config, StoreBackend};

pub struct Database {
    pub client: Client,
}

impl Database {
    /// Builds a pooled client. The driver connects lazily, so this succeeds
    /// even when the server is down.
    pub async fn init(config: &Config) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.mongodb_uri).await?;
        client_options.app_name = Some("article_service".to_string());
        client_options.server_selection_timeout = Some(config.mongo_timeout);

        let client = Client::with_options(client_options)?;
        Ok(Self { client })
    }
}

/// Opens the store selected by `config` and pings it once.
///
/// An unreachable MongoDB is logged, not fatal: requests report 503 until it
/// comes back.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn ArticleStore>, mongodb::error::Error> {
    let store: Arc<dyn ArticleStore> = match config.store {
        StoreBackend::Memory => {
            info!("Using in-memory article store");
            Arc::new(InMemoryArticleStore::new())
        }
        StoreBackend::Mongo => {
            let database = Database::init(config).await?;
            Arc::new(MongoArticleStore::new(
                &database.client,
                &config.database,
                &config.collection,
            ))
        }
    };

    match store.ping().await {
        Ok(()) => info!("Connected successfully to article store"),
        Err(e) => warn!("Article store is not reachable yet: {}", e),
    }

    Ok(store)
}
