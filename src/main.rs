use std::sync::Arc;

use tracing::{info, warn};

use tutorials::config::{Config, StoreBackend};
use tutorials::store::{InMemoryTutorialStore, MongoTutorialStore, SharedStore, TutorialStore};
use tutorials::{Server, api};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tutorials=info".into()),
        )
        .init();

    if let Err(e) = dotenvy::dotenv() {
        warn!("No .env file loaded: {}", e);
    }

    let config = Config::from_env()?;

    info!(
        bind_addr = %config.bind_addr,
        store = ?config.store,
        "Starting tutorials service"
    );

    let store: SharedStore = match config.store {
        StoreBackend::Mongo => {
            let store =
                MongoTutorialStore::connect(&config.mongodb_uri, &config.mongodb_database).await?;
            // Not fatal: the readiness probe keeps reporting until the database answers.
            match store.ping().await {
                Ok(()) => info!(database = %config.mongodb_database, "Connected to MongoDB"),
                Err(e) => warn!("MongoDB not reachable yet: {e}"),
            }
            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store; data is lost on exit");
            Arc::new(InMemoryTutorialStore::new())
        }
    };

    Server::bind(config.bind_addr)
        .await?
        .serve(api::routes(store))
        .await?;

    Ok(())
}
