pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

use std::sync::Arc;

use anyhow::{Result, bail};

pub use config::{Config, StoreKind};
pub use database::{LoadSource, TieredStore};
pub use error::{LeagueError, LeagueResult};
pub use services::LeagueService;

use database::init_database;
use database::stores::{CacheStore, DatabaseStore, LeagueStore, SnapshotStore};

/// Assemble the store chain named by `config.store_chain`.
///
/// A database that cannot be opened at startup is left out of the chain
/// rather than aborting, so the service still runs on the remaining tiers.
pub async fn build_store(config: &Config) -> Result<TieredStore> {
    if config.store_chain.is_empty() {
        bail!("STORE_CHAIN must name at least one store");
    }

    let mut stores: Vec<Arc<dyn LeagueStore>> = Vec::new();
    for kind in &config.store_chain {
        match kind {
            StoreKind::Cache => stores.push(Arc::new(CacheStore::new(config.cache_capacity))),
            StoreKind::Database => match init_database(&config.database_url).await {
                Ok(pool) => stores.push(Arc::new(DatabaseStore::new(pool))),
                Err(e) => log::warn!(
                    "Database store {} unavailable, continuing without it: {}",
                    config.database_url,
                    e
                ),
            },
            StoreKind::File => stores.push(Arc::new(SnapshotStore::new(&config.snapshot_path))),
        }
    }

    if stores.is_empty() {
        bail!("no backing store could be opened");
    }

    let store = TieredStore::new(stores);
    log::info!("League store chain: {}", store.store_names().join(" -> "));
    Ok(store)
}
