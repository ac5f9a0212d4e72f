//! Read-with-fallback, write-with-fallthrough façade over an ordered chain
//! of backing stores.
//!
//! - `load` walks the chain from the most preferred store and returns the
//!   first document found. Stores passed over on the way (empty or failing)
//!   are seeded with that document ("promotion"). If nothing is found the
//!   compiled defaults are used and promoted everywhere.
//! - `save` stamps `last_update` and writes to the first store that accepts
//!   it. There is no fan-out: a successful write does not reach lower tiers.
//!
//! No merge and no concurrency token: the last `save` to complete wins.

use std::sync::Arc;

use chrono::Utc;

use crate::database::defaults::default_document;
use crate::database::models::LeagueDocument;
use crate::database::stores::LeagueStore;
use crate::error::{LeagueError, LeagueResult};

/// Where a loaded document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Store(String),
    Defaults,
}

#[derive(Clone)]
pub struct TieredStore {
    stores: Vec<Arc<dyn LeagueStore>>,
    defaults: Arc<dyn Fn() -> LeagueDocument + Send + Sync>,
}

impl TieredStore {
    /// `stores` is ordered most preferred first.
    pub fn new(stores: Vec<Arc<dyn LeagueStore>>) -> Self {
        Self {
            stores,
            defaults: Arc::new(default_document),
        }
    }

    /// Replace the compiled defaults (tests, alternative seeds).
    pub fn with_defaults<F>(mut self, defaults: F) -> Self
    where
        F: Fn() -> LeagueDocument + Send + Sync + 'static,
    {
        self.defaults = Arc::new(defaults);
        self
    }

    pub fn store_names(&self) -> Vec<String> {
        self.stores.iter().map(|s| s.name().to_string()).collect()
    }

    /// Always yields a usable document.
    pub async fn load(&self) -> LeagueDocument {
        self.load_with_source().await.0
    }

    pub async fn load_with_source(&self) -> (LeagueDocument, LoadSource) {
        let mut passed_over: Vec<&Arc<dyn LeagueStore>> = Vec::new();

        for store in &self.stores {
            match store.try_load().await {
                Ok(Some(document)) => {
                    log::info!("League document loaded from {}", store.name());
                    self.promote(&passed_over, &document).await;
                    return (document, LoadSource::Store(store.name().to_string()));
                }
                Ok(None) => {
                    log::debug!("Store {} holds no league document", store.name());
                    passed_over.push(store);
                }
                Err(e) => {
                    log::warn!("Failed to load league document from {}: {}", store.name(), e);
                    passed_over.push(store);
                }
            }
        }

        let persistence = LeagueError::persistence(
            "no backing store returned a league document; seeding compiled defaults",
        );
        log::warn!("{}", persistence);

        let mut document = (self.defaults)();
        document.last_update = Some(Utc::now());
        self.promote(&passed_over, &document).await;
        (document, LoadSource::Defaults)
    }

    async fn promote(&self, targets: &[&Arc<dyn LeagueStore>], document: &LeagueDocument) {
        for store in targets {
            match store.try_save(document).await {
                Ok(()) => log::info!("League document promoted into {}", store.name()),
                Err(e) => log::warn!("Failed to promote league document into {}: {}", store.name(), e),
            }
        }
    }

    /// Stamp and persist. Returns the name of the store that accepted the
    /// write; fails only when every store in the chain fails.
    pub async fn save(&self, document: &mut LeagueDocument) -> LeagueResult<&str> {
        document.last_update = Some(Utc::now());

        let mut failures = Vec::new();
        for store in &self.stores {
            match store.try_save(document).await {
                Ok(()) => {
                    log::debug!("League document saved to {}", store.name());
                    return Ok(store.name());
                }
                Err(e) => {
                    log::warn!("Failed to save league document to {}: {}", store.name(), e);
                    failures.push(format!("{}: {}", store.name(), e));
                }
            }
        }

        let error = if failures.is_empty() {
            LeagueError::persistence("no backing store configured")
        } else {
            LeagueError::persistence(format!("every store failed ({})", failures.join("; ")))
        };
        log::error!("{}", error);
        Err(error)
    }
}
