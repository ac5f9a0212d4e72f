use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use moka::future::Cache;

use super::{DOCUMENT_KEY, LeagueStore, StoreError, StoreResult, decode};
use crate::database::models::LeagueDocument;

/// In-process key-value tier. Holds the serialized document so reads behave
/// like a remote KV lookup (the value is parsed on every load).
///
/// Entries never expire: a save may land only here, so this tier has to keep
/// the newest document for as long as the process lives.
#[derive(Clone)]
pub struct CacheStore {
    cache: Arc<Cache<String, String>>,
    online: Arc<AtomicBool>,
}

impl CacheStore {
    pub fn new(max_capacity: u64) -> Self {
        let cache = Cache::builder().max_capacity(max_capacity).build();
        Self {
            cache: Arc::new(cache),
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Toggle availability; an offline cache fails every call.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub async fn invalidate(&self) {
        self.cache.invalidate(DOCUMENT_KEY).await;
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("cache is offline".to_string()))
        }
    }
}

#[async_trait]
impl LeagueStore for CacheStore {
    fn name(&self) -> &str {
        "cache"
    }

    async fn try_load(&self) -> StoreResult<Option<LeagueDocument>> {
        self.ensure_online()?;
        match self.cache.get(DOCUMENT_KEY).await {
            Some(body) => decode(&body),
            None => Ok(None),
        }
    }

    async fn try_save(&self, document: &LeagueDocument) -> StoreResult<()> {
        self.ensure_online()?;
        let body = serde_json::to_string(document)?;
        self.cache.insert(DOCUMENT_KEY.to_string(), body).await;
        Ok(())
    }
}
