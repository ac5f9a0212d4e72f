//! Backing stores for the league document.
//!
//! Each backend only knows how to read and write the whole document under one
//! well-known key. Walking the chain, promotion and fallback live in
//! [`crate::database::tiered::TieredStore`].

use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::LeagueDocument;

pub mod cache;
pub mod snapshot;
pub mod sql;

pub use cache::CacheStore;
pub use snapshot::SnapshotStore;
pub use sql::DatabaseStore;

/// Identifier the document is persisted under in every backend.
pub const DOCUMENT_KEY: &str = "main";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait LeagueStore: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// `Ok(None)` means the store is reachable but holds no document.
    async fn try_load(&self) -> StoreResult<Option<LeagueDocument>>;

    /// Overwrites the stored document wholesale.
    async fn try_save(&self, document: &LeagueDocument) -> StoreResult<()>;
}

/// Parse a stored body. Blank bodies count as empty, not as corruption.
pub(crate) fn decode(body: &str) -> StoreResult<Option<LeagueDocument>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(body)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_is_empty() {
        assert!(decode("  \n").unwrap().is_none());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(
            decode("{\"teams\": 3}"),
            Err(StoreError::Serialization(_))
        ));
    }
}
