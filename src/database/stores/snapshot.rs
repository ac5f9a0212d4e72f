use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{LeagueStore, StoreResult, decode};
use crate::database::models::LeagueDocument;

/// Local JSON snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

#[async_trait]
impl LeagueStore for SnapshotStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn try_load(&self) -> StoreResult<Option<LeagueDocument>> {
        match fs::read_to_string(&self.path).await {
            Ok(body) => decode(&body),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn try_save(&self, document: &LeagueDocument) -> StoreResult<()> {
        let body = serde_json::to_string_pretty(document)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Write beside the target then rename, so readers never see half a file
        let staging = self.staging_path();
        fs::write(&staging, body).await?;
        fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("data.json"));
        assert!(store.try_load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn saves_pretty_json_and_reads_it_back() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("nested").join("data.json"));

        let document = LeagueDocument::default();
        store.try_save(&document).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  \"teams\""));
        assert!(!store.staging_path().exists());
        assert_eq!(store.try_load().await.unwrap(), Some(document));
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = SnapshotStore::new(path);
        assert!(store.try_load().await.is_err());
    }
}
