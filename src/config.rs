use anyhow::{Result, bail};
use std::env;
use std::path::PathBuf;

/// Backing stores the tiered store can be assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Cache,
    Database,
    File,
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Cache => write!(f, "cache"),
            StoreKind::Database => write!(f, "database"),
            StoreKind::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cache" | "kv" => Ok(StoreKind::Cache),
            "database" | "db" => Ok(StoreKind::Database),
            "file" | "snapshot" => Ok(StoreKind::File),
            _ => Err(format!("Invalid store kind: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub snapshot_path: PathBuf,
    /// Most preferred store first.
    pub store_chain: Vec<StoreKind>,
    pub cache_capacity: u64,
    pub host: String,
    pub port: u16,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_env_only()
    }

    /// Load configuration from environment variables only (without loading .env files)
    /// This is useful for testing where you want to control the environment directly
    pub fn from_env_only() -> Result<Self> {
        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./league.db".to_string()),
            snapshot_path: env::var("SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data.json")),
            store_chain: parse_store_chain(
                &env::var("STORE_CHAIN").unwrap_or_else(|_| "database,file".to_string()),
            )?,
            cache_capacity: env::var("CACHE_CAPACITY")
                .unwrap_or_else(|_| "16".to_string())
                .parse()
                .unwrap_or(16),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_store(&self, kind: StoreKind) -> bool {
        self.store_chain.contains(&kind)
    }
}

pub fn parse_store_chain(raw: &str) -> Result<Vec<StoreKind>> {
    let mut chain = Vec::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let kind: StoreKind = part.parse().map_err(anyhow::Error::msg)?;
        if chain.contains(&kind) {
            bail!("Store '{}' listed more than once in STORE_CHAIN", kind);
        }
        chain.push(kind);
    }
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_chain_in_order() {
        let chain = parse_store_chain("cache, database,file").unwrap();
        assert_eq!(
            chain,
            vec![StoreKind::Cache, StoreKind::Database, StoreKind::File]
        );
    }

    #[test]
    fn rejects_unknown_and_duplicate_stores() {
        assert!(parse_store_chain("database,redis").is_err());
        assert!(parse_store_chain("file,file").is_err());
    }

    #[test]
    fn empty_chain_is_allowed() {
        assert!(parse_store_chain("").unwrap().is_empty());
    }
}
