#![allow(dead_code)]

use std::env;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use fake::Fake;
use fake::faker::name::en::Name;
use sqlx::SqlitePool;
use tempfile::TempDir;

use league::database::init_database;
use league::database::models::*;
use league::database::stores::{
    DatabaseStore, LeagueStore, SnapshotStore, StoreError, StoreResult,
};
use league::{LeagueService, TieredStore};

pub fn setup_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Test database wrapper
pub struct TestDb {
    pub pool: SqlitePool,
    pub store: DatabaseStore,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/league.db", temp_dir.path().display());
        let pool = init_database(&database_url).await?;

        Ok(TestDb {
            store: DatabaseStore::new(pool.clone()),
            pool,
            _temp_dir: temp_dir,
        })
    }
}

// Snapshot file in its own temp dir
pub struct TestSnapshot {
    pub store: SnapshotStore,
    _temp_dir: TempDir,
}

impl TestSnapshot {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let store = SnapshotStore::new(temp_dir.path().join("data.json"));
        Ok(TestSnapshot {
            store,
            _temp_dir: temp_dir,
        })
    }
}

/// In-memory store whose availability is scripted by the test.
pub struct ScriptedStore {
    name: String,
    document: Mutex<Option<LeagueDocument>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    pub loads: AtomicUsize,
    pub saves: AtomicUsize,
}

impl ScriptedStore {
    pub fn empty(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            document: Mutex::new(None),
            fail_loads: AtomicBool::new(false),
            fail_saves: AtomicBool::new(false),
            loads: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
        })
    }

    pub fn holding(name: &str, document: LeagueDocument) -> Arc<Self> {
        let store = Self::empty(name);
        store.put(Some(document));
        store
    }

    /// Fails every load and save.
    pub fn offline(name: &str) -> Arc<Self> {
        let store = Self::empty(name);
        store.set_offline(true);
        store
    }

    pub fn set_offline(&self, offline: bool) {
        self.fail_loads.store(offline, Ordering::SeqCst);
        self.fail_saves.store(offline, Ordering::SeqCst);
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn put(&self, document: Option<LeagueDocument>) {
        *self.document.lock().unwrap() = document;
    }

    pub fn stored(&self) -> Option<LeagueDocument> {
        self.document.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeagueStore for ScriptedStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn try_load(&self) -> StoreResult<Option<LeagueDocument>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("{} is offline", self.name)));
        }
        Ok(self.stored())
    }

    async fn try_save(&self, document: &LeagueDocument) -> StoreResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("{} is offline", self.name)));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.put(Some(document.clone()));
        Ok(())
    }
}

pub fn chain(stores: &[Arc<ScriptedStore>]) -> TieredStore {
    TieredStore::new(
        stores
            .iter()
            .map(|s| s.clone() as Arc<dyn LeagueStore>)
            .collect(),
    )
}

pub fn service_over(stores: &[Arc<ScriptedStore>]) -> LeagueService {
    LeagueService::new(chain(stores))
}

/// A small league that differs from the compiled defaults.
pub fn sample_document() -> LeagueDocument {
    let teams = vec![
        Team {
            id: 1,
            name: "North".to_string(),
            group: Group::A,
            logo: "⚽".to_string(),
        },
        Team {
            id: 2,
            name: "South".to_string(),
            group: Group::A,
            logo: "🏆".to_string(),
        },
    ];
    LeagueDocument {
        teams,
        rounds: vec![Round {
            id: 1,
            name: "Opening".to_string(),
        }],
        ..LeagueDocument::default()
    }
}

pub fn player_input(team_id: TeamId, number: u32) -> PlayerInput {
    PlayerInput {
        id: None,
        team_id,
        name: Name().fake(),
        position: Position::Forward,
        number,
        photo: None,
    }
}

pub fn match_input(round_id: RoundId, home: TeamId, away: TeamId) -> MatchInput {
    MatchInput {
        id: None,
        round_id,
        home_team_id: home,
        away_team_id: away,
        status: None,
        home_score: None,
        away_score: None,
        scheduled_at: Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap(),
    }
}

pub fn news_input(title: &str) -> NewsInput {
    NewsInput {
        id: None,
        title: title.to_string(),
        body: "Matchday recap".to_string(),
        image: None,
    }
}

/// Saves and restores process environment variables around a test.
pub struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn new(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|k| (k.to_string(), env::var(k).ok()))
            .collect();
        for key in keys {
            unsafe {
                env::remove_var(key);
            }
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
