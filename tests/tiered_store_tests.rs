use std::sync::Arc;
use std::sync::atomic::Ordering;

use pretty_assertions::assert_eq;

use league::LeagueError;
use league::database::LoadSource;
use league::database::defaults::default_document;
use league::database::stores::{CacheStore, LeagueStore};
use league::TieredStore;

mod common;
use common::*;

#[tokio::test]
async fn first_store_with_a_document_wins() {
    setup_test_env();
    let primary = ScriptedStore::holding("primary", sample_document());
    let secondary = ScriptedStore::holding("secondary", default_document());

    let (document, source) = chain(&[primary.clone(), secondary.clone()])
        .load_with_source()
        .await;

    assert_eq!(source, LoadSource::Store("primary".to_string()));
    assert_eq!(document.teams[0].name, "North");
    assert_eq!(secondary.loads.load(Ordering::SeqCst), 0);
    assert_eq!(primary.save_count(), 0);
}

#[tokio::test]
async fn lower_tier_result_is_promoted_into_empty_and_failing_tiers() {
    setup_test_env();
    let empty = ScriptedStore::empty("cache");
    // Reads fail but writes are accepted
    let flaky = ScriptedStore::empty("database");
    flaky.fail_loads(true);
    let file = ScriptedStore::holding("file", sample_document());

    let (document, source) = chain(&[empty.clone(), flaky.clone(), file.clone()])
        .load_with_source()
        .await;

    assert_eq!(source, LoadSource::Store("file".to_string()));
    assert_eq!(empty.stored(), Some(document.clone()));
    assert_eq!(flaky.stored(), Some(document));
    assert_eq!(file.save_count(), 0);
}

#[tokio::test]
async fn promotion_skips_stores_that_refuse_writes() {
    setup_test_env();
    let down = ScriptedStore::offline("cache");
    let file = ScriptedStore::holding("file", sample_document());

    let document = chain(&[down.clone(), file.clone()]).load().await;

    assert_eq!(document.teams.len(), 2);
    assert_eq!(down.stored(), None);
}

#[tokio::test]
async fn every_store_unavailable_yields_defaults() {
    setup_test_env();
    let a = ScriptedStore::offline("cache");
    let b = ScriptedStore::offline("database");

    let (document, source) = chain(&[a, b]).load_with_source().await;

    assert_eq!(source, LoadSource::Defaults);
    assert_eq!(document.teams.len(), 8);
    assert!(document.matches.is_empty());
    assert!(document.news.is_empty());
    assert!(document.tots.is_empty());
    assert!(document.last_update.is_some());
}

#[tokio::test]
async fn defaults_are_promoted_into_every_empty_store() {
    setup_test_env();
    let cache = ScriptedStore::empty("cache");
    let file = ScriptedStore::empty("file");

    let document = chain(&[cache.clone(), file.clone()]).load().await;

    assert_eq!(cache.stored(), Some(document.clone()));
    assert_eq!(file.stored(), Some(document));

    // The next load is served by the fastest tier
    let (_, source) = chain(&[cache, file]).load_with_source().await;
    assert_eq!(source, LoadSource::Store("cache".to_string()));
}

#[tokio::test]
async fn custom_defaults_replace_the_compiled_seed() {
    let store = TieredStore::new(vec![]).with_defaults(sample_document);
    let document = store.load().await;
    assert_eq!(document.teams[1].name, "South");
}

#[tokio::test]
async fn save_writes_only_the_first_healthy_store() {
    setup_test_env();
    let cache = ScriptedStore::empty("cache");
    let file = ScriptedStore::empty("file");
    let store = chain(&[cache.clone(), file.clone()]);

    let mut document = sample_document();
    let target = store.save(&mut document).await.unwrap();

    assert_eq!(target, "cache");
    assert!(document.last_update.is_some());
    assert_eq!(cache.stored(), Some(document));
    // No fan-out to lower tiers
    assert_eq!(file.stored(), None);
}

#[tokio::test]
async fn save_falls_through_to_the_next_store() {
    setup_test_env();
    let cache = ScriptedStore::empty("cache");
    cache.fail_saves(true);
    let file = ScriptedStore::empty("file");
    let store = chain(&[cache.clone(), file.clone()]);

    let mut document = sample_document();
    let target = store.save(&mut document).await.unwrap();

    assert_eq!(target, "file");
    assert_eq!(file.stored(), Some(document));
    assert_eq!(cache.stored(), None);
}

#[tokio::test]
async fn save_fails_with_persistence_error_when_every_store_fails() {
    setup_test_env();
    let store = chain(&[ScriptedStore::offline("cache"), ScriptedStore::offline("file")]);

    let mut document = sample_document();
    let result = store.save(&mut document).await;

    assert!(matches!(result, Err(LeagueError::Persistence(_))));
}

#[tokio::test]
async fn empty_chain_cannot_save() {
    let store = TieredStore::new(vec![]);
    let mut document = sample_document();
    assert!(matches!(
        store.save(&mut document).await,
        Err(LeagueError::Persistence(_))
    ));
}

#[tokio::test]
async fn save_stamps_a_fresh_timestamp() {
    let cache = ScriptedStore::empty("cache");
    let store = chain(&[cache]);

    let mut document = sample_document();
    let before = chrono::Utc::now();
    store.save(&mut document).await.unwrap();

    assert!(document.last_update.unwrap() >= before);
}

/// Two callers that load, mutate and save independently: the later save
/// wins and the earlier caller's change is gone.
#[tokio::test]
async fn interleaved_cycles_lose_the_first_update() {
    setup_test_env();
    let shared = ScriptedStore::holding("database", sample_document());
    let store = chain(&[shared.clone()]);

    let mut first = store.load().await;
    let mut second = store.load().await;

    first.teams[0].name = "Renamed by first".to_string();
    second.rounds[0].name = "Renamed by second".to_string();

    store.save(&mut first).await.unwrap();
    store.save(&mut second).await.unwrap();

    let stored = shared.stored().unwrap();
    assert_eq!(stored.rounds[0].name, "Renamed by second");
    assert_eq!(stored.teams[0].name, "North");
}

#[tokio::test]
async fn real_backends_chain_together() {
    setup_test_env();
    let db = TestDb::new().await.expect("Failed to create test database");
    let snapshot = TestSnapshot::new().expect("Failed to create snapshot dir");

    let cache = CacheStore::new(4);
    let stores: Vec<Arc<dyn LeagueStore>> = vec![
        Arc::new(cache.clone()),
        Arc::new(db.store.clone()),
        Arc::new(snapshot.store.clone()),
    ];

    // Only the snapshot holds data to begin with
    let mut seeded = sample_document();
    seeded.last_update = Some(chrono::Utc::now());
    snapshot.store.try_save(&seeded).await.unwrap();

    let (document, source) = TieredStore::new(stores).load_with_source().await;
    assert_eq!(source, LoadSource::Store("file".to_string()));
    assert_eq!(document, seeded);

    assert_eq!(cache.try_load().await.unwrap(), Some(seeded.clone()));
    assert_eq!(db.store.try_load().await.unwrap(), Some(seeded));
}

#[tokio::test]
async fn offline_cache_falls_back_to_database() {
    setup_test_env();
    let db = TestDb::new().await.expect("Failed to create test database");
    let cache = CacheStore::new(4);
    cache.set_online(false);

    let stores: Vec<Arc<dyn LeagueStore>> =
        vec![Arc::new(cache.clone()), Arc::new(db.store.clone())];
    let store = TieredStore::new(stores);
    let mut document = sample_document();
    assert_eq!(store.save(&mut document).await.unwrap(), "database");

    let (loaded, source) = store.load_with_source().await;
    assert_eq!(source, LoadSource::Store("database".to_string()));
    assert_eq!(loaded, document);
}
