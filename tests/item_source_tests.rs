//! Item source integration tests.
//!
//! Sources feeding a live engine: JSON files, parallel lists, fetch
//! failures and the pool caching policy.

use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;

use sequence_engine::core::{EngineConfig, PoolPolicy};
use sequence_engine::engine::{EnginePhase, OutcomeKind, ProgressionEngine};
use sequence_engine::error::{EngineError, SourceError};
use sequence_engine::items::{Item, ItemId, ItemSource, JsonSource, ParallelListSource};
use sequence_engine::timer::ManualClock;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Serves a fixed list, counting fetches. Fails while `offline` is set.
struct CountingSource {
    items: Vec<Item>,
    fetches: Rc<Cell<usize>>,
    offline: Rc<Cell<bool>>,
}

impl CountingSource {
    fn new(n: usize) -> Self {
        Self {
            items: (0..n)
                .map(|i| Item::new(ItemId::indexed(i), format!("Item {i}"), format!("{i}.png")))
                .collect(),
            fetches: Rc::new(Cell::new(0)),
            offline: Rc::new(Cell::new(false)),
        }
    }
}

impl ItemSource for CountingSource {
    fn fetch(&mut self) -> Result<Vec<Item>, SourceError> {
        self.fetches.set(self.fetches.get() + 1);
        if self.offline.get() {
            return Err(SourceError::Unavailable("network down".into()));
        }
        Ok(self.items.clone())
    }
}

fn engine_with<S: ItemSource>(config: EngineConfig, source: S) -> ProgressionEngine<S, ManualClock> {
    init_logging();
    ProgressionEngine::with_clock(config, source, ManualClock::new()).unwrap()
}

fn lose_game<S: ItemSource>(engine: &mut ProgressionEngine<S, ManualClock>) {
    let target = engine.state().sequence.as_ref().unwrap().target.clone();
    while engine.phase() == EnginePhase::Playing {
        engine.submit_attempt(&target[1]).unwrap();
    }
}

// =============================================================================
// JSON
// =============================================================================

#[test]
fn test_json_file_source_drives_engine() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": 1, "name": "Apple", "image": "images/apple.png"}},
            {{"id": 2, "name": "Banana", "image": "images/banana.png", "audio": "audio/banana.mp3"}},
            {{"id": "3", "name": "Cherry", "image": "images/cherry.png"}}
        ]"#
    )
    .unwrap();

    let mut engine = engine_with(EngineConfig::default(), JsonSource::from_path(file.path()));
    engine.start_round().unwrap();

    let pool = engine.pool().unwrap();
    assert_eq!(pool.len(), 3);
    let banana = pool.get(&ItemId::new("2")).unwrap();
    assert_eq!(banana.display_name, "Banana");
    assert_eq!(banana.audio_ref.as_deref(), Some("audio/banana.mp3"));
    assert!(pool.contains(&ItemId::new("1")));

    let prompt = engine.render().current_prompt.unwrap();
    assert!(pool.contains(&prompt.id));
}

#[test]
fn test_json_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = engine_with(
        EngineConfig::default(),
        JsonSource::from_path(dir.path().join("missing.json")),
    );

    let err = engine.start_round().unwrap_err();
    assert!(matches!(err, EngineError::SourceUnavailable(SourceError::Io(_))));
    assert!(err.is_start_failure());
    assert_eq!(engine.phase(), EnginePhase::Idle);
}

#[test]
fn test_json_malformed() {
    let mut engine = engine_with(EngineConfig::default(), JsonSource::from_text("[{\"id\": "));
    assert!(matches!(
        engine.start_round(),
        Err(EngineError::SourceUnavailable(SourceError::Parse(_)))
    ));
}

// =============================================================================
// Parallel lists
// =============================================================================

#[test]
fn test_parallel_lists_synthesize_ids() {
    let source = ParallelListSource::new(
        ["Red", "Green", "Blue", "Yellow"],
        ["red.png", "green.png", "blue.png", "yellow.png"],
    );
    let mut engine = engine_with(EngineConfig::default(), source);
    let pool = engine.load_pool().unwrap();

    assert_eq!(
        pool.ids(),
        vec![
            ItemId::new("item-0"),
            ItemId::new("item-1"),
            ItemId::new("item-2"),
            ItemId::new("item-3"),
        ]
    );
    assert_eq!(pool.get(&ItemId::new("item-2")).unwrap().display_name, "Blue");
}

#[test]
fn test_parallel_lists_mismatch() {
    let source = ParallelListSource::new(["Red", "Green", "Blue"], ["red.png"]);
    let mut engine = engine_with(EngineConfig::default(), source);

    assert!(matches!(
        engine.start_round(),
        Err(EngineError::SourceUnavailable(SourceError::MismatchedLists { names: 3, assets: 1 }))
    ));
}

// =============================================================================
// Pool validation
// =============================================================================

#[test]
fn test_duplicate_ids_rejected() {
    let items = vec![
        Item::new("a", "A", "a.png"),
        Item::new("b", "B", "b.png"),
        Item::new("a", "A again", "a2.png"),
    ];
    let mut engine = engine_with(
        EngineConfig::default(),
        sequence_engine::items::StaticSource::new(items),
    );

    assert!(matches!(
        engine.start_round(),
        Err(EngineError::DuplicateItem(id)) if id == ItemId::new("a")
    ));
    assert!(engine.pool().is_none());
}

#[test]
fn test_empty_pool_is_configuration_error() {
    let mut engine = engine_with(EngineConfig::default(), JsonSource::from_text("[]"));
    assert!(matches!(
        engine.start_round(),
        Err(EngineError::Configuration { required: 3, available: 0 })
    ));
}

// =============================================================================
// Fetch policy
// =============================================================================

#[test]
fn test_cached_pool_fetched_once() {
    let source = CountingSource::new(5);
    let fetches = Rc::clone(&source.fetches);
    let mut engine = engine_with(EngineConfig::default().with_max_lives(1), source);

    engine.start_round().unwrap();
    lose_game(&mut engine);
    engine.start_round().unwrap();
    engine.reset_game();
    engine.start_round().unwrap();

    assert_eq!(fetches.get(), 1);
}

#[test]
fn test_refetch_each_game() {
    let source = CountingSource::new(5);
    let fetches = Rc::clone(&source.fetches);
    let config = EngineConfig::default()
        .with_max_lives(1)
        .with_pool_policy(PoolPolicy::RefetchEachGame);
    let mut engine = engine_with(config, source);

    engine.start_round().unwrap();
    // Level advances reuse the loaded pool.
    let target = engine.state().sequence.as_ref().unwrap().target.clone();
    for id in &target {
        engine.submit_attempt(id).unwrap();
    }
    assert_eq!(fetches.get(), 1);

    lose_game(&mut engine);
    engine.start_round().unwrap();
    assert_eq!(fetches.get(), 2);

    engine.reset_game();
    engine.start_round().unwrap();
    assert_eq!(fetches.get(), 3);
}

#[test]
fn test_retry_after_source_failure() {
    let source = CountingSource::new(4);
    let offline = Rc::clone(&source.offline);
    let mut engine = engine_with(EngineConfig::default(), source);

    offline.set(true);
    assert!(engine.start_round().is_err());
    assert_eq!(engine.phase(), EnginePhase::Idle);

    offline.set(false);
    let events = engine.start_round().unwrap();
    assert_eq!(events[0].kind, OutcomeKind::Started);
    assert_eq!(engine.pool().unwrap().len(), 4);
}

#[test]
fn test_boxed_source() {
    let source: Box<dyn ItemSource> = Box::new(CountingSource::new(3));
    let mut engine = engine_with(EngineConfig::default(), source);
    assert!(engine.start_round().is_ok());
}
