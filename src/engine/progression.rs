//! The progression engine.
//!
//! Owns Round State and decides every transition:
//!
//! ```text
//! Idle --start_round--> Playing --correct--> Playing (next index)
//!                          |   --last correct--> LevelComplete --> Playing (level + 1)
//!                          |   --incorrect--> LifeLost --> Playing (same index)
//!                          |   --last life / time up--> GameOver --> Idle
//!   any --reset_game--> Idle
//! ```
//!
//! Operations run to completion one at a time (`&mut self`). Each returns
//! the events it produced; the engine never calls into the view.

use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use super::event::{Events, GameOverReason, OutcomeEvent, OutcomeKind};
use super::render::{EnginePhase, RenderInstruction};
use crate::core::{EngineConfig, GameRngState, PoolPolicy, RoundState, ScoreRule};
use crate::error::{EngineError, Rejection};
use crate::items::{ItemId, ItemPool, ItemSource};
use crate::sequence::{item_count_for_level, LevelSequence, SequenceGenerator};
use crate::timer::{Clock, SystemClock, TimerController};

const STARTED_MESSAGE: &str = "Game Started! Arrange the items in the correct order.";
const RESET_MESSAGE: &str = "Game Reset! Press Start to begin.";
const CORRECT_MESSAGE: &str = "Correct!";

/// Serializable engine state: Round State plus the RNG position.
///
/// The countdown is not captured; restoring a playing snapshot in a timed
/// configuration arms a fresh one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub state: RoundState,
    pub rng: GameRngState,
}

impl EngineSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Game progression engine.
///
/// ## Example
///
/// ```
/// use sequence_engine::core::EngineConfig;
/// use sequence_engine::engine::{OutcomeKind, ProgressionEngine};
/// use sequence_engine::items::{Item, StaticSource};
///
/// let source = StaticSource::new(vec![
///     Item::new("a", "Alpha", "a.png"),
///     Item::new("b", "Beta", "b.png"),
///     Item::new("c", "Gamma", "c.png"),
/// ]);
/// let mut engine = ProgressionEngine::new(EngineConfig::default(), source).unwrap();
/// engine.start_round().unwrap();
///
/// let target = engine.state().sequence.clone().unwrap().target;
/// for id in &target {
///     engine.submit_attempt(id).unwrap();
/// }
/// assert_eq!(engine.state().level, 2);
/// ```
pub struct ProgressionEngine<S, C = SystemClock> {
    config: EngineConfig,
    source: S,
    pool: Option<ItemPool>,
    generator: SequenceGenerator,
    state: RoundState,
    timer: TimerController<C>,
}

impl<S: ItemSource> ProgressionEngine<S, SystemClock> {
    /// Create an idle engine using the wall clock.
    pub fn new(config: EngineConfig, source: S) -> Result<Self, EngineError> {
        Self::with_clock(config, source, SystemClock::new())
    }
}

impl<S: ItemSource, C: Clock> ProgressionEngine<S, C> {
    /// Create an idle engine reading time from `clock`.
    pub fn with_clock(config: EngineConfig, source: S, clock: C) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            generator: SequenceGenerator::new(config.seed),
            state: RoundState::new(&config),
            timer: TimerController::new(clock),
            pool: None,
            source,
            config,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        if self.state.started {
            EnginePhase::Playing
        } else {
            EnginePhase::Idle
        }
    }

    /// The cached pool, if one has been loaded.
    #[must_use]
    pub fn pool(&self) -> Option<&ItemPool> {
        self.pool.as_ref()
    }

    #[must_use]
    pub fn timer(&self) -> &TimerController<C> {
        &self.timer
    }

    // === Operations ===

    /// Fetch and validate the item pool ahead of the first round.
    ///
    /// With [`PoolPolicy::Cached`] later calls reuse the loaded pool.
    pub fn load_pool(&mut self) -> Result<&ItemPool, EngineError> {
        let pool = self.ensure_pool()?;
        Ok(self.pool.insert(pool))
    }

    /// Start a round at level 1.
    ///
    /// A no-op (no events) while a round is already in progress. On a
    /// source or configuration failure the engine stays idle.
    pub fn start_round(&mut self) -> Result<Events, EngineError> {
        if self.state.started {
            log::debug!("Start ignored: round already in progress");
            return Ok(Events::new());
        }

        let pool = self.ensure_pool()?;
        let sequence = self.generator.generate_level(&pool, 1, self.config.min_items)?;

        let mut state = RoundState::new(&self.config);
        state.begin_level(sequence);
        state.started = true;
        self.state = state;

        if self.config.timed {
            self.timer.start(self.config.time_limit_secs());
        }

        log::info!(
            "Round started: {} of {} items, {} lives",
            self.state.sequence_len(),
            pool.len(),
            self.state.lives
        );
        Ok(smallvec![self.event(OutcomeKind::Started, STARTED_MESSAGE)])
    }

    /// Submit an item for the next position in the target sequence.
    ///
    /// Attempts while idle, for items not in the current level, for items
    /// already placed, or past the end of the sequence are rejected with
    /// [`EngineError::InvariantViolation`] and change nothing.
    ///
    /// An attempt arriving after the countdown ran out is not judged: the
    /// expiry is applied first and its GameOver events are returned.
    pub fn submit_attempt(&mut self, item: &ItemId) -> Result<Events, EngineError> {
        if self.state.started {
            if let Some(generation) = self.timer.poll() {
                log::debug!("Countdown {} expired before attempt {}", generation, item);
                return self.on_time_expired();
            }
        }

        let Some(sequence) = self.state.sequence.as_ref().filter(|_| self.state.started) else {
            return Err(Self::reject(Rejection::NotPlaying));
        };
        if !sequence.contains(item) {
            return Err(Self::reject(Rejection::UnknownItem(item.clone())));
        }
        if self.state.placed().contains(item) {
            return Err(Self::reject(Rejection::AlreadyPlaced(item.clone())));
        }
        let Some(expected) = self.state.expected() else {
            return Err(Self::reject(Rejection::SequenceExhausted));
        };

        if expected == item {
            self.apply_correct(item)
        } else {
            Ok(self.apply_incorrect(item))
        }
    }

    /// Countdown expiry: ends the game with [`GameOverReason::TimeUp`].
    pub fn on_time_expired(&mut self) -> Result<Events, EngineError> {
        if !self.state.started {
            return Err(Self::reject(Rejection::NotPlaying));
        }
        self.state.lives = 0;
        Ok(smallvec![self.game_over(GameOverReason::TimeUp)])
    }

    /// Check the countdown and apply its expiry, if due.
    ///
    /// Call this from the host's frame or tick loop. Returns no events
    /// unless the active countdown just expired.
    pub fn poll_timer(&mut self) -> Events {
        let Some(generation) = self.timer.poll() else {
            return Events::new();
        };
        log::debug!("Countdown {} expired", generation);
        self.on_time_expired().unwrap_or_default()
    }

    /// Return to idle with fresh Round State. Does not start a new round.
    pub fn reset_game(&mut self) -> Events {
        self.timer.cancel();
        self.state = RoundState::new(&self.config);
        self.apply_pool_policy();
        log::info!("Game reset");
        smallvec![self.event(OutcomeKind::Reset, RESET_MESSAGE)]
    }

    /// Current state for the presentation layer.
    #[must_use]
    pub fn render(&self) -> RenderInstruction {
        let current_prompt = self
            .state
            .expected()
            .and_then(|id| self.pool.as_ref()?.get(id))
            .cloned();

        RenderInstruction {
            phase: self.phase(),
            display_order: self
                .state
                .sequence
                .as_ref()
                .map(|seq| seq.display.clone())
                .unwrap_or_default(),
            placed: self.state.placed().to_vec(),
            title: RenderInstruction::title_for(current_prompt.as_ref()),
            current_prompt,
            level: self.state.level,
            lives: self.state.lives,
            score: self.score(),
            time_left: self.timer.secs_left().filter(|_| self.state.started),
        }
    }

    // === Snapshots ===

    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            state: self.state.clone(),
            rng: self.generator.rng_state(),
        }
    }

    /// Reinstate a snapshot.
    ///
    /// A playing snapshot must hold a consistent level: a sequence whose
    /// ids are all in the current pool, with no duplicates, the same subset
    /// in target and display order, the length its level calls for, and
    /// progress short of the end. Anything else is rejected and Round State
    /// is left as it was.
    pub fn restore(&mut self, snapshot: EngineSnapshot) -> Result<(), EngineError> {
        if snapshot.state.started {
            let pool = self.ensure_pool()?;
            self.check_snapshot(&snapshot.state, &pool)
                .map_err(Self::reject)?;
        }

        self.generator = SequenceGenerator::from_rng_state(&snapshot.rng);
        self.state = snapshot.state;

        if self.state.started && self.config.timed {
            self.timer.start(self.config.time_limit_secs());
        } else {
            self.timer.cancel();
        }
        log::info!(
            "Restored snapshot at level {}, started: {}",
            self.state.level,
            self.state.started
        );
        Ok(())
    }

    // === Transitions ===

    fn apply_correct(&mut self, item: &ItemId) -> Result<Events, EngineError> {
        // Generate the next level up front so a failure leaves state untouched.
        let next = if self.state.progress_index + 1 >= self.state.sequence_len() {
            Some(self.next_level_sequence()?)
        } else {
            None
        };

        self.state.record(item.clone(), true);
        self.state.progress_index += 1;
        if let Some(scoring) = self.config.scoring {
            if scoring.rule == ScoreRule::PerItem {
                let points = scoring
                    .base_per_item
                    .saturating_mul(self.config.score_multiplier());
                self.state.score = self.state.score.saturating_add(points);
            }
        }
        log::debug!(
            "Correct: {} at {}/{} on level {}",
            item,
            self.state.progress_index,
            self.state.sequence_len(),
            self.state.level
        );

        let mut events: Events =
            smallvec![self.event(OutcomeKind::Correct, CORRECT_MESSAGE).with_item(item.clone())];
        if let Some(sequence) = next {
            events.push(self.advance_level(sequence));
        }
        Ok(events)
    }

    fn apply_incorrect(&mut self, item: &ItemId) -> Events {
        self.state.record(item.clone(), false);
        self.state.lives = self.state.lives.saturating_sub(1);
        log::debug!("Incorrect: {} on level {}, {} lives left", item, self.state.level, self.state.lives);

        let message = format!("Incorrect! You have {} lives left.", self.state.lives);
        let mut events: Events =
            smallvec![self.event(OutcomeKind::Incorrect, message).with_item(item.clone())];
        if self.state.lives == 0 {
            events.push(self.game_over(GameOverReason::OutOfLives));
        }
        events
    }

    fn next_level_sequence(&mut self) -> Result<LevelSequence, EngineError> {
        let pool = self.ensure_pool()?;
        self.generator
            .generate_level(&pool, self.state.level + 1, self.config.min_items)
    }

    fn advance_level(&mut self, sequence: LevelSequence) -> OutcomeEvent {
        if let Some(scoring) = self.config.scoring {
            if scoring.rule == ScoreRule::PerLevel {
                let length = self.state.sequence_len() as u64;
                let points = scoring
                    .base_per_item
                    .saturating_mul(self.config.score_multiplier())
                    .saturating_mul(length);
                self.state.score = self.state.score.saturating_add(points);
            }
        }

        let completed = self.state.level;
        let event = self.event(
            OutcomeKind::LevelComplete,
            format!("Level {completed} complete!"),
        );

        self.state.level += 1;
        self.state.begin_level(sequence);
        if self.config.timed {
            self.timer.start(self.config.time_limit_secs());
        }

        log::info!(
            "Level {} complete, advancing to level {} ({} items)",
            completed,
            self.state.level,
            self.state.sequence_len()
        );
        event
    }

    fn game_over(&mut self, reason: GameOverReason) -> OutcomeEvent {
        let event = self
            .event(OutcomeKind::GameOver, reason.message())
            .with_reason(reason);

        log::info!(
            "Game over ({:?}) on level {} with score {}",
            reason,
            self.state.level,
            self.state.score
        );

        self.timer.cancel();
        self.state = RoundState::new(&self.config);
        self.apply_pool_policy();
        event
    }

    // === Helpers ===

    /// The cached pool, or a freshly fetched and validated one.
    fn ensure_pool(&mut self) -> Result<ItemPool, EngineError> {
        if let Some(pool) = &self.pool {
            return Ok(pool.clone());
        }

        let items = self.source.fetch().map_err(|e| {
            log::warn!("Failed to fetch items: {}", e);
            EngineError::SourceUnavailable(e)
        })?;
        let pool = ItemPool::new(items)?;
        if pool.len() < self.config.min_items {
            log::warn!(
                "Item pool too small: {} items, need {}",
                pool.len(),
                self.config.min_items
            );
            return Err(EngineError::Configuration {
                required: self.config.min_items,
                available: pool.len(),
            });
        }

        log::info!("Loaded item pool with {} items", pool.len());
        self.pool = Some(pool.clone());
        Ok(pool)
    }

    fn check_snapshot(&self, state: &RoundState, pool: &ItemPool) -> Result<(), Rejection> {
        let Some(sequence) = state.sequence.as_ref() else {
            return Err(Rejection::MissingSequence);
        };
        if let Some(missing) = sequence
            .target
            .iter()
            .chain(&sequence.display)
            .find(|id| !pool.contains(id))
        {
            return Err(Rejection::UnknownItem(missing.clone()));
        }

        let mut target = sequence.target.clone();
        target.sort();
        target.dedup();
        if target.len() != sequence.len() {
            return Err(Rejection::InvalidSnapshot("duplicate ids in target order"));
        }
        let mut display = sequence.display.clone();
        display.sort();
        if display != target {
            return Err(Rejection::InvalidSnapshot(
                "target and display orders hold different items",
            ));
        }

        let expected_len = item_count_for_level(state.level, self.config.min_items, pool.len());
        if state.level == 0 || sequence.len() != expected_len {
            return Err(Rejection::InvalidSnapshot("sequence length does not match level"));
        }
        if state.progress_index >= sequence.len() {
            return Err(Rejection::InvalidSnapshot("progress past end of sequence"));
        }
        if state.lives == 0 || state.lives > self.config.max_lives {
            return Err(Rejection::InvalidSnapshot("lives out of range"));
        }
        Ok(())
    }

    fn apply_pool_policy(&mut self) {
        if self.config.pool_policy == PoolPolicy::RefetchEachGame {
            self.pool = None;
        }
    }

    fn score(&self) -> Option<u64> {
        self.config.scoring.map(|_| self.state.score)
    }

    fn event(&self, kind: OutcomeKind, message: impl Into<String>) -> OutcomeEvent {
        OutcomeEvent::new(kind, self.state.level, self.state.lives, message).with_score(self.score())
    }

    fn reject(rejection: Rejection) -> EngineError {
        log::warn!("Ignoring operation: {}", rejection);
        EngineError::InvariantViolation(rejection)
    }
}
