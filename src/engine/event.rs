//! Outcome events.
//!
//! Every engine operation reports what happened as data. The presentation
//! layer re-renders from them and the feedback layer plays cues keyed by
//! [`OutcomeKind::cue`]. Neither feeds anything back into the engine.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::items::ItemId;

/// Events produced by a single operation, in order.
///
/// The first is the operation's own outcome; a second appears only when it
/// triggered a transition (`Correct` then `LevelComplete`, `Incorrect`
/// then `GameOver`).
pub type Events = SmallVec<[OutcomeEvent; 2]>;

/// What kind of outcome occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// A round started.
    Started,
    /// The submitted item matched the expected one.
    Correct,
    /// The submitted item did not match; a life was lost.
    Incorrect,
    /// Every position of the level's sequence was satisfied.
    LevelComplete,
    /// The game ended; state has been reset to idle.
    GameOver,
    /// The game was reset by the player.
    Reset,
}

/// Audio/feedback cue keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackCue {
    Start,
    Success,
    Failure,
    Fanfare,
    Defeat,
    Neutral,
}

impl OutcomeKind {
    /// Cue the feedback layer should play for this outcome.
    #[must_use]
    pub fn cue(&self) -> FeedbackCue {
        match self {
            OutcomeKind::Started => FeedbackCue::Start,
            OutcomeKind::Correct => FeedbackCue::Success,
            OutcomeKind::Incorrect => FeedbackCue::Failure,
            OutcomeKind::LevelComplete => FeedbackCue::Fanfare,
            OutcomeKind::GameOver => FeedbackCue::Defeat,
            OutcomeKind::Reset => FeedbackCue::Neutral,
        }
    }
}

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Lives reached zero.
    OutOfLives,
    /// The countdown expired.
    TimeUp,
}

impl GameOverReason {
    /// Player-facing message.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            GameOverReason::OutOfLives => "Game Over! Restarting.",
            GameOverReason::TimeUp => "Time's up! Game over.",
        }
    }
}

/// A single outcome, with the state it left behind.
///
/// `level`, `lives` and `score` describe the game the event belongs to:
/// for `LevelComplete` the completed level, for `GameOver` the final
/// values before the reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeEvent {
    pub kind: OutcomeKind,
    pub level: u32,
    pub lives: u32,
    /// Present only when scoring is enabled.
    pub score: Option<u64>,
    /// Player-facing message.
    pub message: String,
    /// The submitted item, for attempt outcomes.
    pub item: Option<ItemId>,
    /// Set on `GameOver` only.
    pub reason: Option<GameOverReason>,
}

impl OutcomeEvent {
    /// Create an event with a kind and message (builder pattern for the rest).
    pub fn new(kind: OutcomeKind, level: u32, lives: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            level,
            lives,
            score: None,
            message: message.into(),
            item: None,
            reason: None,
        }
    }

    #[must_use]
    pub fn with_score(mut self, score: Option<u64>) -> Self {
        self.score = score;
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: ItemId) -> Self {
        self.item = Some(item);
        self
    }

    #[must_use]
    pub fn with_reason(mut self, reason: GameOverReason) -> Self {
        self.reason = Some(reason);
        self
    }

    /// Whether this event ended the game.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.kind == OutcomeKind::GameOver
    }
}
