//! Progression engine: the state machine that owns Round State.
//!
//! The engine is driven by exactly three kinds of input from the host:
//! - `start_round` / `reset_game` (player buttons)
//! - `submit_attempt` (an item released over the target zone)
//! - `poll_timer` / `on_time_expired` (timed variants)
//!
//! It answers with [`OutcomeEvent`]s for the feedback layer and a
//! [`RenderInstruction`] for the view. It never calls into either.

mod event;
mod progression;
mod render;

pub use event::{Events, FeedbackCue, GameOverReason, OutcomeEvent, OutcomeKind};
pub use progression::{EngineSnapshot, ProgressionEngine};
pub use render::{EnginePhase, RenderInstruction, IDLE_TITLE};
