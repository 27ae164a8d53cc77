//! Render instructions for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::items::{Item, ItemId};

/// Whether a round is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnginePhase {
    #[default]
    Idle,
    Playing,
}

/// Title shown while no round is in progress.
pub const IDLE_TITLE: &str = "Arrange the Items";

/// Everything the view needs to draw the current state.
///
/// `display_order` is the visual placement order, never the target order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderInstruction {
    pub phase: EnginePhase,
    /// Items of the current level in visual placement order.
    pub display_order: Vec<ItemId>,
    /// Items already satisfied this level; the view hides them.
    pub placed: Vec<ItemId>,
    /// The item the player must place next.
    pub current_prompt: Option<Item>,
    /// "Arrange: <name>" while playing, [`IDLE_TITLE`] otherwise.
    pub title: String,
    pub level: u32,
    pub lives: u32,
    /// Present only when scoring is enabled.
    pub score: Option<u64>,
    /// Whole seconds left, in timed variants.
    pub time_left: Option<u32>,
}

impl RenderInstruction {
    /// Title text for a prompt item.
    #[must_use]
    pub fn title_for(prompt: Option<&Item>) -> String {
        match prompt {
            Some(item) => format!("Arrange: {}", item.display_name),
            None => IDLE_TITLE.to_string(),
        }
    }
}
