//! Items - the tokens the player arranges.
//!
//! An `Item` is immutable once loaded. The engine only ever refers to
//! items by [`ItemId`]; display names and asset references are carried
//! through to the presentation and feedback layers untouched.

use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier for an item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new item ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthesized id for the item at `index` of a list-shaped source.
    #[must_use]
    pub fn indexed(index: usize) -> Self {
        Self(format!("item-{index}"))
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Item documents in the wild use both string and numeric ids; both
/// normalize to the string form.
fn string_or_number_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ItemId, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => ItemId(s),
        RawId::Number(n) => ItemId(n.to_string()),
    })
}

/// A game token with a display name and asset references.
///
/// ## Example
///
/// ```
/// use sequence_engine::items::{Item, ItemId};
///
/// let apple = Item::new("apple", "Apple", "img/apple.png")
///     .with_audio("audio/apple.mp3");
///
/// assert_eq!(apple.id, ItemId::new("apple"));
/// assert_eq!(apple.audio_ref.as_deref(), Some("audio/apple.mp3"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier.
    #[serde(deserialize_with = "string_or_number_id")]
    pub id: ItemId,

    /// Name shown in the prompt ("Arrange: <name>").
    #[serde(alias = "name")]
    pub display_name: String,

    /// Visual asset reference (image path or URL).
    #[serde(alias = "image")]
    pub visual_ref: String,

    /// Optional audio cue for this item.
    #[serde(alias = "audio", default, skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<String>,
}

impl Item {
    /// Create a new item without audio.
    #[must_use]
    pub fn new(
        id: impl Into<ItemId>,
        display_name: impl Into<String>,
        visual_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            visual_ref: visual_ref.into(),
            audio_ref: None,
        }
    }

    /// Attach an audio reference (builder pattern).
    #[must_use]
    pub fn with_audio(mut self, audio_ref: impl Into<String>) -> Self {
        self.audio_ref = Some(audio_ref.into());
        self
    }
}
