//! Item sources.
//!
//! An [`ItemSource`] supplies the ordered list of candidate items. Sources
//! come in two shapes: a list of item records, or parallel lists of names
//! and asset paths whose ids are synthesized as `item-<index>`. Both are
//! normalized to `Vec<Item>` before the engine sees them.

use std::path::{Path, PathBuf};

use super::item::{Item, ItemId};
use crate::error::SourceError;

/// Supplier of candidate items.
///
/// `fetch` may be called more than once (see `PoolPolicy`), and each call
/// returns a fresh snapshot.
pub trait ItemSource {
    /// Fetch the current list of items, in the source's order.
    fn fetch(&mut self) -> Result<Vec<Item>, SourceError>;
}

impl<S: ItemSource + ?Sized> ItemSource for Box<S> {
    fn fetch(&mut self) -> Result<Vec<Item>, SourceError> {
        (**self).fetch()
    }
}

/// In-memory item list.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    items: Vec<Item>,
}

impl StaticSource {
    /// Create a source that always serves `items`.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl ItemSource for StaticSource {
    fn fetch(&mut self) -> Result<Vec<Item>, SourceError> {
        Ok(self.items.clone())
    }
}

#[derive(Clone, Debug)]
enum JsonOrigin {
    File(PathBuf),
    Text(String),
}

/// JSON array of item records.
///
/// Accepts both `{id, displayName, visualRef, audioRef?}` and the
/// asset-manifest spelling `{id, name, image, audio?}`.
///
/// ## Example
///
/// ```
/// use sequence_engine::items::{ItemSource, JsonSource};
///
/// let mut source = JsonSource::from_text(
///     r#"[{"id":"a","name":"Apple","image":"a.png"}]"#,
/// );
/// let items = source.fetch().unwrap();
/// assert_eq!(items[0].display_name, "Apple");
/// ```
#[derive(Clone, Debug)]
pub struct JsonSource {
    origin: JsonOrigin,
}

impl JsonSource {
    /// Read items from a JSON file on every fetch.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            origin: JsonOrigin::File(path.as_ref().to_path_buf()),
        }
    }

    /// Parse items from an in-memory document on every fetch.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            origin: JsonOrigin::Text(text.into()),
        }
    }
}

impl ItemSource for JsonSource {
    fn fetch(&mut self) -> Result<Vec<Item>, SourceError> {
        let items: Vec<Item> = match &self.origin {
            JsonOrigin::File(path) => {
                let text = std::fs::read_to_string(path)?;
                serde_json::from_str(&text)?
            }
            JsonOrigin::Text(text) => serde_json::from_str(text)?,
        };
        log::debug!("Fetched {} items from JSON source", items.len());
        Ok(items)
    }
}

/// Parallel lists of names and asset paths.
///
/// Item `i` is `{ id: "item-i", display_name: names[i], visual_ref: assets[i] }`.
#[derive(Clone, Debug, Default)]
pub struct ParallelListSource {
    names: Vec<String>,
    assets: Vec<String>,
    audio: Option<Vec<String>>,
}

impl ParallelListSource {
    /// Create a source from display names and visual asset paths.
    pub fn new<N, A>(names: N, assets: A) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            assets: assets.into_iter().map(Into::into).collect(),
            audio: None,
        }
    }

    /// Attach a third parallel list of audio references (builder pattern).
    #[must_use]
    pub fn with_audio<U>(mut self, audio: U) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
    {
        self.audio = Some(audio.into_iter().map(Into::into).collect());
        self
    }
}

impl ItemSource for ParallelListSource {
    fn fetch(&mut self) -> Result<Vec<Item>, SourceError> {
        if self.names.len() != self.assets.len() {
            return Err(SourceError::MismatchedLists {
                names: self.names.len(),
                assets: self.assets.len(),
            });
        }
        if let Some(audio) = &self.audio {
            if audio.len() != self.names.len() {
                return Err(SourceError::MismatchedLists {
                    names: self.names.len(),
                    assets: audio.len(),
                });
            }
        }

        Ok(self
            .names
            .iter()
            .zip(&self.assets)
            .enumerate()
            .map(|(i, (name, asset))| Item {
                id: ItemId::indexed(i),
                display_name: name.clone(),
                visual_ref: asset.clone(),
                audio_ref: self.audio.as_ref().map(|a| a[i].clone()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_returns_copy() {
        let mut source = StaticSource::new(vec![Item::new("a", "A", "a.png")]);
        let first = source.fetch().unwrap();
        let second = source.fetch().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_json_text_source() {
        let mut source = JsonSource::from_text(
            r#"[
                {"id":"a","name":"Apple","image":"a.png"},
                {"id":"b","displayName":"Banana","visualRef":"b.png","audioRef":"b.mp3"}
            ]"#,
        );
        let items = source.fetch().unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].audio_ref.as_deref(), Some("b.mp3"));
    }

    #[test]
    fn test_json_parse_error() {
        let mut source = JsonSource::from_text("{not json");
        assert!(matches!(source.fetch(), Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_json_missing_file() {
        let mut source = JsonSource::from_path("/nonexistent/items.json");
        assert!(matches!(source.fetch(), Err(SourceError::Io(_))));
    }

    #[test]
    fn test_parallel_lists_synthesize_ids() {
        let mut source = ParallelListSource::new(["Cat", "Dog"], ["cat.png", "dog.png"]);
        let items = source.fetch().unwrap();

        assert_eq!(items[0].id, ItemId::new("item-0"));
        assert_eq!(items[1].id, ItemId::new("item-1"));
        assert_eq!(items[1].display_name, "Dog");
        assert_eq!(items[1].visual_ref, "dog.png");
        assert!(items[0].audio_ref.is_none());
    }

    #[test]
    fn test_parallel_lists_with_audio() {
        let mut source = ParallelListSource::new(["Cat"], ["cat.png"]).with_audio(["meow.mp3"]);
        let items = source.fetch().unwrap();
        assert_eq!(items[0].audio_ref.as_deref(), Some("meow.mp3"));
    }

    #[test]
    fn test_parallel_lists_mismatch() {
        let mut source = ParallelListSource::new(["Cat", "Dog"], ["cat.png"]);
        assert!(matches!(
            source.fetch(),
            Err(SourceError::MismatchedLists { names: 2, assets: 1 })
        ));
    }

    #[test]
    fn test_boxed_source() {
        let mut source: Box<dyn ItemSource> =
            Box::new(StaticSource::new(vec![Item::new("a", "A", "a.png")]));
        assert_eq!(source.fetch().unwrap().len(), 1);
    }
}
