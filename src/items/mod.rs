//! Items, item pools and item sources.
//!
//! - [`Item`] / [`ItemId`]: immutable game tokens
//! - [`ItemPool`]: normalized, uniquely-keyed snapshot the engine plays from
//! - [`ItemSource`]: where pools come from (in-memory, JSON, parallel lists)

mod item;
mod pool;
mod source;

pub use item::{Item, ItemId};
pub use pool::ItemPool;
pub use source::{ItemSource, JsonSource, ParallelListSource, StaticSource};
