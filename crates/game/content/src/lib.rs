//! Game content and loaders.
//!
//! This crate houses the static content of the escape game and loaders for
//! the RON/TOML files that describe it:
//! - Knowledge codex (bilingual entries unlocked by puzzles)
//! - Item catalog (items granted by terminal room actions)
//! - Mini-game challenges bound to cores
//! - Room names and taglines
//! - Game configuration (TOML)
//!
//! Content is served to the engine through [`escape_core::ContentOracle`] and
//! never changes during a session.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::Catalog;

#[cfg(feature = "loaders")]
pub use loaders::{
    ChallengeLoader, ConfigLoader, ContentFactory, ItemLoader, KnowledgeLoader, LoadResult,
    RoomLoader,
};
