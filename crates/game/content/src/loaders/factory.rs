//! Content factory for building a catalog from data files.

use std::path::{Path, PathBuf};

use escape_core::GameConfig;

use crate::catalog::Catalog;
use crate::loaders::{
    ChallengeLoader, ConfigLoader, ItemLoader, KnowledgeLoader, LoadResult, RoomLoader,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── knowledge.ron
/// ├── items.ron
/// ├── challenges.ron
/// └── rooms.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load every catalog file with challenge defaults from this
    /// directory's `config.toml`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        self.load_catalog_with(&self.load_config()?)
    }

    /// Load every catalog file and validate the result.
    pub fn load_catalog_with(&self, config: &GameConfig) -> LoadResult<Catalog> {
        let catalog = Catalog::new(
            KnowledgeLoader::load(&self.data_dir.join("knowledge.ron"))?,
            ItemLoader::load(&self.data_dir.join("items.ron"))?,
            ChallengeLoader::load(&self.data_dir.join("challenges.ron"), config)?,
            RoomLoader::load(&self.data_dir.join("rooms.ron"))?,
        );
        catalog.validate()?;
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
