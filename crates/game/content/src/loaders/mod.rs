//! Content loaders for reading game data from files.
//!
//! Each loader reads one RON/TOML file and returns plain `escape-core` types.
//! [`ContentFactory`] ties them together for a data directory.

pub mod challenges;
pub mod config;
pub mod factory;
pub mod items;
pub mod knowledge;
pub mod rooms;

pub use challenges::ChallengeLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use items::ItemLoader;
pub use knowledge::KnowledgeLoader;
pub use rooms::RoomLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
