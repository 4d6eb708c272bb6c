//! Room metadata loader.

use std::path::Path;

use escape_core::RoomInfo;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Room catalog structure for RON files. Entries are listed in room order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCatalog {
    pub rooms: Vec<RoomInfo>,
}

pub struct RoomLoader;

impl RoomLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<RoomInfo>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<RoomInfo>> {
        let catalog: RoomCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse room catalog RON: {}", e))?;

        Ok(catalog.rooms)
    }
}
