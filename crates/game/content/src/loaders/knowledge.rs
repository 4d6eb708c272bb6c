//! Knowledge codex loader.

use std::path::Path;

use escape_core::KnowledgeRecord;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Knowledge catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeCatalog {
    pub entries: Vec<KnowledgeRecord>,
}

/// Loader for the knowledge codex from RON files.
pub struct KnowledgeLoader;

impl KnowledgeLoader {
    /// Load the codex from a RON file containing a `KnowledgeCatalog`.
    pub fn load(path: &Path) -> LoadResult<Vec<KnowledgeRecord>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<KnowledgeRecord>> {
        let catalog: KnowledgeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse knowledge catalog RON: {}", e))?;

        Ok(catalog.entries)
    }
}
