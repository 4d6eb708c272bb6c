use crate::minigame::ChallengeSpec;
use crate::rooms::CoreId;
use crate::state::{ItemRecord, KnowledgeRecord, Language, RoomIndex};

/// Read-only game content: the knowledge codex, item definitions, mini-game
/// challenges and room metadata.
pub trait ContentOracle: Send + Sync {
    /// Every knowledge record in display order.
    fn knowledge_catalog(&self) -> Vec<KnowledgeRecord>;

    fn item(&self, id: &str) -> Option<ItemRecord>;

    /// Challenge bound to `core`, if one exists.
    fn challenge(&self, core: CoreId) -> Option<ChallengeSpec>;

    fn room(&self, room: RoomIndex) -> Option<RoomInfo>;
}

/// Bilingual room name and tagline.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomInfo {
    pub name: String,
    pub name_vi: String,
    pub description: String,
    pub description_vi: String,
}

impl RoomInfo {
    pub fn name(&self, language: Language) -> &str {
        language.pick(&self.name, &self.name_vi)
    }

    pub fn description(&self, language: Language) -> &str {
        language.pick(&self.description, &self.description_vi)
    }
}
