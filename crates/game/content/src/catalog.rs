//! In-memory content catalog.

use escape_core::{
    ChallengeSpec, ContentOracle, CoreId, ItemRecord, KnowledgeRecord, RoomIndex, RoomInfo,
};

/// All content for one game: knowledge, items, challenges and room metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    knowledge: Vec<KnowledgeRecord>,
    items: Vec<ItemRecord>,
    challenges: Vec<ChallengeSpec>,
    rooms: Vec<RoomInfo>,
}

impl Catalog {
    pub fn new(
        knowledge: Vec<KnowledgeRecord>,
        items: Vec<ItemRecord>,
        challenges: Vec<ChallengeSpec>,
        rooms: Vec<RoomInfo>,
    ) -> Self {
        Self {
            knowledge,
            items,
            challenges,
            rooms,
        }
    }

    /// Content bundled with the crate (`data/*.ron`), with challenge
    /// defaults from the bundled `config.toml`.
    #[cfg(feature = "loaders")]
    pub fn builtin() -> crate::loaders::LoadResult<Self> {
        Self::builtin_with(&crate::loaders::ConfigLoader::builtin()?)
    }

    /// Bundled content with challenge defaults taken from `config`.
    #[cfg(feature = "loaders")]
    pub fn builtin_with(config: &escape_core::GameConfig) -> crate::loaders::LoadResult<Self> {
        use crate::loaders::{ChallengeLoader, ItemLoader, KnowledgeLoader, RoomLoader};

        let catalog = Self::new(
            KnowledgeLoader::parse(include_str!("../data/knowledge.ron"))?,
            ItemLoader::parse(include_str!("../data/items.ron"))?,
            ChallengeLoader::parse(include_str!("../data/challenges.ron"), config)?,
            RoomLoader::parse(include_str!("../data/rooms.ron"))?,
        );
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn knowledge(&self) -> &[KnowledgeRecord] {
        &self.knowledge
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn challenges(&self) -> &[ChallengeSpec] {
        &self.challenges
    }

    pub fn rooms(&self) -> &[RoomInfo] {
        &self.rooms
    }

    /// Cores that have no challenge and therefore can never be unlocked in play.
    pub fn cores_without_challenge(&self) -> Vec<CoreId> {
        CoreId::MACHINE
            .into_iter()
            .chain(CoreId::DEVICE)
            .filter(|core| self.challenge_for(*core).is_none())
            .collect()
    }

    fn challenge_for(&self, core: CoreId) -> Option<&ChallengeSpec> {
        self.challenges.iter().find(|spec| spec.core == core)
    }

    /// Checks ids are unique, every core has a non-empty challenge and every
    /// room has metadata.
    #[cfg(feature = "loaders")]
    pub fn validate(&self) -> crate::loaders::LoadResult<()> {
        use std::collections::BTreeSet;

        let mut seen = BTreeSet::new();
        for record in &self.knowledge {
            anyhow::ensure!(
                seen.insert(record.id.as_str()),
                "duplicate knowledge id '{}'",
                record.id
            );
        }

        let mut seen = BTreeSet::new();
        for item in &self.items {
            anyhow::ensure!(
                seen.insert(item.id.as_str()),
                "duplicate item id '{}'",
                item.id
            );
        }

        let mut seen = BTreeSet::new();
        for spec in &self.challenges {
            anyhow::ensure!(
                seen.insert(spec.core),
                "core '{}' has more than one challenge",
                spec.core
            );
            anyhow::ensure!(
                !spec.questions.is_empty(),
                "challenge for '{}' has no questions",
                spec.core
            );
        }

        let missing = self.cores_without_challenge();
        anyhow::ensure!(
            missing.is_empty(),
            "cores without a challenge: {:?}",
            missing
        );
        anyhow::ensure!(
            self.rooms.len() == escape_core::GameConfig::ROOM_COUNT,
            "expected {} rooms, found {}",
            escape_core::GameConfig::ROOM_COUNT,
            self.rooms.len()
        );
        Ok(())
    }
}

impl ContentOracle for Catalog {
    fn knowledge_catalog(&self) -> Vec<KnowledgeRecord> {
        self.knowledge.clone()
    }

    fn item(&self, id: &str) -> Option<ItemRecord> {
        self.items.iter().find(|item| item.id == id).cloned()
    }

    fn challenge(&self, core: CoreId) -> Option<ChallengeSpec> {
        self.challenge_for(core).cloned()
    }

    fn room(&self, room: RoomIndex) -> Option<RoomInfo> {
        self.rooms.get(room.index()).cloned()
    }
}

#[cfg(all(test, feature = "loaders"))]
mod tests {
    use super::*;
    use escape_core::{ChallengeMode, GameState, Language};

    #[test]
    fn builtin_catalog_is_complete() {
        let catalog = Catalog::builtin().unwrap();

        assert_eq!(catalog.knowledge().len(), 10);
        assert!(catalog.item("room1-key").is_some());
        assert!(catalog.item("socialist-theory").is_some());
        assert!(catalog.cores_without_challenge().is_empty());
        assert_eq!(
            catalog
                .room(RoomIndex::THEORY)
                .map(|info| info.name(Language::Vi).to_owned()),
            Some("Lý Thuyết Xã Hội".to_owned())
        );
    }

    #[test]
    fn builtin_challenges_carry_their_timings() {
        let catalog = Catalog::builtin().unwrap();

        let justice = catalog.challenge(CoreId::Justice).unwrap();
        assert_eq!(
            justice.mode,
            ChallengeMode::Timed {
                time_limit_secs: 150,
                penalty_secs: 5
            }
        );
        let quiz = catalog.challenge(CoreId::StatePower).unwrap();
        assert_eq!(quiz.mode, ChallengeMode::Scored { pass_percent: 60 });
        assert!(quiz.questions[0].accepts("Working class political rule during transition"));
        assert!(quiz.questions[0].explanation_vi.is_some());
    }

    #[test]
    fn builtin_challenges_follow_configured_defaults() {
        let config = escape_core::GameConfig {
            quiz_pass_percent: 100,
            timed_limit_secs: 60,
            timed_penalty_secs: 10,
            ..Default::default()
        };
        let catalog = Catalog::builtin_with(&config).unwrap();

        assert_eq!(
            catalog.challenge(CoreId::ClassStruggle).unwrap().mode,
            ChallengeMode::Scored { pass_percent: 100 }
        );
        assert_eq!(
            catalog.challenge(CoreId::Innovation).unwrap().mode,
            ChallengeMode::Timed {
                time_limit_secs: 60,
                penalty_secs: 10
            }
        );
        // Per-challenge overrides still win.
        assert_eq!(
            catalog.challenge(CoreId::Digital).unwrap().mode,
            ChallengeMode::Timed {
                time_limit_secs: 60,
                penalty_secs: 0
            }
        );
    }

    #[test]
    fn game_state_starts_with_undiscovered_codex() {
        let catalog = Catalog::builtin().unwrap();
        let state = GameState::from_oracle(&catalog);
        assert_eq!(state.knowledge.records().len(), 10);
        assert_eq!(state.knowledge.found_count(), 0);
    }

    #[test]
    fn validation_rejects_duplicate_knowledge() {
        let mut catalog = Catalog::builtin().unwrap();
        catalog.knowledge.push(catalog.knowledge[0].clone());
        assert!(catalog.validate().is_err());
    }
}
