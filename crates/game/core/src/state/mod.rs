//! Authoritative progression state.
//!
//! [`GameState`] is the single source of truth for one session: global flags,
//! the navigation lock, presentation toggles, the inventory and knowledge
//! collections, and every room's puzzle sub-state. Hosts read it freely but
//! mutate it exclusively through [`GameEngine`](crate::engine::GameEngine).
pub mod delta;
pub mod types;

pub use delta::{CollectionChanges, CoreChange, Latch, StateDelta};
pub use types::{
    ExamineState, InventoryState, ItemRecord, KnowledgeRecord, KnowledgeState, Language,
    NavigationPhase, RoomIndex, UiState,
};

use crate::config::GameConfig;
use crate::env::ContentOracle;
use crate::rooms::RoomsState;

/// Canonical snapshot of a session's progression state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Number of successfully executed actions.
    pub nonce: u64,

    pub current_room: RoomIndex,

    /// Per-room completion flags. Only a reset with
    /// [`ResetPolicy::RevokeCompletion`](crate::action::ResetPolicy) clears one.
    pub rooms_completed: [bool; GameConfig::ROOM_COUNT],

    /// Latched when the badge is obtained (or through `CompleteGame`).
    pub game_complete: bool,

    pub navigation: NavigationPhase,
    pub examine: ExamineState,
    pub language: Language,
    pub ui: UiState,
    pub inventory: InventoryState,
    pub knowledge: KnowledgeState,
    pub rooms: RoomsState,
}

impl GameState {
    /// Fresh session: every room incomplete, every sub-state initial.
    pub fn new(knowledge: KnowledgeState) -> Self {
        Self {
            nonce: 0,
            current_room: RoomIndex::FIRST,
            rooms_completed: [false; GameConfig::ROOM_COUNT],
            game_complete: false,
            navigation: NavigationPhase::Idle,
            examine: ExamineState::Idle,
            language: Language::default(),
            ui: UiState::default(),
            inventory: InventoryState::empty(),
            knowledge,
            rooms: RoomsState::default(),
        }
    }

    /// Fresh session whose knowledge codex comes from `content`.
    pub fn from_oracle<C>(content: &C) -> Self
    where
        C: ContentOracle + ?Sized,
    {
        Self::new(KnowledgeState::from_catalog(content.knowledge_catalog()))
    }

    /// Creates an empty state with no knowledge catalog.
    pub fn empty() -> Self {
        Self::new(KnowledgeState::default())
    }

    // ===== selectors =====

    pub fn is_room_completed(&self, room: RoomIndex) -> bool {
        self.rooms_completed[room.index()]
    }

    pub fn is_transitioning(&self) -> bool {
        self.navigation.is_transitioning()
    }

    /// True when every room before `room` is complete.
    pub fn is_room_reachable(&self, room: RoomIndex) -> bool {
        self.rooms_completed[..room.index()].iter().all(|done| *done)
    }

    pub fn completed_count(&self) -> usize {
        self.rooms_completed.iter().filter(|done| **done).count()
    }

    // ===== side-effect helpers used by transitions =====

    /// Marks knowledge `id` as found, selects it and opens the knowledge panel.
    ///
    /// Unknown or already-found ids leave the state untouched. Returns `true`
    /// on first discovery.
    pub(crate) fn unlock_knowledge(&mut self, id: &str) -> bool {
        if !self.knowledge.mark_found(id) {
            return false;
        }
        self.knowledge.select(Some(id));
        self.ui.sidebar_open = true;
        true
    }

    pub(crate) fn grant_item(&mut self, item: ItemRecord) -> bool {
        self.inventory.add(item)
    }

    /// Sets the completion flag of `room`. Idempotent.
    pub(crate) fn mark_room_completed(&mut self, room: RoomIndex) -> bool {
        let slot = &mut self.rooms_completed[room.index()];
        let changed = !*slot;
        *slot = true;
        changed
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::empty()
    }
}
