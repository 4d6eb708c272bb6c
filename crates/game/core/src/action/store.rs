//! Store primitives: global flags, presentation toggles, inventory and knowledge.

use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ExamineState, GameState, ItemRecord, Language, RoomIndex};

use super::ActionTransition;

/// What a room reset does to the room's completion flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ResetPolicy {
    /// Completion stays latched; only the puzzle sub-state is reset.
    #[default]
    KeepCompletion,
    /// Completion of the room is cleared too. Revoking the last room also
    /// clears `game_complete`. Rejected for rooms behind the player (or
    /// behind a pending transition target), since the player's room would
    /// become unreachable.
    RevokeCompletion,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoreAction {
    /// Leaves the intro screen.
    StartGame,
    ReturnToIntro,
    /// Latches `game_complete`.
    CompleteGame,
    /// Low-level room switch. Only bounds-checked; prerequisites are the
    /// navigation gate's job.
    SetCurrentRoom { index: usize },
    CompleteRoom { index: usize },
    EnterExamineMode { object_id: String },
    ExitExamineMode,
    AddToInventory(ItemRecord),
    RemoveFromInventory { id: String },
    SelectInventoryItem { id: Option<String> },
    AddKnowledge { id: String },
    SelectKnowledge { id: Option<String> },
    ToggleSidebar,
    ToggleHint,
    ToggleSound,
    SetLanguage(Language),
    ResetRoom { index: usize, policy: ResetPolicy },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoreError {
    #[error("room index {index} is out of range")]
    RoomOutOfRange { index: usize },

    #[error("examine mode needs an object id")]
    EmptyObjectId,

    #[error("inventory items need an id")]
    EmptyItemId,

    #[error("cannot revoke {room} while the player is in {current}")]
    RevokeBehindPlayer { room: RoomIndex, current: RoomIndex },
}

impl GameError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RoomOutOfRange { .. } => "STORE_ROOM_OUT_OF_RANGE",
            Self::EmptyObjectId => "STORE_EMPTY_OBJECT_ID",
            Self::EmptyItemId => "STORE_EMPTY_ITEM_ID",
            Self::RevokeBehindPlayer { .. } => "STORE_REVOKE_BEHIND_PLAYER",
        }
    }
}

fn room_at(index: usize) -> Result<RoomIndex, StoreError> {
    RoomIndex::new(index).ok_or(StoreError::RoomOutOfRange { index })
}

impl ActionTransition for StoreAction {
    type Error = StoreError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        match self {
            Self::ResetRoom {
                index,
                policy: ResetPolicy::RevokeCompletion,
            } => {
                let room = room_at(*index)?;
                let current = state
                    .navigation
                    .target()
                    .map_or(state.current_room, |target| target.max(state.current_room));
                if room < current {
                    return Err(StoreError::RevokeBehindPlayer { room, current });
                }
                Ok(())
            }
            Self::SetCurrentRoom { index }
            | Self::CompleteRoom { index }
            | Self::ResetRoom { index, .. } => room_at(*index).map(|_| ()),
            Self::EnterExamineMode { object_id } if object_id.trim().is_empty() => {
                Err(StoreError::EmptyObjectId)
            }
            Self::AddToInventory(item) if item.id.trim().is_empty() => {
                Err(StoreError::EmptyItemId)
            }
            _ => Ok(()),
        }
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        match self {
            Self::StartGame => {
                state.ui.game_started = true;
                state.ui.show_intro = false;
            }
            Self::ReturnToIntro => {
                state.ui.show_intro = true;
                state.ui.game_started = false;
            }
            Self::CompleteGame => state.game_complete = true,
            Self::SetCurrentRoom { index } => state.current_room = room_at(*index)?,
            Self::CompleteRoom { index } => {
                state.mark_room_completed(room_at(*index)?);
            }
            Self::EnterExamineMode { object_id } => {
                state.examine = ExamineState::Examining {
                    object_id: object_id.clone(),
                };
            }
            Self::ExitExamineMode => state.examine = ExamineState::Idle,
            Self::AddToInventory(item) => {
                state.grant_item(item.clone());
            }
            Self::RemoveFromInventory { id } => {
                state.inventory.remove(id);
            }
            Self::SelectInventoryItem { id } => {
                state.inventory.select(id.as_deref());
            }
            Self::AddKnowledge { id } => {
                state.unlock_knowledge(id);
            }
            Self::SelectKnowledge { id } => {
                state.knowledge.select(id.as_deref());
            }
            Self::ToggleSidebar => state.ui.sidebar_open = !state.ui.sidebar_open,
            Self::ToggleHint => state.ui.show_hint = !state.ui.show_hint,
            Self::ToggleSound => state.ui.sound_enabled = !state.ui.sound_enabled,
            Self::SetLanguage(language) => state.language = *language,
            Self::ResetRoom { index, policy } => {
                let room = room_at(*index)?;
                state.rooms.reset(room);
                if *policy == ResetPolicy::RevokeCompletion {
                    state.rooms_completed[room.index()] = false;
                    if room == RoomIndex::LAST {
                        state.game_complete = false;
                    }
                }
            }
        }
        Ok(())
    }
}
