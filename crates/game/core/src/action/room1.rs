//! Room 1 transitions: dials, manifesto, box and key.

use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::rooms::PuzzleModule;
use crate::rooms::room1::{BOX_KNOWLEDGE, KEY_ITEM, MANIFESTO_KNOWLEDGE};
use crate::state::{GameState, RoomIndex};

use super::ActionTransition;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Room1Action {
    /// Stores an explicit dial position. The box opens the first time all
    /// dials match the combination.
    SetDialPosition { dial: usize, position: u8 },
    /// Latches `manifesto_found` and unlocks the manifesto entry.
    FindManifesto,
    /// Takes the key out of the opened box and completes the room.
    ObtainKey,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Room1Error {
    #[error("dial {dial} does not exist (the box has {count})", count = GameConfig::DIAL_COUNT)]
    DialOutOfRange { dial: usize },

    #[error(
        "position {position} is out of range (dials have {count})",
        count = GameConfig::DIAL_POSITIONS
    )]
    PositionOutOfRange { position: u8 },

    #[error("the box is still locked")]
    BoxNotOpened,

    #[error("room 1 invariant violated: {0}")]
    InvariantViolated(String),
}

impl GameError for Room1Error {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DialOutOfRange { .. } | Self::PositionOutOfRange { .. } => {
                ErrorSeverity::Validation
            }
            Self::BoxNotOpened => ErrorSeverity::Recoverable,
            Self::InvariantViolated(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DialOutOfRange { .. } => "ROOM1_DIAL_OUT_OF_RANGE",
            Self::PositionOutOfRange { .. } => "ROOM1_POSITION_OUT_OF_RANGE",
            Self::BoxNotOpened => "ROOM1_BOX_NOT_OPENED",
            Self::InvariantViolated(_) => "ROOM1_INVARIANT_VIOLATED",
        }
    }
}

impl ActionTransition for Room1Action {
    type Error = Room1Error;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        match self {
            Self::SetDialPosition { dial, position } => {
                if *dial >= GameConfig::DIAL_COUNT {
                    return Err(Room1Error::DialOutOfRange { dial: *dial });
                }
                if *position >= GameConfig::DIAL_POSITIONS {
                    return Err(Room1Error::PositionOutOfRange {
                        position: *position,
                    });
                }
                Ok(())
            }
            Self::FindManifesto => Ok(()),
            Self::ObtainKey if !state.rooms.room1.box_opened => Err(Room1Error::BoxNotOpened),
            Self::ObtainKey => Ok(()),
        }
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        match self {
            Self::SetDialPosition { dial, position } => {
                state.rooms.room1.dial_positions[*dial] = *position;
                open_box_if_solved(state);
            }
            Self::FindManifesto => {
                if !state.rooms.room1.manifesto_found {
                    state.rooms.room1.manifesto_found = true;
                    state.unlock_knowledge(MANIFESTO_KNOWLEDGE);
                }
            }
            Self::ObtainKey => {
                state.rooms.room1.key_obtained = true;
                state.grant_item(env.item_record(KEY_ITEM));
                state.mark_room_completed(RoomIndex::FOUNDATION);
            }
        }
        Ok(())
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let room = &state.rooms.room1;
        if room.key_obtained && !room.box_opened {
            return Err(Room1Error::InvariantViolated(
                "key obtained from a closed box".into(),
            ));
        }
        if room.key_obtained && !state.is_room_completed(RoomIndex::FOUNDATION) {
            return Err(Room1Error::InvariantViolated(
                "key obtained but room not completed".into(),
            ));
        }
        Ok(())
    }
}

/// Fires the box latch the first time the dials match.
fn open_box_if_solved(state: &mut GameState) {
    let room = &mut state.rooms.room1;
    if room.box_opened || !room.is_solved() {
        return;
    }
    room.box_opened = true;
    for id in BOX_KNOWLEDGE {
        state.unlock_knowledge(id);
    }
}
