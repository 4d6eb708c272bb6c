//! Navigation gate: room-to-room transitions.
//!
//! A request that passes the gate only enters `Transitioning { target }`. The
//! host waits [`GameConfig::transition_delay_ms`](crate::GameConfig) and then
//! dispatches [`NavigationAction::FinishNavigation`], which switches the room.
//! While a transition is in flight every other request is rejected.

use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, Language, NavigationPhase, RoomIndex};

use crate::action::ActionTransition;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    #[strum(to_string = "forward", serialize = "next")]
    Forward,
    #[strum(to_string = "back", serialize = "prev")]
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationAction {
    /// Previous/next button: target is `from ± 1`, clamped to the room range.
    RequestNavigate { direction: Direction, from: usize },
    /// Room indicator click.
    SelectRoom { index: usize },
    /// Completes the in-flight transition.
    FinishNavigation,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationError {
    #[error("a transition to {target} is already in progress")]
    AlreadyTransitioning { target: RoomIndex },

    #[error("no room beyond {from} in that direction")]
    AtBoundary { from: RoomIndex },

    #[error("already in {room}")]
    SameRoom { room: RoomIndex },

    #[error("{room} must be completed before moving forward")]
    CurrentRoomIncomplete { room: RoomIndex },

    #[error("{required} must be completed before entering {target}")]
    PrerequisiteIncomplete {
        target: RoomIndex,
        required: RoomIndex,
    },

    #[error("no transition in progress")]
    NotTransitioning,

    #[error("room index {index} is out of range")]
    RoomOutOfRange { index: usize },
}

impl NavigationError {
    /// User-facing message for rejections the player should be told about.
    ///
    /// Silent rejections (in-flight transition, boundary, same room) and
    /// programming errors return `None`.
    pub fn advisory(&self, language: Language) -> Option<String> {
        match self {
            Self::CurrentRoomIncomplete { .. } => Some(
                language
                    .pick(
                        "Complete this room first before moving forward!",
                        "Hoàn thành phòng này trước khi tiếp tục!",
                    )
                    .to_owned(),
            ),
            Self::PrerequisiteIncomplete { required, .. } => {
                let number = required.index() + 1;
                Some(match language {
                    Language::En => format!("Complete Room {number} first!"),
                    Language::Vi => format!("Hoàn thành Phòng {number} trước!"),
                })
            }
            _ => None,
        }
    }
}

impl GameError for NavigationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RoomOutOfRange { .. } => ErrorSeverity::Validation,
            Self::NotTransitioning => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyTransitioning { .. } => "NAV_ALREADY_TRANSITIONING",
            Self::AtBoundary { .. } => "NAV_AT_BOUNDARY",
            Self::SameRoom { .. } => "NAV_SAME_ROOM",
            Self::CurrentRoomIncomplete { .. } => "NAV_CURRENT_ROOM_INCOMPLETE",
            Self::PrerequisiteIncomplete { .. } => "NAV_PREREQUISITE_INCOMPLETE",
            Self::NotTransitioning => "NAV_NOT_TRANSITIONING",
            Self::RoomOutOfRange { .. } => "NAV_ROOM_OUT_OF_RANGE",
        }
    }
}

impl NavigationAction {
    /// Resolves the room this request would move to, applying every gate rule.
    pub fn resolve_target(&self, state: &GameState) -> Result<RoomIndex, NavigationError> {
        if let NavigationPhase::Transitioning { target } = state.navigation {
            return match self {
                Self::FinishNavigation => Ok(target),
                _ => Err(NavigationError::AlreadyTransitioning { target }),
            };
        }

        match *self {
            Self::FinishNavigation => Err(NavigationError::NotTransitioning),
            Self::RequestNavigate { direction, from } => {
                let from =
                    RoomIndex::new(from).ok_or(NavigationError::RoomOutOfRange { index: from })?;
                let target = match direction {
                    Direction::Forward => from.next_clamped(),
                    Direction::Back => from.prev_clamped(),
                };
                if target == from {
                    return Err(NavigationError::AtBoundary { from });
                }
                if direction == Direction::Forward && !state.is_room_completed(from) {
                    return Err(NavigationError::CurrentRoomIncomplete { room: from });
                }
                check_prerequisite(state, target)?;
                Ok(target)
            }
            Self::SelectRoom { index } => {
                let target =
                    RoomIndex::new(index).ok_or(NavigationError::RoomOutOfRange { index })?;
                if target == state.current_room {
                    return Err(NavigationError::SameRoom { room: target });
                }
                for room in RoomIndex::all().take_while(|room| *room < target) {
                    if !state.is_room_completed(room) {
                        return Err(NavigationError::PrerequisiteIncomplete {
                            target,
                            required: room,
                        });
                    }
                }
                Ok(target)
            }
        }
    }
}

fn check_prerequisite(state: &GameState, target: RoomIndex) -> Result<(), NavigationError> {
    match target.prerequisite() {
        Some(required) if !state.is_room_completed(required) => {
            Err(NavigationError::PrerequisiteIncomplete { target, required })
        }
        _ => Ok(()),
    }
}

impl ActionTransition for NavigationAction {
    type Error = NavigationError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        self.resolve_target(state).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let target = self.resolve_target(state)?;
        match self {
            Self::FinishNavigation => {
                state.current_room = target;
                state.navigation = NavigationPhase::Idle;
            }
            Self::RequestNavigate { .. } | Self::SelectRoom { .. } => {
                state.navigation = NavigationPhase::Transitioning { target };
            }
        }
        Ok(())
    }
}
