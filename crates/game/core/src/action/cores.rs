//! Core transitions for the Room 2 machine and the Room 3 device.

use crate::env::GameEnv;
use crate::rooms::room2::{MACHINE_KNOWLEDGE, THEORY_ITEM};
use crate::rooms::room3::DEVICE_KNOWLEDGE;
use crate::rooms::{CoreError, CoreId, PuzzleModule};
use crate::state::{GameState, RoomIndex};

use super::ActionTransition;

/// Moves a core forward on the board of the room that holds it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoreAction {
    /// `Locked → Unlocked`, normally dispatched when a mini-game is won.
    Unlock(CoreId),
    /// `Unlocked → Assembled`, placing the core into its slot.
    Assemble(CoreId),
}

impl CoreAction {
    pub fn core(&self) -> CoreId {
        match self {
            Self::Unlock(core) | Self::Assemble(core) => *core,
        }
    }

    pub fn room(&self) -> RoomIndex {
        self.core().room()
    }
}

/// Room 3 terminal action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Room3Action {
    /// Takes the badge from the powered device, completing the room and the game.
    ObtainBadge,
}

impl ActionTransition for CoreAction {
    type Error = CoreError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let board = state.rooms.board(self.core());
        match self {
            Self::Unlock(core) => board.check_unlock(*core, core.room()),
            Self::Assemble(core) => board.check_assemble(*core, core.room()),
        }
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let core = self.core();
        let room = core.room();
        let board = if room == RoomIndex::THEORY {
            &mut state.rooms.room2.cores
        } else {
            &mut state.rooms.room3.cores
        };
        match self {
            Self::Unlock(_) => board.unlock(core, room)?,
            Self::Assemble(_) => board.assemble(core, room)?,
        };

        if room == RoomIndex::THEORY {
            activate_machine_if_ready(state, env);
        } else {
            power_device_if_ready(state);
        }
        Ok(())
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let room2 = &state.rooms.room2;
        if room2.machine_activated != room2.is_solved() {
            return Err(CoreError::InvariantViolated(
                "machine activation out of sync with its cores".into(),
            ));
        }
        let room3 = &state.rooms.room3;
        if room3.device_powered != room3.is_solved() {
            return Err(CoreError::InvariantViolated(
                "device power out of sync with its cores".into(),
            ));
        }
        Ok(())
    }
}

impl ActionTransition for Room3Action {
    type Error = CoreError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        match self {
            Self::ObtainBadge if !state.rooms.room3.device_powered => {
                Err(CoreError::DeviceNotPowered)
            }
            Self::ObtainBadge => Ok(()),
        }
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        match self {
            Self::ObtainBadge => {
                state.rooms.room3.badge_obtained = true;
                state.mark_room_completed(RoomIndex::INNOVATION);
                state.game_complete = true;
            }
        }
        Ok(())
    }
}

/// Fires the machine latch once every Room 2 core is assembled.
fn activate_machine_if_ready(state: &mut GameState, env: &GameEnv<'_>) {
    let room = &mut state.rooms.room2;
    if room.machine_activated || !room.is_solved() {
        return;
    }
    room.machine_activated = true;
    for id in MACHINE_KNOWLEDGE {
        state.unlock_knowledge(id);
    }
    state.grant_item(env.item_record(THEORY_ITEM));
    state.mark_room_completed(RoomIndex::THEORY);
}

/// Powers the device once every Room 3 core is assembled.
fn power_device_if_ready(state: &mut GameState) {
    let room = &mut state.rooms.room3;
    if room.device_powered || !room.is_solved() {
        return;
    }
    room.device_powered = true;
    state.unlock_knowledge(DEVICE_KNOWLEDGE);
}
