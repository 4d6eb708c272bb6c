//! Per-room puzzle sub-states.
//!
//! Each room owns its own shape and unlock condition. Rooms never navigate;
//! their terminal actions only flip completion flags on [`GameState`].
//!
//! [`GameState`]: crate::state::GameState
pub mod cores;
pub mod room1;
pub mod room2;
pub mod room3;

pub use cores::{CoreBoard, CoreError, CoreId, CoreStatus};
pub use room1::Room1State;
pub use room2::Room2State;
pub use room3::Room3State;

use crate::state::RoomIndex;

/// Capability shared by every room puzzle.
pub trait PuzzleModule: Sized {
    /// Sub-state at session start.
    fn initial() -> Self;

    /// The unlock condition, evaluated on the current sub-state.
    ///
    /// Transitions check it after every mutation and fire the room's latch
    /// the first time it holds. It is not itself latched: Room 1 stops being
    /// solved when a dial moves away, while its `box_opened` latch stays set.
    fn is_solved(&self) -> bool;

    /// Returns the sub-state to its initial value.
    fn reset(&mut self) {
        *self = Self::initial();
    }
}

/// Sub-states of all three rooms.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomsState {
    pub room1: Room1State,
    pub room2: Room2State,
    pub room3: Room3State,
}

impl RoomsState {
    pub fn is_solved(&self, room: RoomIndex) -> bool {
        match room.index() {
            0 => self.room1.is_solved(),
            1 => self.room2.is_solved(),
            _ => self.room3.is_solved(),
        }
    }

    /// Resets exactly one room's sub-state.
    pub fn reset(&mut self, room: RoomIndex) {
        match room.index() {
            0 => self.room1.reset(),
            1 => self.room2.reset(),
            _ => self.room3.reset(),
        }
    }

    /// Core board of the room that holds `core`.
    pub fn board(&self, core: CoreId) -> &CoreBoard {
        match core.room().index() {
            1 => &self.room2.cores,
            _ => &self.room3.cores,
        }
    }

    /// True if the sub-state of `room` differs between `self` and `other`.
    pub fn differs(&self, other: &Self, room: RoomIndex) -> bool {
        match room.index() {
            0 => self.room1 != other.room1,
            1 => self.room2 != other.room2,
            _ => self.room3 != other.room3,
        }
    }
}
