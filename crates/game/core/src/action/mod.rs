//! Action domain.
//!
//! Every mutation of [`GameState`](crate::state::GameState) is one [`Action`]
//! routed by the engine to the transition of the module that owns it:
//!
//! - `store`: global flags, presentation toggles, inventory and knowledge
//! - `room1`: dials, manifesto, box and key
//! - `cores`: core unlock/assembly for Rooms 2 and 3, plus the Room 3 badge
//! - [`navigation`](crate::navigation): the room-to-room gate

pub mod cores;
pub mod room1;
pub mod store;
mod transition;

pub use cores::{CoreAction, Room3Action};
pub use room1::{Room1Action, Room1Error};
pub use store::{ResetPolicy, StoreAction, StoreError};
pub use transition::ActionTransition;

use crate::navigation::{Direction, NavigationAction};
use crate::rooms::CoreId;

/// Top-level action enum dispatched through the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Store(StoreAction),
    Room1(Room1Action),
    Core(CoreAction),
    Room3(Room3Action),
    Navigation(NavigationAction),
}

impl Action {
    pub fn unlock_core(core: CoreId) -> Self {
        Self::Core(CoreAction::Unlock(core))
    }

    pub fn assemble_core(core: CoreId) -> Self {
        Self::Core(CoreAction::Assemble(core))
    }

    pub fn set_dial(dial: usize, position: u8) -> Self {
        Self::Room1(Room1Action::SetDialPosition { dial, position })
    }

    pub fn navigate(direction: Direction, from: usize) -> Self {
        Self::Navigation(NavigationAction::RequestNavigate { direction, from })
    }

    pub fn select_room(index: usize) -> Self {
        Self::Navigation(NavigationAction::SelectRoom { index })
    }

    pub fn finish_navigation() -> Self {
        Self::Navigation(NavigationAction::FinishNavigation)
    }

    /// Short stable label used in logs and events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Store(_) => "store",
            Self::Room1(_) => "room1",
            Self::Core(_) => "core",
            Self::Room3(_) => "room3",
            Self::Navigation(_) => "navigation",
        }
    }
}

impl From<StoreAction> for Action {
    fn from(action: StoreAction) -> Self {
        Self::Store(action)
    }
}

impl From<Room1Action> for Action {
    fn from(action: Room1Action) -> Self {
        Self::Room1(action)
    }
}

impl From<CoreAction> for Action {
    fn from(action: CoreAction) -> Self {
        Self::Core(action)
    }
}

impl From<Room3Action> for Action {
    fn from(action: Room3Action) -> Self {
        Self::Room3(action)
    }
}

impl From<NavigationAction> for Action {
    fn from(action: NavigationAction) -> Self {
        Self::Navigation(action)
    }
}
