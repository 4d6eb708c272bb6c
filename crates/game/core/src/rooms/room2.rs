//! Room 2, Socialist Theory: four cores power the machine.

use super::PuzzleModule;
use super::cores::{CoreBoard, CoreId};

/// Knowledge unlocked when the machine activates.
pub const MACHINE_KNOWLEDGE: [&str; 6] = [
    "transition",
    "economic-base",
    "superstructure",
    "class-struggle",
    "state-power",
    "vietnam",
];
/// Item granted when the machine activates.
pub const THEORY_ITEM: &str = "socialist-theory";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room2State {
    pub cores: CoreBoard,
    pub machine_activated: bool,
}

impl PuzzleModule for Room2State {
    fn initial() -> Self {
        Self {
            cores: CoreBoard::locked(&CoreId::MACHINE),
            machine_activated: false,
        }
    }

    fn is_solved(&self) -> bool {
        self.cores.all_assembled()
    }
}

impl Default for Room2State {
    fn default() -> Self {
        Self::initial()
    }
}
