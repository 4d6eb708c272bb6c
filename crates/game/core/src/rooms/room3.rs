//! Room 3, Innovation & Future: three cores power the device, then the badge.

use super::PuzzleModule;
use super::cores::{CoreBoard, CoreId};

/// Knowledge unlocked when the device powers up.
pub const DEVICE_KNOWLEDGE: &str = "fpt";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room3State {
    pub cores: CoreBoard,
    pub device_powered: bool,
    pub badge_obtained: bool,
}

impl PuzzleModule for Room3State {
    fn initial() -> Self {
        Self {
            cores: CoreBoard::locked(&CoreId::DEVICE),
            device_powered: false,
            badge_obtained: false,
        }
    }

    /// The device powers up once all three cores sit in their slots.
    fn is_solved(&self) -> bool {
        self.cores.all_assembled()
    }
}

impl Default for Room3State {
    fn default() -> Self {
        Self::initial()
    }
}
