//! Room 1, Revolutionary Foundation: a four-dial combination box.

use crate::config::GameConfig;

use super::PuzzleModule;

/// Knowledge unlocked by finding the manifesto on the desk.
pub const MANIFESTO_KNOWLEDGE: &str = "manifesto";
/// Knowledge unlocked when the box opens.
pub const BOX_KNOWLEDGE: [&str; 2] = ["objective", "subjective"];
/// Item granted by taking the key out of the open box.
pub const KEY_ITEM: &str = "room1-key";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room1State {
    /// Current dial values, each in `0..GameConfig::DIAL_POSITIONS`.
    pub dial_positions: [u8; GameConfig::DIAL_COUNT],
    pub manifesto_found: bool,
    pub box_opened: bool,
    pub key_obtained: bool,
}

impl PuzzleModule for Room1State {
    fn initial() -> Self {
        Self {
            dial_positions: [0; GameConfig::DIAL_COUNT],
            manifesto_found: false,
            box_opened: false,
            key_obtained: false,
        }
    }

    /// True while every dial matches [`GameConfig::CORRECT_COMBINATION`].
    fn is_solved(&self) -> bool {
        self.dial_positions == GameConfig::CORRECT_COMBINATION
    }
}

impl Default for Room1State {
    fn default() -> Self {
        Self::initial()
    }
}
