use std::fmt;

use crate::config::GameConfig;

/// Index of one of the sequential rooms (`0..GameConfig::ROOM_COUNT`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct RoomIndex(u8);

impl RoomIndex {
    /// Revolutionary Foundation: combination box and manifesto.
    pub const FOUNDATION: Self = Self(0);
    /// Socialist Theory: four-core machine.
    pub const THEORY: Self = Self(1);
    /// Innovation & Future: three-core device.
    pub const INNOVATION: Self = Self(2);

    pub const FIRST: Self = Self::FOUNDATION;
    pub const LAST: Self = Self((GameConfig::ROOM_COUNT - 1) as u8);

    /// Returns the room at `index`, or `None` when it is out of range.
    pub const fn new(index: usize) -> Option<Self> {
        if index < GameConfig::ROOM_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Zero-based position usable as an array index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next room, clamped at the last one.
    pub const fn next_clamped(self) -> Self {
        if self.0 >= Self::LAST.0 {
            Self::LAST
        } else {
            Self(self.0 + 1)
        }
    }

    /// Previous room, clamped at the first one.
    pub const fn prev_clamped(self) -> Self {
        if self.0 == 0 { Self::FIRST } else { Self(self.0 - 1) }
    }

    /// The room whose completion unlocks this one, if any.
    pub const fn prerequisite(self) -> Option<Self> {
        if self.0 == 0 { None } else { Some(Self(self.0 - 1)) }
    }

    /// Iterates every room in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..GameConfig::ROOM_COUNT as u8).map(Self)
    }
}

impl fmt::Display for RoomIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Players count rooms from one.
        write!(f, "room {}", self.0 + 1)
    }
}

impl From<RoomIndex> for u8 {
    fn from(room: RoomIndex) -> Self {
        room.0
    }
}

impl TryFrom<u8> for RoomIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as usize).ok_or_else(|| format!("room index {value} out of range"))
    }
}

/// Presentation language. Has no effect on puzzle logic.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Language {
    #[default]
    En,
    Vi,
}

impl Language {
    /// Picks the string for this language from an EN/VI pair.
    pub fn pick<'a>(self, en: &'a str, vi: &'a str) -> &'a str {
        match self {
            Language::En => en,
            Language::Vi => vi,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Vi,
            Language::Vi => Language::En,
        }
    }
}

/// Close-up inspection of a scene object.
///
/// The object id exists exactly when examine mode is on.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum ExamineState {
    #[default]
    Idle,
    Examining { object_id: String },
}

impl ExamineState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Examining { .. })
    }

    pub fn object_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Examining { object_id } => Some(object_id),
        }
    }
}

/// Room-to-room navigation phase.
///
/// `Transitioning` is the cooperative lock that blocks a second navigation
/// request until the host finishes the pending one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "phase", rename_all = "snake_case"))]
pub enum NavigationPhase {
    #[default]
    Idle,
    Transitioning { target: RoomIndex },
}

impl NavigationPhase {
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }

    pub fn target(&self) -> Option<RoomIndex> {
        match self {
            Self::Idle => None,
            Self::Transitioning { target } => Some(*target),
        }
    }
}

/// Presentation toggles carried by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UiState {
    pub show_intro: bool,
    pub game_started: bool,
    pub show_hint: bool,
    pub sound_enabled: bool,
    pub sidebar_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_intro: true,
            game_started: false,
            show_hint: false,
            sound_enabled: true,
            sidebar_open: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_index_rejects_out_of_range() {
        assert_eq!(RoomIndex::new(0), Some(RoomIndex::FOUNDATION));
        assert_eq!(RoomIndex::new(2), Some(RoomIndex::INNOVATION));
        assert_eq!(RoomIndex::new(3), None);
    }

    #[test]
    fn neighbours_clamp_at_the_ends() {
        assert_eq!(RoomIndex::FIRST.prev_clamped(), RoomIndex::FIRST);
        assert_eq!(RoomIndex::LAST.next_clamped(), RoomIndex::LAST);
        assert_eq!(RoomIndex::FOUNDATION.next_clamped(), RoomIndex::THEORY);
        assert_eq!(RoomIndex::THEORY.prerequisite(), Some(RoomIndex::FOUNDATION));
        assert_eq!(RoomIndex::FOUNDATION.prerequisite(), None);
    }

    #[test]
    fn language_parses_case_insensitively() {
        assert_eq!("VI".parse::<Language>().unwrap(), Language::Vi);
        assert_eq!(Language::En.to_string(), "en");
        assert_eq!(Language::En.pick("key", "khóa"), "key");
    }
}
