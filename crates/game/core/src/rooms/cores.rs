//! Core slots shared by the Room 2 machine and the Room 3 device.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, GameError};
use crate::state::RoomIndex;

/// Identifier of an assemblable core. The string form is kebab-case
/// (`economic-base`, `class-struggle`, ...).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CoreId {
    EconomicBase,
    Superstructure,
    ClassStruggle,
    StatePower,
    Innovation,
    Digital,
    Justice,
}

impl CoreId {
    /// Cores of the Room 2 machine.
    pub const MACHINE: [CoreId; 4] = [
        CoreId::EconomicBase,
        CoreId::Superstructure,
        CoreId::ClassStruggle,
        CoreId::StatePower,
    ];

    /// Cores of the Room 3 device.
    pub const DEVICE: [CoreId; 3] = [CoreId::Innovation, CoreId::Digital, CoreId::Justice];

    /// Room whose board holds this core.
    pub const fn room(self) -> RoomIndex {
        match self {
            CoreId::EconomicBase
            | CoreId::Superstructure
            | CoreId::ClassStruggle
            | CoreId::StatePower => RoomIndex::THEORY,
            CoreId::Innovation | CoreId::Digital | CoreId::Justice => RoomIndex::INNOVATION,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Parses a kebab-case id, reporting unknown ids as [`CoreError::UnknownCore`].
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        raw.trim()
            .parse()
            .map_err(|_| CoreError::UnknownCore(raw.trim().to_owned()))
    }
}

/// Lifecycle of a core: `Locked → Unlocked → Assembled`, never backwards.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CoreStatus {
    #[default]
    Locked,
    Unlocked,
    Assembled,
}

/// Errors raised by core transitions and the terminal room actions built on them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoreError {
    #[error("unknown core '{0}'")]
    UnknownCore(String),

    #[error("core {core} does not belong to {room}")]
    WrongRoom { core: CoreId, room: RoomIndex },

    #[error("core {core} must be unlocked before it can be assembled")]
    NotUnlocked { core: CoreId },

    #[error("the device is not powered yet")]
    DeviceNotPowered,

    #[error("room puzzle invariant violated: {0}")]
    InvariantViolated(String),
}

impl GameError for CoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownCore(_) | Self::WrongRoom { .. } => ErrorSeverity::Validation,
            Self::NotUnlocked { .. } | Self::DeviceNotPowered => ErrorSeverity::Recoverable,
            Self::InvariantViolated(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCore(_) => "CORE_UNKNOWN",
            Self::WrongRoom { .. } => "CORE_WRONG_ROOM",
            Self::NotUnlocked { .. } => "CORE_NOT_UNLOCKED",
            Self::DeviceNotPowered => "CORE_DEVICE_NOT_POWERED",
            Self::InvariantViolated(_) => "CORE_INVARIANT_VIOLATED",
        }
    }
}

/// Status of every core slot on one room's board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CoreBoard {
    cores: BTreeMap<CoreId, CoreStatus>,
}

impl CoreBoard {
    /// Board with every listed core locked.
    pub fn locked(ids: &[CoreId]) -> Self {
        Self {
            cores: ids.iter().map(|id| (*id, CoreStatus::Locked)).collect(),
        }
    }

    pub fn status(&self, core: CoreId) -> Option<CoreStatus> {
        self.cores.get(&core).copied()
    }

    pub fn contains(&self, core: CoreId) -> bool {
        self.cores.contains_key(&core)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CoreId, CoreStatus)> + '_ {
        self.cores.iter().map(|(id, status)| (*id, *status))
    }

    pub fn len(&self) -> usize {
        self.cores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    pub fn assembled_count(&self) -> usize {
        self.cores
            .values()
            .filter(|status| **status == CoreStatus::Assembled)
            .count()
    }

    /// True when the board is non-empty and every slot is assembled.
    pub fn all_assembled(&self) -> bool {
        !self.cores.is_empty() && self.assembled_count() == self.cores.len()
    }

    /// Checks that `core` can be unlocked on this board without mutating it.
    pub fn check_unlock(&self, core: CoreId, room: RoomIndex) -> Result<(), CoreError> {
        self.slot(core, room).map(|_| ())
    }

    /// Checks that `core` can be assembled on this board without mutating it.
    pub fn check_assemble(&self, core: CoreId, room: RoomIndex) -> Result<(), CoreError> {
        match self.slot(core, room)? {
            CoreStatus::Locked => Err(CoreError::NotUnlocked { core }),
            CoreStatus::Unlocked | CoreStatus::Assembled => Ok(()),
        }
    }

    /// `Locked → Unlocked`. Unlocking an unlocked or assembled core is a no-op.
    ///
    /// Returns `true` when the status changed.
    pub fn unlock(&mut self, core: CoreId, room: RoomIndex) -> Result<bool, CoreError> {
        self.check_unlock(core, room)?;
        Ok(self.advance(core, CoreStatus::Locked, CoreStatus::Unlocked))
    }

    /// `Unlocked → Assembled`. Assembling an assembled core is a no-op.
    ///
    /// Returns `true` when the status changed.
    pub fn assemble(&mut self, core: CoreId, room: RoomIndex) -> Result<bool, CoreError> {
        self.check_assemble(core, room)?;
        Ok(self.advance(core, CoreStatus::Unlocked, CoreStatus::Assembled))
    }

    fn slot(&self, core: CoreId, room: RoomIndex) -> Result<CoreStatus, CoreError> {
        self.status(core).ok_or(CoreError::WrongRoom { core, room })
    }

    fn advance(&mut self, core: CoreId, from: CoreStatus, to: CoreStatus) -> bool {
        match self.cores.get_mut(&core) {
            Some(status) if *status == from => {
                *status = to;
                true
            }
            _ => false,
        }
    }
}
