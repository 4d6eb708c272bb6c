mod collection;

use crate::action::Action;
use crate::rooms::{CoreBoard, CoreId, CoreStatus};
use crate::state::{GameState, NavigationPhase, RoomIndex};

pub use collection::CollectionChanges;

use collection::diff_ids;

/// Description of an executed action's impact on the game state.
///
/// Hosts use it to log, publish events and decide whether to persist. It
/// records what changed, never the full before/after values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    /// The action that caused this transition.
    pub action: Action,

    /// State nonce after the action executed.
    pub nonce: u64,

    /// Knowledge ids discovered by this action.
    pub knowledge_found: Vec<String>,

    /// Inventory additions and removals.
    pub inventory: CollectionChanges,

    /// Rooms whose completion flag flipped on.
    pub rooms_completed: Vec<RoomIndex>,

    /// Rooms whose completion flag was revoked by a reset.
    pub rooms_revoked: Vec<RoomIndex>,

    /// New current room, if it changed.
    pub room_changed: Option<RoomIndex>,

    /// New navigation phase, if it changed.
    pub navigation: Option<NavigationPhase>,

    /// Rooms whose puzzle sub-state changed.
    pub puzzles: Vec<RoomIndex>,

    /// Core status changes across both boards.
    pub cores: Vec<CoreChange>,

    /// Latches that fired (false to true).
    pub latches: Vec<Latch>,

    /// True when this action latched `game_complete`.
    pub game_completed: bool,

    /// True when language, examine mode, selections or UI toggles changed.
    pub presentation_changed: bool,
}

/// One core moving between statuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreChange {
    pub core: CoreId,
    pub from: CoreStatus,
    pub to: CoreStatus,
}

/// One-way puzzle flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Latch {
    ManifestoFound,
    BoxOpened,
    KeyObtained,
    MachineActivated,
    DevicePowered,
    BadgeObtained,
}

impl StateDelta {
    /// Creates a delta by comparing two game states field by field.
    pub fn from_states(action: Action, before: &GameState, after: &GameState) -> Self {
        let knowledge_found = after
            .knowledge
            .found_ids()
            .filter(|id| !before.knowledge.is_found(id))
            .map(str::to_owned)
            .collect();

        let inventory = diff_ids(
            before.inventory.items().iter().map(|item| item.id.as_str()),
            after.inventory.items().iter().map(|item| item.id.as_str()),
        );

        let rooms_completed = RoomIndex::all()
            .filter(|room| after.is_room_completed(*room) && !before.is_room_completed(*room))
            .collect();
        let rooms_revoked = RoomIndex::all()
            .filter(|room| before.is_room_completed(*room) && !after.is_room_completed(*room))
            .collect();

        let puzzles = RoomIndex::all()
            .filter(|room| before.rooms.differs(&after.rooms, *room))
            .collect();

        let mut cores = diff_board(&before.rooms.room2.cores, &after.rooms.room2.cores);
        cores.extend(diff_board(
            &before.rooms.room3.cores,
            &after.rooms.room3.cores,
        ));

        let presentation_changed = before.language != after.language
            || before.examine != after.examine
            || before.ui != after.ui
            || before.inventory.selected() != after.inventory.selected()
            || before.knowledge.selected() != after.knowledge.selected();

        Self {
            action,
            nonce: after.nonce,
            knowledge_found,
            inventory,
            rooms_completed,
            rooms_revoked,
            room_changed: (before.current_room != after.current_room)
                .then_some(after.current_room),
            navigation: (before.navigation != after.navigation).then_some(after.navigation),
            puzzles,
            cores,
            latches: fired_latches(before, after),
            game_completed: after.game_complete && !before.game_complete,
            presentation_changed,
        }
    }

    /// Returns true if no state changes occurred (no-op action).
    pub fn is_empty(&self) -> bool {
        self.knowledge_found.is_empty()
            && self.inventory.is_empty()
            && self.rooms_completed.is_empty()
            && self.rooms_revoked.is_empty()
            && self.room_changed.is_none()
            && self.navigation.is_none()
            && self.puzzles.is_empty()
            && !self.game_completed
            && !self.presentation_changed
    }

    /// True when progress (as opposed to presentation) changed.
    pub fn touches_progress(&self) -> bool {
        !self.knowledge_found.is_empty()
            || !self.inventory.is_empty()
            || !self.rooms_completed.is_empty()
            || !self.rooms_revoked.is_empty()
            || !self.puzzles.is_empty()
            || self.game_completed
    }
}

fn diff_board(before: &CoreBoard, after: &CoreBoard) -> Vec<CoreChange> {
    after
        .iter()
        .filter_map(|(core, to)| {
            let from = before.status(core).unwrap_or_default();
            (from != to).then_some(CoreChange { core, from, to })
        })
        .collect()
}

fn fired_latches(before: &GameState, after: &GameState) -> Vec<Latch> {
    let (b1, a1) = (&before.rooms.room1, &after.rooms.room1);
    let (b2, a2) = (&before.rooms.room2, &after.rooms.room2);
    let (b3, a3) = (&before.rooms.room3, &after.rooms.room3);

    [
        (Latch::ManifestoFound, b1.manifesto_found, a1.manifesto_found),
        (Latch::BoxOpened, b1.box_opened, a1.box_opened),
        (Latch::KeyObtained, b1.key_obtained, a1.key_obtained),
        (Latch::MachineActivated, b2.machine_activated, a2.machine_activated),
        (Latch::DevicePowered, b3.device_powered, a3.device_powered),
        (Latch::BadgeObtained, b3.badge_obtained, a3.badge_obtained),
    ]
    .into_iter()
    .filter_map(|(latch, was, is)| (!was && is).then_some(latch))
    .collect()
}
