//! Progression properties checked against the public engine API.

use escape_core::{
    Action, CoreAction, CoreId, CoreStatus, Direction, GameConfig, GameEngine, GameEnv, GameState,
    ItemRecord, KnowledgeRecord, KnowledgeState, Latch, NavigationAction, NavigationError,
    ResetPolicy, Room1Action, Room3Action, RoomIndex, StoreAction,
};
use proptest::prelude::*;

const KNOWLEDGE_IDS: [&str; 10] = [
    "manifesto",
    "objective",
    "subjective",
    "transition",
    "economic-base",
    "superstructure",
    "class-struggle",
    "state-power",
    "vietnam",
    "fpt",
];

fn fresh_state() -> GameState {
    GameState::new(KnowledgeState::from_catalog(
        KNOWLEDGE_IDS.map(|id| KnowledgeRecord::new(id, id)),
    ))
}

fn exec(
    state: &mut GameState,
    action: impl Into<Action>,
) -> Result<(), escape_core::ExecuteError> {
    GameEngine::new(state)
        .execute(GameEnv::empty(), &action.into())
        .map(|_| ())
}

/// Every ordered selection of distinct cores, from none up to all of them.
fn orderings(cores: &[CoreId]) -> Vec<Vec<CoreId>> {
    let mut out = vec![Vec::new()];
    for (i, core) in cores.iter().enumerate() {
        let mut rest = cores.to_vec();
        rest.remove(i);
        for mut tail in orderings(&rest) {
            tail.insert(0, *core);
            out.push(tail);
        }
    }
    out
}

/// Unlocks and assembles `order` one core at a time, returning the latches
/// fired by each assembly.
fn assembly_latches(order: &[CoreId]) -> Vec<Vec<Latch>> {
    let mut state = fresh_state();
    let mut engine = GameEngine::new(&mut state);
    order
        .iter()
        .map(|core| {
            let unlocked = engine
                .execute(GameEnv::empty(), &Action::unlock_core(*core))
                .unwrap();
            assert!(unlocked.delta.latches.is_empty());
            engine
                .execute(GameEnv::empty(), &Action::assemble_core(*core))
                .unwrap()
                .delta
                .latches
        })
        .collect()
}

fn solve_room1(state: &mut GameState) {
    for (dial, position) in GameConfig::CORRECT_COMBINATION.into_iter().enumerate() {
        exec(state, Room1Action::SetDialPosition { dial, position }).unwrap();
    }
    exec(state, Room1Action::ObtainKey).unwrap();
}

fn assemble(state: &mut GameState, cores: &[CoreId]) {
    for core in cores {
        exec(state, CoreAction::Unlock(*core)).unwrap();
        exec(state, CoreAction::Assemble(*core)).unwrap();
    }
}

fn arb_store_action() -> impl Strategy<Value = StoreAction> {
    prop_oneof![
        (0usize..3).prop_map(|index| StoreAction::CompleteRoom { index }),
        (0usize..3).prop_map(|index| StoreAction::SetCurrentRoom { index }),
        prop::sample::select(KNOWLEDGE_IDS.to_vec())
            .prop_map(|id| StoreAction::AddKnowledge { id: id.to_owned() }),
        Just(StoreAction::ToggleSidebar),
        Just(StoreAction::ToggleHint),
        Just(StoreAction::StartGame),
    ]
}

fn arb_action() -> impl Strategy<Value = Action> {
    let cores = prop::sample::select(vec![
        CoreId::EconomicBase,
        CoreId::Superstructure,
        CoreId::ClassStruggle,
        CoreId::StatePower,
        CoreId::Innovation,
        CoreId::Digital,
        CoreId::Justice,
    ]);
    prop_oneof![
        (0usize..5, 0u8..5).prop_map(|(dial, position)| Action::set_dial(dial, position)),
        Just(Action::Room1(Room1Action::FindManifesto)),
        Just(Action::Room1(Room1Action::ObtainKey)),
        cores.clone().prop_map(Action::unlock_core),
        cores.prop_map(Action::assemble_core),
        Just(Action::Room3(Room3Action::ObtainBadge)),
        (0usize..3).prop_map(|from| Action::navigate(Direction::Forward, from)),
        (0usize..3).prop_map(|from| Action::navigate(Direction::Back, from)),
        (0usize..4).prop_map(Action::select_room),
        Just(Action::finish_navigation()),
        arb_store_action().prop_map(Action::Store),
    ]
}

fn core_rank(status: Option<CoreStatus>) -> u8 {
    match status {
        Some(CoreStatus::Locked) | None => 0,
        Some(CoreStatus::Unlocked) => 1,
        Some(CoreStatus::Assembled) => 2,
    }
}

proptest! {
    #[test]
    fn progress_is_monotonic_without_resets(actions in prop::collection::vec(arb_action(), 1..60)) {
        let mut state = fresh_state();
        for action in actions {
            let before = state.clone();
            let _ = exec(&mut state, action);

            for room in RoomIndex::all() {
                prop_assert!(!before.is_room_completed(room) || state.is_room_completed(room));
            }
            for core in CoreId::MACHINE.into_iter().chain(CoreId::DEVICE) {
                let was = core_rank(before.rooms.board(core).status(core));
                let now = core_rank(state.rooms.board(core).status(core));
                prop_assert!(was <= now);
            }
            for record in before.knowledge.records().iter().filter(|r| r.found) {
                prop_assert!(state.knowledge.is_found(&record.id));
            }
            prop_assert!(state.inventory.len() >= before.inventory.len());
        }
    }

    #[test]
    fn forward_gate_follows_completion(from in 0usize..2, completed in any::<[bool; 3]>()) {
        let mut state = fresh_state();
        state.rooms_completed = completed;
        let result = exec(&mut state, Action::navigate(Direction::Forward, from));

        let expected_ok = completed[from];
        prop_assert_eq!(result.is_ok(), expected_ok);
        if expected_ok {
            prop_assert_eq!(state.navigation.target(), RoomIndex::new(from + 1));
        } else {
            prop_assert!(!state.is_transitioning());
        }
    }

    #[test]
    fn repeated_knowledge_and_completion_are_idempotent(
        id in prop::sample::select(KNOWLEDGE_IDS.to_vec()),
        room in 0usize..3,
    ) {
        let mut once = fresh_state();
        exec(&mut once, StoreAction::AddKnowledge { id: id.to_owned() }).unwrap();
        exec(&mut once, StoreAction::CompleteRoom { index: room }).unwrap();

        let mut twice = once.clone();
        exec(&mut twice, StoreAction::AddKnowledge { id: id.to_owned() }).unwrap();
        exec(&mut twice, StoreAction::CompleteRoom { index: room }).unwrap();

        prop_assert_eq!(once.knowledge, twice.knowledge);
        prop_assert_eq!(once.rooms_completed, twice.rooms_completed);
    }
}

#[test]
fn aggregate_latches_fire_once_on_the_last_assembly() {
    for (cores, latch) in [
        (&CoreId::MACHINE[..], Latch::MachineActivated),
        (&CoreId::DEVICE[..], Latch::DevicePowered),
    ] {
        let orders = orderings(cores);
        // 4 cores: 1 + 4 + 12 + 24 + 24; 3 cores: 1 + 3 + 6 + 6.
        assert_eq!(orders.len(), if cores.len() == 4 { 65 } else { 16 });

        for order in orders {
            let fired = assembly_latches(&order);
            let complete = order.len() == cores.len();
            for (step, latches) in fired.iter().enumerate() {
                let last = step + 1 == order.len();
                let expected = if complete && last { vec![latch] } else { vec![] };
                assert_eq!(latches, &expected, "{order:?} step {step}");
            }
        }
    }
}

#[test]
fn revoking_a_passed_room_keeps_the_way_back_open() {
    let mut state = fresh_state();
    solve_room1(&mut state);
    exec(&mut state, Action::navigate(Direction::Forward, 0)).unwrap();
    exec(&mut state, NavigationAction::FinishNavigation).unwrap();
    assemble(&mut state, &CoreId::MACHINE);
    exec(&mut state, Action::navigate(Direction::Forward, 1)).unwrap();
    exec(&mut state, NavigationAction::FinishNavigation).unwrap();
    let before = state.clone();

    let error = exec(
        &mut state,
        StoreAction::ResetRoom {
            index: 0,
            policy: ResetPolicy::RevokeCompletion,
        },
    )
    .unwrap_err();
    assert!(error.to_string().contains("cannot revoke"), "{error}");
    assert_eq!(state, before);

    exec(&mut state, Action::navigate(Direction::Back, 2)).unwrap();
    exec(&mut state, NavigationAction::FinishNavigation).unwrap();
    assert_eq!(state.current_room, RoomIndex::THEORY);
}

#[test]
fn room1_box_opens_on_third_dial_exactly_once() {
    let mut state = fresh_state();
    state.rooms.room1.dial_positions = [0, 0, 0, 0];

    exec(&mut state, Action::set_dial(0, 2)).unwrap();
    exec(&mut state, Action::set_dial(1, 1)).unwrap();
    assert!(!state.rooms.room1.box_opened);

    let mut engine = GameEngine::new(&mut state);
    let outcome = engine
        .execute(GameEnv::empty(), &Action::set_dial(3, 2))
        .unwrap();
    assert_eq!(outcome.delta.latches, vec![escape_core::Latch::BoxOpened]);

    let again = engine
        .execute(GameEnv::empty(), &Action::set_dial(3, 2))
        .unwrap();
    assert!(again.delta.latches.is_empty());
    assert!(again.delta.knowledge_found.is_empty());
}

#[test]
fn reset_room_zero_touches_only_room_one() {
    let mut state = fresh_state();
    solve_room1(&mut state);
    assemble(&mut state, &CoreId::MACHINE[..2]);
    let before = state.clone();

    exec(
        &mut state,
        StoreAction::ResetRoom {
            index: 0,
            policy: ResetPolicy::KeepCompletion,
        },
    )
    .unwrap();

    assert_eq!(state.rooms.room1, escape_core::Room1State::default());
    assert_eq!(state.rooms.room2, before.rooms.room2);
    assert_eq!(state.rooms.room3, before.rooms.room3);
    assert_eq!(state.rooms_completed, before.rooms_completed);
    assert_eq!(state.inventory, before.inventory);
    assert_eq!(state.knowledge, before.knowledge);
}

#[test]
fn adding_same_item_twice_keeps_one_entry() {
    let mut state = fresh_state();
    for _ in 0..2 {
        exec(&mut state, StoreAction::AddToInventory(ItemRecord::bare("key"))).unwrap();
    }
    assert_eq!(state.inventory.len(), 1);
}

#[test]
fn blocked_forward_navigation_keeps_room_zero() {
    let mut state = fresh_state();
    let error = exec(&mut state, Action::navigate(Direction::Forward, 0)).unwrap_err();

    assert!(matches!(
        error.as_navigation(),
        Some(NavigationError::CurrentRoomIncomplete { .. })
    ));
    assert_eq!(state.current_room, RoomIndex::FOUNDATION);
    assert!(!state.is_transitioning());
}

#[test]
fn full_playthrough_completes_the_game() {
    let mut state = fresh_state();
    exec(&mut state, StoreAction::StartGame).unwrap();
    exec(&mut state, Room1Action::FindManifesto).unwrap();
    solve_room1(&mut state);

    exec(&mut state, Action::navigate(Direction::Forward, 0)).unwrap();
    exec(&mut state, NavigationAction::FinishNavigation).unwrap();
    assert_eq!(state.current_room, RoomIndex::THEORY);

    assemble(&mut state, &CoreId::MACHINE);
    exec(&mut state, Action::navigate(Direction::Forward, 1)).unwrap();
    exec(&mut state, NavigationAction::FinishNavigation).unwrap();

    assemble(&mut state, &CoreId::DEVICE);
    exec(&mut state, Room3Action::ObtainBadge).unwrap();

    assert!(state.game_complete);
    assert_eq!(state.rooms_completed, [true; 3]);
    assert_eq!(state.knowledge.found_count(), KNOWLEDGE_IDS.len());
    assert_eq!(state.inventory.len(), 2);
}
