use std::sync::Arc;
use std::time::Duration;

use escape_content::Catalog;
use escape_core::{
    Action, Answer, ChallengeSpec, ContentOracle, CoreId, CoreStatus, Direction, GameConfig,
    GameState, MiniGameOutcome, NavigationError, Question, Room1Action, Room3Action, RoomIndex,
};
use escape_runtime::{
    Event, FileStateRepository, MiniGameEvent, NavigationEvent, ProgressEvent, Runtime,
    RuntimeConfig, RuntimeError, SessionHandle, StateRepository, Topic,
};
use tokio::sync::broadcast;
use tokio::time::{Instant, timeout};

fn builtin() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().expect("builtin catalog"))
}

fn test_config() -> RuntimeConfig {
    RuntimeConfig {
        shuffle_seed: Some(7),
        ..RuntimeConfig::default()
    }
}

async fn start(content: Arc<Catalog>, state: Option<GameState>) -> (Runtime, SessionHandle) {
    let mut builder = Runtime::builder().config(test_config()).content(content);
    if let Some(state) = state {
        builder = builder.initial_state(state);
    }
    let runtime = builder.build().await.expect("runtime should start");
    let handle = runtime.handle();
    (runtime, handle)
}

/// Fresh state already standing in `room` with every earlier room complete.
fn state_in(catalog: &Catalog, room: RoomIndex) -> GameState {
    let mut state = GameState::from_oracle(catalog);
    for earlier in RoomIndex::all().take_while(|r| *r < room) {
        state.rooms_completed[earlier.index()] = true;
    }
    state.current_room = room;
    state
}

fn correct_answer(catalog: &Catalog, core: CoreId, step: usize) -> String {
    let spec = catalog.challenge(core).expect("challenge for core");
    match &spec.questions[step].answer {
        Answer::Choice { correct, .. } => correct.clone(),
        Answer::Text { accepted, .. } => accepted.clone(),
    }
}

async fn next_event(rx: &mut broadcast::Receiver<Event>) -> Event {
    timeout(Duration::from_secs(600), rx.recv())
        .await
        .expect("event before timeout")
        .expect("event channel open")
}

async fn wait_for_navigation_finished(rx: &mut broadcast::Receiver<Event>) -> RoomIndex {
    loop {
        if let Event::Navigation(NavigationEvent::Finished { room }) = next_event(rx).await {
            return room;
        }
    }
}

async fn solve_room1(handle: &SessionHandle) {
    for (dial, position) in [(0, 2), (1, 1), (3, 2)] {
        handle
            .execute(Action::set_dial(dial, position))
            .await
            .expect("dial accepted");
    }
    handle
        .execute(Room1Action::ObtainKey)
        .await
        .expect("key obtained");
}

async fn win_and_assemble(catalog: &Catalog, handle: &SessionHandle, core: CoreId) {
    let view = handle.open_minigame(core).await.expect("minigame opens");
    for step in 0..view.question_count {
        let report = handle
            .answer_minigame(correct_answer(catalog, core, step))
            .await
            .expect("answer accepted");
        assert!(report.feedback.correct, "{core} step {step}");
    }
    handle.close_minigame().await.expect("close");
    handle
        .execute(Action::assemble_core(core))
        .await
        .expect("assemble");
}

#[tokio::test(start_paused = true)]
async fn blocked_forward_navigation_publishes_advisory() {
    let (_runtime, handle) = start(builtin(), None).await;
    let mut navigation = handle.subscribe(Topic::Navigation);

    let error = handle
        .request_navigate(Direction::Forward)
        .await
        .unwrap_err();
    assert_eq!(
        error.as_navigation(),
        Some(&NavigationError::CurrentRoomIncomplete {
            room: RoomIndex::FOUNDATION
        })
    );

    match next_event(&mut navigation).await {
        Event::Navigation(NavigationEvent::Blocked { advisory, .. }) => assert_eq!(
            advisory.as_deref(),
            Some("Complete this room first before moving forward!")
        ),
        other => panic!("unexpected event {other:?}"),
    }

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.current_room, RoomIndex::FOUNDATION);
    assert!(!state.is_transitioning());
}

#[tokio::test(start_paused = true)]
async fn navigation_switches_room_after_transition_delay() {
    let (_runtime, handle) = start(builtin(), None).await;
    solve_room1(&handle).await;
    let mut navigation = handle.subscribe(Topic::Navigation);

    let started = Instant::now();
    handle.request_navigate(Direction::Forward).await.unwrap();

    let state = handle.query_state().await.unwrap();
    assert!(state.is_transitioning());
    assert_eq!(state.current_room, RoomIndex::FOUNDATION);

    // The gate is locked while the transition is in flight.
    let error = handle.select_room(1).await.unwrap_err();
    assert_eq!(
        error.as_navigation(),
        Some(&NavigationError::AlreadyTransitioning {
            target: RoomIndex::THEORY
        })
    );

    assert_eq!(
        wait_for_navigation_finished(&mut navigation).await,
        RoomIndex::THEORY
    );
    assert!(started.elapsed() >= Duration::from_millis(500));

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.current_room, RoomIndex::THEORY);
    assert!(!state.is_transitioning());
}

#[tokio::test(start_paused = true)]
async fn rejected_action_publishes_rejection_and_keeps_state() {
    let (_runtime, handle) = start(builtin(), None).await;
    let mut progress = handle.subscribe(Topic::Progress);
    let before = handle.query_state().await.unwrap();

    let error = handle.execute(Room1Action::ObtainKey).await.unwrap_err();
    assert!(matches!(error, RuntimeError::Execute(_)));

    match next_event(&mut progress).await {
        Event::Progress(ProgressEvent::ActionRejected { code, nonce, .. }) => {
            assert_eq!(code, "ROOM1_BOX_NOT_OPENED");
            assert_eq!(nonce, 0);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(handle.query_state().await.unwrap(), before);
}

#[tokio::test(start_paused = true)]
async fn winning_quiz_unlocks_its_core() {
    let catalog = builtin();
    let state = state_in(&catalog, RoomIndex::THEORY);
    let (_runtime, handle) = start(catalog.clone(), Some(state)).await;

    let view = handle.open_minigame(CoreId::StatePower).await.unwrap();
    let correct = correct_answer(&catalog, CoreId::StatePower, 0);
    assert_eq!(view.options.len(), 4);
    assert!(view.options.contains(&correct));
    assert_eq!(view.time_left, None);

    let report = handle.answer_minigame(correct).await.unwrap();
    assert_eq!(report.feedback.outcome, Some(MiniGameOutcome::Won));
    assert!(report.view.is_finished());

    let state = handle.query_state().await.unwrap();
    assert_eq!(
        state.rooms.room2.cores.status(CoreId::StatePower),
        Some(CoreStatus::Unlocked)
    );

    // An unlocked core has no game left to play.
    let error = handle.open_minigame(CoreId::StatePower).await.unwrap_err();
    assert!(matches!(error, RuntimeError::MiniGame(_)), "{error}");
}

#[tokio::test(start_paused = true)]
async fn failed_quiz_can_be_retried() {
    let catalog = builtin();
    let state = state_in(&catalog, RoomIndex::THEORY);
    let (_runtime, handle) = start(catalog.clone(), Some(state)).await;

    handle.open_minigame(CoreId::EconomicBase).await.unwrap();
    let report = handle.answer_minigame("Supply and demand").await.unwrap();
    assert_eq!(
        report.feedback.outcome,
        Some(MiniGameOutcome::Failed {
            score: 0,
            required: 1
        })
    );

    let view = handle.retry_minigame().await.unwrap();
    assert_eq!(view.step, 0);
    assert_eq!(view.outcome, None);

    let report = handle
        .answer_minigame(correct_answer(&catalog, CoreId::EconomicBase, 0))
        .await
        .unwrap();
    assert_eq!(report.feedback.outcome, Some(MiniGameOutcome::Won));
}

#[tokio::test(start_paused = true)]
async fn minigames_only_open_for_cores_of_the_current_room() {
    let (_runtime, handle) = start(builtin(), None).await;
    let error = handle.open_minigame(CoreId::Justice).await.unwrap_err();
    assert!(matches!(error, RuntimeError::MiniGame(_)), "{error}");
    assert!(matches!(
        handle.answer_minigame("anything").await,
        Err(RuntimeError::NoActiveMiniGame)
    ));
}

fn short_timed_catalog() -> Arc<Catalog> {
    let config = GameConfig {
        timed_limit_secs: 3,
        timed_penalty_secs: 1,
        ..GameConfig::default()
    };
    let spec = ChallengeSpec::timed(CoreId::Innovation, "Innovation", &config)
        .with_question(Question::text("Quá ___ lên chủ nghĩa xã hội", "độ"));
    Arc::new(Catalog::new(Vec::new(), Vec::new(), vec![spec], Vec::new()))
}

#[tokio::test(start_paused = true)]
async fn timed_challenge_counts_down_to_timeout() {
    let catalog = short_timed_catalog();
    let state = state_in(&catalog, RoomIndex::INNOVATION);
    let (_runtime, handle) = start(catalog, Some(state)).await;
    let mut minigame = handle.subscribe(Topic::MiniGame);

    let view = handle.open_minigame(CoreId::Innovation).await.unwrap();
    assert_eq!(view.time_left, Some(3));

    let mut ticks = Vec::new();
    let outcome = loop {
        match next_event(&mut minigame).await {
            Event::MiniGame(MiniGameEvent::Tick { time_left, .. }) => ticks.push(time_left),
            Event::MiniGame(MiniGameEvent::Finished { outcome, .. }) => break outcome,
            _ => {}
        }
    };
    assert_eq!(outcome, MiniGameOutcome::TimedOut);
    assert_eq!(ticks, vec![2, 1, 0]);

    let state = handle.query_state().await.unwrap();
    assert_eq!(
        state.rooms.room3.cores.status(CoreId::Innovation),
        Some(CoreStatus::Locked)
    );

    let view = handle.retry_minigame().await.unwrap();
    assert_eq!(view.time_left, Some(3));
}

#[tokio::test(start_paused = true)]
async fn wrong_timed_answer_costs_penalty() {
    let catalog = short_timed_catalog();
    let state = state_in(&catalog, RoomIndex::INNOVATION);
    let (_runtime, handle) = start(catalog, Some(state)).await;

    handle.open_minigame(CoreId::Innovation).await.unwrap();
    let report = handle.answer_minigame("sai").await.unwrap();
    assert!(!report.feedback.correct);
    assert_eq!(report.feedback.penalty_secs, 1);
    assert_eq!(report.view.time_left, Some(2));
    assert_eq!(report.view.step, 0);

    let report = handle.answer_minigame(" ĐỘ ").await.unwrap();
    assert_eq!(report.feedback.outcome, Some(MiniGameOutcome::Won));
}

#[tokio::test(start_paused = true)]
async fn closing_minigame_stops_countdown() {
    let catalog = short_timed_catalog();
    let state = state_in(&catalog, RoomIndex::INNOVATION);
    let (_runtime, handle) = start(catalog, Some(state)).await;

    handle.open_minigame(CoreId::Innovation).await.unwrap();
    handle.close_minigame().await.unwrap();
    let mut minigame = handle.subscribe(Topic::MiniGame);

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert!(minigame.try_recv().is_err());
    assert!(handle.minigame().await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn autosave_persists_and_sessions_resume() {
    let dir = tempfile::tempdir().unwrap();
    let repository = Arc::new(FileStateRepository::new(dir.path()).unwrap());

    let runtime = Runtime::builder()
        .config(test_config())
        .content(builtin())
        .repository(repository.clone())
        .session_id("resume-me")
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    handle.execute(Room1Action::FindManifesto).await.unwrap();
    let saved = handle.query_state().await.unwrap();
    drop(handle);
    runtime.shutdown().await.unwrap();

    let loaded = repository.load("resume-me").unwrap().expect("autosaved");
    assert!(loaded.rooms.room1.manifesto_found);
    assert!(loaded.knowledge.is_found("manifesto"));
    assert_eq!(loaded, saved);

    let runtime = Runtime::builder()
        .config(test_config())
        .content(builtin())
        .repository(repository)
        .session_id("resume-me")
        .build()
        .await
        .unwrap();
    assert_eq!(runtime.handle().query_state().await.unwrap(), saved);
}

#[tokio::test(start_paused = true)]
async fn save_without_repository_fails() {
    let (_runtime, handle) = start(builtin(), None).await;
    assert!(matches!(
        handle.save().await,
        Err(RuntimeError::PersistenceDisabled)
    ));
}

#[tokio::test(start_paused = true)]
async fn full_playthrough_completes_the_game() {
    let catalog = builtin();
    let (_runtime, handle) = start(catalog.clone(), None).await;
    let mut navigation = handle.subscribe(Topic::Navigation);

    handle.execute(Room1Action::FindManifesto).await.unwrap();
    solve_room1(&handle).await;
    handle.request_navigate(Direction::Forward).await.unwrap();
    wait_for_navigation_finished(&mut navigation).await;

    for core in CoreId::MACHINE {
        win_and_assemble(&catalog, &handle, core).await;
    }
    let state = handle.query_state().await.unwrap();
    assert!(state.rooms.room2.machine_activated);
    assert!(state.inventory.contains("socialist-theory"));

    handle.request_navigate(Direction::Forward).await.unwrap();
    wait_for_navigation_finished(&mut navigation).await;

    for core in CoreId::DEVICE {
        win_and_assemble(&catalog, &handle, core).await;
    }
    handle
        .execute(Action::Room3(Room3Action::ObtainBadge))
        .await
        .unwrap();

    let state = handle.query_state().await.unwrap();
    assert!(state.game_complete);
    assert_eq!(state.completed_count(), 3);
    assert_eq!(state.knowledge.found_count(), 10);
    assert_eq!(state.inventory.len(), 2);
}
