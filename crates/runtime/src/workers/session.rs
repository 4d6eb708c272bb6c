//! Session worker that owns the authoritative [`escape_core::GameState`].
//!
//! Receives commands from [`SessionHandle`](crate::SessionHandle), executes
//! actions via [`escape_core::GameEngine`], drives mini-games, and publishes
//! events to the [`EventBus`]. Timers (navigation delay, mini-game countdown)
//! are tokio tasks that only post [`TimerEvent`]s back into this worker, so
//! every state change still happens one at a time on this task.

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use escape_core::minigame::can_open;
use escape_core::{
    Action, ContentOracle, CoreId, Direction, ExecuteError, GameEngine, GameEnv, GameError,
    GameState, MiniGame, MiniGameOutcome, NavigationPhase, OracleError,
    RoomIndex, StateDelta, TransitionPhase,
};

use crate::api::{AnswerReport, MiniGameView, Result, RuntimeError};
use crate::events::{EventBus, MiniGameEvent, NavigationEvent, ProgressEvent};
use crate::repository::StateRepository;
use crate::runtime::RuntimeConfig;

/// Commands that can be sent to the session worker
pub enum Command {
    /// Execute any engine action.
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<StateDelta>>,
    },
    /// Previous/next navigation from the current room.
    Navigate {
        direction: Direction,
        reply: oneshot::Sender<Result<StateDelta>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    OpenMiniGame {
        core: CoreId,
        reply: oneshot::Sender<Result<MiniGameView>>,
    },
    AnswerMiniGame {
        input: String,
        reply: oneshot::Sender<Result<AnswerReport>>,
    },
    RetryMiniGame {
        reply: oneshot::Sender<Result<MiniGameView>>,
    },
    CloseMiniGame { reply: oneshot::Sender<Result<()>> },
    QueryMiniGame {
        reply: oneshot::Sender<Option<MiniGameView>>,
    },
    /// Write the state to the repository now.
    Save { reply: oneshot::Sender<Result<()>> },
}

/// Messages posted by timer tasks.
#[derive(Debug)]
pub(crate) enum TimerEvent {
    TransitionElapsed { target: RoomIndex },
    /// One second of countdown for the mini-game opened as `generation`.
    CountdownTick { generation: u64 },
}

/// The open mini-game plus host-side presentation state.
struct ActiveMiniGame {
    game: MiniGame,
    /// Shuffled options for `shown_step`.
    options: Vec<String>,
    shown_step: Option<usize>,
    /// Distinguishes ticks of this run from ticks of an earlier, aborted one.
    generation: u64,
    countdown: Option<JoinHandle<()>>,
}

impl ActiveMiniGame {
    fn new(game: MiniGame, generation: u64) -> Self {
        Self {
            game,
            options: Vec::new(),
            shown_step: None,
            generation,
            countdown: None,
        }
    }

    /// Reshuffles options when the current question changed.
    fn refresh_options(&mut self, rng: &mut StdRng) {
        let Some(question) = self.game.current_question() else {
            self.options.clear();
            self.shown_step = None;
            return;
        };
        if self.shown_step == Some(self.game.step()) {
            return;
        }
        let mut options: Vec<String> = question
            .answer
            .options()
            .into_iter()
            .map(str::to_owned)
            .collect();
        options.shuffle(rng);
        self.options = options;
        self.shown_step = Some(self.game.step());
    }

    fn stop_countdown(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            countdown.abort();
        }
    }

    fn view(&self, state: &GameState) -> MiniGameView {
        MiniGameView::new(&self.game, &self.options, state.language)
    }
}

impl Drop for ActiveMiniGame {
    fn drop(&mut self) {
        self.stop_countdown();
    }
}

fn spawn_countdown(
    timer_tx: &mpsc::UnboundedSender<TimerEvent>,
    period: Duration,
    generation: u64,
) -> JoinHandle<()> {
    let timer_tx = timer_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        loop {
            interval.tick().await;
            if timer_tx
                .send(TimerEvent::CountdownTick { generation })
                .is_err()
            {
                break;
            }
        }
    })
}

/// Background task that processes session commands.
pub struct SessionWorker {
    session_id: String,
    state: GameState,
    config: RuntimeConfig,
    content: Arc<dyn ContentOracle>,
    repository: Option<Arc<dyn StateRepository>>,
    command_rx: mpsc::Receiver<Command>,
    timer_tx: mpsc::UnboundedSender<TimerEvent>,
    timer_rx: mpsc::UnboundedReceiver<TimerEvent>,
    event_bus: EventBus,
    minigame: Option<ActiveMiniGame>,
    transition_timer: Option<JoinHandle<()>>,
    generation: u64,
    rng: StdRng,
}

impl SessionWorker {
    /// Creates a new session worker.
    pub fn new(
        session_id: String,
        state: GameState,
        config: RuntimeConfig,
        content: Arc<dyn ContentOracle>,
        repository: Option<Arc<dyn StateRepository>>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            target: "runtime::worker",
            session = %session_id,
            nonce = state.nonce,
            room = %state.current_room,
            "SessionWorker initialized"
        );

        let mut worker = Self {
            session_id,
            state,
            config,
            content,
            repository,
            command_rx,
            timer_tx,
            timer_rx,
            event_bus,
            minigame: None,
            transition_timer: None,
            generation: 0,
            rng,
        };

        // A save taken mid-transition resumes the pending room switch.
        if let Some(target) = worker.state.navigation.target() {
            worker.schedule_transition(target);
        }
        worker
    }

    /// Main worker loop. Ends once every command sender is dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(timer) = self.timer_rx.recv() => self.handle_timer(timer),
            }
        }

        if let Some(timer) = self.transition_timer.take() {
            timer.abort();
        }
        self.minigame = None;
        info!(target: "runtime::worker", session = %self.session_id, "SessionWorker stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Execute { action, reply } => {
                let result = self.execute_action(action);
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::Navigate { direction, reply } => {
                let action = Action::navigate(direction, self.state.current_room.index());
                let result = self.execute_action(action);
                if reply.send(result).is_err() {
                    debug!("Navigate reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::OpenMiniGame { core, reply } => {
                let result = self.open_minigame(core);
                if reply.send(result).is_err() {
                    debug!("OpenMiniGame reply channel closed (caller dropped)");
                }
            }
            Command::AnswerMiniGame { input, reply } => {
                let result = self.answer_minigame(&input);
                if reply.send(result).is_err() {
                    debug!("AnswerMiniGame reply channel closed (caller dropped)");
                }
            }
            Command::RetryMiniGame { reply } => {
                let result = self.retry_minigame();
                if reply.send(result).is_err() {
                    debug!("RetryMiniGame reply channel closed (caller dropped)");
                }
            }
            Command::CloseMiniGame { reply } => {
                let result = self.close_minigame();
                if reply.send(result).is_err() {
                    debug!("CloseMiniGame reply channel closed (caller dropped)");
                }
            }
            Command::QueryMiniGame { reply } => {
                let view = self.minigame.as_ref().map(|active| active.view(&self.state));
                if reply.send(view).is_err() {
                    debug!("QueryMiniGame reply channel closed (caller dropped)");
                }
            }
            Command::Save { reply } => {
                let result = self.save();
                if reply.send(result).is_err() {
                    debug!("Save reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_timer(&mut self, timer: TimerEvent) {
        match timer {
            TimerEvent::TransitionElapsed { target } => {
                self.transition_timer = None;
                if self.state.navigation.target() != Some(target) {
                    debug!(target: "runtime::worker", room = %target, "Stale transition timer ignored");
                    return;
                }
                if let Err(error) = self.execute_action(Action::finish_navigation()) {
                    warn!(target: "runtime::worker", %error, "Finishing navigation failed");
                }
            }
            TimerEvent::CountdownTick { generation } => self.tick_minigame(generation),
        }
    }

    /// Executes an action and publishes the resulting events.
    ///
    /// This is the ONLY method that calls `GameEngine::execute()`, so every
    /// state change is published, scheduled and autosaved the same way.
    fn execute_action(&mut self, action: Action) -> Result<StateDelta> {
        let env = GameEnv::with_content(self.content.as_ref());
        let outcome = GameEngine::new(&mut self.state).execute(env, &action);

        let delta = match outcome {
            Ok(outcome) => outcome.delta,
            Err(error) => {
                self.report_rejection(&action, &error);
                return Err(error.into());
            }
        };

        debug!(
            target: "runtime::worker",
            action = action.label(),
            nonce = self.state.nonce,
            knowledge = ?delta.knowledge_found,
            latches = ?delta.latches,
            "Action executed"
        );
        for room in &delta.rooms_completed {
            info!(target: "runtime::worker", %room, "Room completed");
        }
        if delta.game_completed {
            info!(target: "runtime::worker", session = %self.session_id, "Game complete");
        }

        self.publish_navigation(&delta);
        self.event_bus.publish(ProgressEvent::ActionExecuted {
            nonce: self.state.nonce,
            action,
            delta: Box::new(delta.clone()),
        });

        if self.config.autosave && !delta.is_empty() {
            self.autosave();
        }

        Ok(delta)
    }

    fn publish_navigation(&mut self, delta: &StateDelta) {
        if let Some(NavigationPhase::Transitioning { target }) = delta.navigation {
            self.event_bus.publish(NavigationEvent::Started {
                from: self.state.current_room,
                target,
            });
            self.schedule_transition(target);
        }
        if let Some(room) = delta.room_changed {
            self.event_bus.publish(NavigationEvent::Finished { room });
        }
    }

    fn schedule_transition(&mut self, target: RoomIndex) {
        let delay = Duration::from_millis(self.config.game_config.transition_delay_ms);
        let timer_tx = self.timer_tx.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if timer_tx
                .send(TimerEvent::TransitionElapsed { target })
                .is_err()
            {
                debug!("Transition timer fired after the worker stopped");
            }
        });
        if let Some(previous) = self.transition_timer.replace(timer) {
            previous.abort();
        }
    }

    fn report_rejection(&self, action: &Action, error: &ExecuteError) {
        let phase = error.phase();
        if phase == TransitionPhase::PreValidate {
            debug!(
                target: "runtime::worker",
                action = ?action,
                phase = phase.as_str(),
                error = %error,
                "Action rejected during pre-validate"
            );
        } else {
            error!(
                target: "runtime::worker",
                action = ?action,
                phase = phase.as_str(),
                error = %error,
                "Action execution failed"
            );
        }

        if let Some(navigation) = error.as_navigation() {
            self.event_bus.publish(NavigationEvent::Blocked {
                error: navigation.clone(),
                advisory: navigation.advisory(self.state.language),
            });
        }

        self.event_bus.publish(ProgressEvent::ActionRejected {
            nonce: self.state.nonce,
            action: action.clone(),
            phase,
            code: error.error_code().to_owned(),
            error: error.to_string(),
        });
    }

    fn autosave(&self) {
        let Some(repository) = &self.repository else {
            return;
        };
        match repository.save(&self.session_id, &self.state) {
            Ok(()) => self.event_bus.publish(ProgressEvent::Saved {
                session_id: self.session_id.clone(),
                nonce: self.state.nonce,
            }),
            Err(error) => warn!(
                target: "runtime::worker",
                session = %self.session_id,
                %error,
                "Autosave failed"
            ),
        }
    }

    fn save(&self) -> Result<()> {
        let repository = self
            .repository
            .as_ref()
            .ok_or(RuntimeError::PersistenceDisabled)?;
        repository.save(&self.session_id, &self.state)?;
        info!(
            target: "runtime::worker",
            session = %self.session_id,
            nonce = self.state.nonce,
            "Session saved"
        );
        self.event_bus.publish(ProgressEvent::Saved {
            session_id: self.session_id.clone(),
            nonce: self.state.nonce,
        });
        Ok(())
    }

    // ===== mini-games =====

    fn open_minigame(&mut self, core: CoreId) -> Result<MiniGameView> {
        if let Some(active) = &self.minigame
            && !active.game.is_finished()
        {
            return Err(RuntimeError::MiniGameAlreadyOpen {
                core: active.game.core(),
            });
        }
        can_open(&self.state, core)?;

        let spec = self
            .content
            .challenge(core)
            .ok_or_else(|| OracleError::ChallengeNotFound(core.to_string()))?;
        let game = MiniGame::new(spec)?;

        self.generation += 1;
        let mut active = ActiveMiniGame::new(game, self.generation);
        active.refresh_options(&mut self.rng);
        if active.game.is_timed() {
            active.countdown = Some(spawn_countdown(
                &self.timer_tx,
                self.config.tick_interval,
                active.generation,
            ));
        }

        debug!(target: "runtime::worker", %core, timed = active.game.is_timed(), "Mini-game opened");
        self.event_bus.publish(MiniGameEvent::Opened {
            core,
            question_count: active.game.question_count(),
            time_left: active.game.time_left(),
        });

        let view = active.view(&self.state);
        // Replacing a finished game drops it, which aborts its countdown.
        self.minigame = Some(active);
        Ok(view)
    }

    fn answer_minigame(&mut self, input: &str) -> Result<AnswerReport> {
        let active = self
            .minigame
            .as_mut()
            .ok_or(RuntimeError::NoActiveMiniGame)?;
        let core = active.game.core();
        let step = active.game.step();

        let feedback = active.game.answer(input, self.state.language)?;
        active.refresh_options(&mut self.rng);

        self.event_bus.publish(MiniGameEvent::Answered {
            core,
            step,
            feedback: feedback.clone(),
        });

        if let Some(outcome) = feedback.outcome {
            self.finish_minigame(core, outcome);
        }

        let view = self
            .minigame
            .as_ref()
            .map(|active| active.view(&self.state))
            .ok_or(RuntimeError::NoActiveMiniGame)?;
        Ok(AnswerReport { feedback, view })
    }

    fn retry_minigame(&mut self) -> Result<MiniGameView> {
        let active = self
            .minigame
            .as_mut()
            .ok_or(RuntimeError::NoActiveMiniGame)?;
        active.game.retry()?;

        self.generation += 1;
        active.generation = self.generation;
        active.shown_step = None;
        active.refresh_options(&mut self.rng);
        active.stop_countdown();
        if active.game.is_timed() {
            active.countdown = Some(spawn_countdown(
                &self.timer_tx,
                self.config.tick_interval,
                active.generation,
            ));
        }

        let core = active.game.core();
        let view = MiniGameView::new(&active.game, &active.options, self.state.language);
        self.event_bus.publish(MiniGameEvent::Retried { core });
        Ok(view)
    }

    fn close_minigame(&mut self) -> Result<()> {
        let active = self
            .minigame
            .take()
            .ok_or(RuntimeError::NoActiveMiniGame)?;
        let core = active.game.core();
        drop(active);

        debug!(target: "runtime::worker", %core, "Mini-game closed");
        self.event_bus.publish(MiniGameEvent::Closed { core });
        Ok(())
    }

    fn tick_minigame(&mut self, generation: u64) {
        let Some(active) = self.minigame.as_mut() else {
            return;
        };
        if active.generation != generation || active.game.is_finished() {
            return;
        }

        let core = active.game.core();
        let ended = active.game.tick(1);
        if let Some(time_left) = active.game.time_left() {
            self.event_bus.publish(MiniGameEvent::Tick { core, time_left });
        }
        if ended.is_some() {
            active.refresh_options(&mut self.rng);
        }

        if let Some(outcome) = ended {
            self.finish_minigame(core, outcome);
        }
    }

    /// Stops the countdown and, on a win, unlocks the core.
    fn finish_minigame(&mut self, core: CoreId, outcome: MiniGameOutcome) {
        if let Some(active) = self.minigame.as_mut() {
            active.stop_countdown();
        }

        info!(target: "runtime::worker", %core, ?outcome, "Mini-game finished");
        self.event_bus.publish(MiniGameEvent::Finished { core, outcome });

        if outcome.is_win()
            && let Err(error) = self.execute_action(Action::unlock_core(core))
        {
            warn!(target: "runtime::worker", %core, %error, "Unlocking won core failed");
        }
    }
}
