//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! orchestrates the transition phases and surfaces rich error information
//! for the runtime. Every action is applied to a scratch copy of the state
//! and committed only when all three phases succeed, so a rejected action
//! never leaves a partial write behind.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::Action;
use crate::env::GameEnv;
use crate::state::{GameState, StateDelta};

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// State change metadata (which fields changed).
    pub delta: StateDelta,
}

/// Game engine that executes actions against a borrowed [`GameState`].
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &*self.state
    }

    /// Executes an action by routing it through the appropriate transition pipeline.
    ///
    /// On success the nonce is incremented and the returned delta describes
    /// what changed. On failure the state is left exactly as it was.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let mut next = self.state.clone();
        transition::execute_transition(action, &mut next, &env)?;

        // Increment nonce after successful execution
        next.nonce += 1;

        let delta = StateDelta::from_states(action.clone(), &*self.state, &next);
        *self.state = next;
        Ok(ExecutionOutcome { delta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameError;
    use crate::action::{CoreAction, Room1Action, StoreAction};
    use crate::rooms::CoreId;
    use crate::state::{Latch, RoomIndex};

    #[test]
    fn rejected_action_leaves_state_untouched() {
        let mut state = GameState::empty();
        let before = state.clone();
        let mut engine = GameEngine::new(&mut state);

        let error = engine
            .execute(GameEnv::empty(), &Action::Room1(Room1Action::ObtainKey))
            .unwrap_err();

        assert_eq!(error.phase(), TransitionPhase::PreValidate);
        assert_eq!(error.error_code(), "ROOM1_BOX_NOT_OPENED");
        assert_eq!(state, before);
    }

    #[test]
    fn nonce_counts_successful_actions() {
        let mut state = GameState::empty();
        let mut engine = GameEngine::new(&mut state);
        engine
            .execute(GameEnv::empty(), &StoreAction::ToggleHint.into())
            .unwrap();
        let _ = engine.execute(GameEnv::empty(), &Action::finish_navigation());

        assert_eq!(state.nonce, 1);
        assert!(state.ui.show_hint);
    }

    #[test]
    fn delta_reports_latches_and_completion() {
        let mut state = GameState::empty();
        state.rooms.room2.cores = {
            let mut board = state.rooms.room2.cores.clone();
            for core in &CoreId::MACHINE[..3] {
                board.unlock(*core, RoomIndex::THEORY).unwrap();
                board.assemble(*core, RoomIndex::THEORY).unwrap();
            }
            board.unlock(CoreId::StatePower, RoomIndex::THEORY).unwrap();
            board
        };

        let mut engine = GameEngine::new(&mut state);
        let outcome = engine
            .execute(
                GameEnv::empty(),
                &CoreAction::Assemble(CoreId::StatePower).into(),
            )
            .unwrap();

        assert_eq!(outcome.delta.latches, vec![Latch::MachineActivated]);
        assert_eq!(outcome.delta.rooms_completed, vec![RoomIndex::THEORY]);
        assert_eq!(outcome.delta.inventory.added, vec!["socialist-theory"]);
        assert_eq!(outcome.delta.cores.len(), 1);
        assert!(outcome.delta.touches_progress());
    }
}
