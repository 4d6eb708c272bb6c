//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionTransition};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<(), TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))
}

/// Routes an action to the transition of the module that owns it.
///
/// This is the internal implementation used by GameEngine::execute().
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<(), ExecuteError> {
    match action {
        Action::Store(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Store)
        }
        Action::Room1(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Room1)
        }
        Action::Core(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Core)
        }
        Action::Room3(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Room3)
        }
        Action::Navigation(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Navigation)
        }
    }
}
