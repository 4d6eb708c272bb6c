use crate::env::GameEnv;
use crate::state::GameState;

/// How one action family changes a [`GameState`].
///
/// The engine runs `pre_validate`, `apply` and `post_validate` in order on a
/// scratch copy and commits only when all three succeed. Hooks see content
/// through [`GameEnv`] and must not touch anything but the state they are
/// given. Aggregate flags (box open, machine active, device powered) are
/// recomputed inside `apply`.
pub trait ActionTransition {
    type Error;

    /// Checks the gate against the state as it was before the action.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Mutates the scratch state. Runs only after `pre_validate` passed.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error>;

    /// Checks invariants of the state after the action.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
