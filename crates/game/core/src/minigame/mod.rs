//! Mini-games that unlock cores.
//!
//! Room 2 cores are unlocked by scored multiple-choice quizzes, Room 3 cores
//! by timed fill-in challenges with a penalty for wrong answers. A
//! [`MiniGame`] is a pure state machine; the host owns the countdown timer
//! and dispatches `UnlockCore` when a run is won.
mod challenge;
mod game;

pub use challenge::{Answer, ChallengeMode, ChallengeSpec, Question, normalize_answer};
pub use game::{AnswerFeedback, MiniGame, MiniGameError, MiniGameOutcome, can_open};
