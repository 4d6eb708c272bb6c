//! Running mini-game instance.

use crate::error::{ErrorSeverity, GameError};
use crate::rooms::{CoreId, CoreStatus};
use crate::state::{GameState, Language, RoomIndex};

use super::challenge::{ChallengeMode, ChallengeSpec, Question};

/// Terminal result of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MiniGameOutcome {
    Won,
    /// Scored run finished below the pass threshold.
    Failed { score: u32, required: u32 },
    /// Timed run reached zero seconds.
    TimedOut,
}

impl MiniGameOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Result of one submitted answer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnswerFeedback {
    pub correct: bool,
    /// Seconds actually removed from the countdown.
    pub penalty_secs: u32,
    pub explanation: Option<String>,
    /// Set when this answer ended the run.
    pub outcome: Option<MiniGameOutcome>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MiniGameError {
    #[error("challenge for {0} has no questions")]
    NoQuestions(CoreId),

    #[error("core {core} is not in the current room ({current})")]
    NotInCurrentRoom { core: CoreId, current: RoomIndex },

    #[error("core {core} is already {status}")]
    AlreadyUnlocked { core: CoreId, status: CoreStatus },

    #[error("the mini-game is already over")]
    AlreadyFinished,

    #[error("the mini-game can only be retried after a lost run")]
    NotRetryable,
}

impl GameError for MiniGameError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoQuestions(_) => ErrorSeverity::Internal,
            Self::NotInCurrentRoom { .. } | Self::AlreadyUnlocked { .. } => {
                ErrorSeverity::Validation
            }
            Self::AlreadyFinished | Self::NotRetryable => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoQuestions(_) => "MINIGAME_NO_QUESTIONS",
            Self::NotInCurrentRoom { .. } => "MINIGAME_NOT_IN_CURRENT_ROOM",
            Self::AlreadyUnlocked { .. } => "MINIGAME_ALREADY_UNLOCKED",
            Self::AlreadyFinished => "MINIGAME_ALREADY_FINISHED",
            Self::NotRetryable => "MINIGAME_NOT_RETRYABLE",
        }
    }
}

/// Checks that a mini-game for `core` may be opened: the core must sit in the
/// current room and still be locked.
pub fn can_open(state: &GameState, core: CoreId) -> Result<(), MiniGameError> {
    let room = core.room();
    if room != state.current_room {
        return Err(MiniGameError::NotInCurrentRoom {
            core,
            current: state.current_room,
        });
    }
    match state.rooms.board(core).status(core) {
        Some(CoreStatus::Locked) | None => Ok(()),
        Some(status) => Err(MiniGameError::AlreadyUnlocked { core, status }),
    }
}

/// Pure state machine for one mini-game run.
///
/// Hosts feed it answers and clock ticks; it never schedules anything itself.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MiniGame {
    spec: ChallengeSpec,
    step: usize,
    score: u32,
    time_left: Option<u32>,
    outcome: Option<MiniGameOutcome>,
}

impl MiniGame {
    pub fn new(spec: ChallengeSpec) -> Result<Self, MiniGameError> {
        if spec.questions.is_empty() {
            return Err(MiniGameError::NoQuestions(spec.core));
        }
        let time_left = Self::initial_time(&spec.mode);
        Ok(Self {
            spec,
            step: 0,
            score: 0,
            time_left,
            outcome: None,
        })
    }

    fn initial_time(mode: &ChallengeMode) -> Option<u32> {
        match mode {
            ChallengeMode::Scored { .. } => None,
            ChallengeMode::Timed {
                time_limit_secs, ..
            } => Some(*time_limit_secs),
        }
    }

    pub fn spec(&self) -> &ChallengeSpec {
        &self.spec
    }

    pub fn core(&self) -> CoreId {
        self.spec.core
    }

    pub fn is_timed(&self) -> bool {
        self.spec.mode.is_timed()
    }

    /// Question awaiting an answer, `None` once the run is over.
    pub fn current_question(&self) -> Option<&Question> {
        if self.outcome.is_some() {
            return None;
        }
        self.spec.questions.get(self.step)
    }

    /// Zero-based index of the current question.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn question_count(&self) -> usize {
        self.spec.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> Option<u32> {
        self.time_left
    }

    pub fn outcome(&self) -> Option<MiniGameOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Submits an answer for the current question. The explanation comes back
    /// in `language`.
    pub fn answer(
        &mut self,
        input: &str,
        language: Language,
    ) -> Result<AnswerFeedback, MiniGameError> {
        let question = self
            .current_question()
            .ok_or(MiniGameError::AlreadyFinished)?;
        let correct = question.accepts(input);
        let explanation = question.explanation(language).map(str::to_owned);

        let mut penalty_secs = 0;
        match self.spec.mode {
            ChallengeMode::Scored { pass_percent } => {
                if correct {
                    self.score += 1;
                }
                self.step += 1;
                if self.step == self.spec.questions.len() {
                    self.outcome = Some(self.scored_outcome(pass_percent));
                }
            }
            ChallengeMode::Timed {
                penalty_secs: penalty,
                ..
            } => {
                if correct {
                    self.score += 1;
                    self.step += 1;
                    if self.step == self.spec.questions.len() {
                        self.outcome = Some(MiniGameOutcome::Won);
                    }
                } else {
                    let left = self.time_left.unwrap_or(0);
                    penalty_secs = penalty.min(left);
                    self.drain(penalty_secs);
                }
            }
        }

        Ok(AnswerFeedback {
            correct,
            penalty_secs,
            explanation,
            outcome: self.outcome,
        })
    }

    /// Advances the countdown by `secs`. No-op for scored runs and finished runs.
    ///
    /// Returns the outcome when this tick ended the run.
    pub fn tick(&mut self, secs: u32) -> Option<MiniGameOutcome> {
        if self.outcome.is_some() || self.time_left.is_none() {
            return None;
        }
        self.drain(secs);
        self.outcome
    }

    /// Restarts a lost run from the first question.
    pub fn retry(&mut self) -> Result<(), MiniGameError> {
        match self.outcome {
            Some(MiniGameOutcome::Failed { .. }) | Some(MiniGameOutcome::TimedOut) => {
                self.step = 0;
                self.score = 0;
                self.time_left = Self::initial_time(&self.spec.mode);
                self.outcome = None;
                Ok(())
            }
            Some(MiniGameOutcome::Won) | None => Err(MiniGameError::NotRetryable),
        }
    }

    fn drain(&mut self, secs: u32) {
        if let Some(left) = self.time_left.as_mut() {
            *left = left.saturating_sub(secs);
            if *left == 0 {
                self.outcome = Some(MiniGameOutcome::TimedOut);
            }
        }
    }

    fn scored_outcome(&self, pass_percent: u8) -> MiniGameOutcome {
        let total = self.spec.questions.len() as u32;
        // Smallest score satisfying score * 100 >= total * pass_percent.
        let required = (total * u32::from(pass_percent)).div_ceil(100);
        if self.score * 100 >= total * u32::from(pass_percent) {
            MiniGameOutcome::Won
        } else {
            MiniGameOutcome::Failed {
                score: self.score,
                required,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn quiz(questions: usize) -> MiniGame {
        let config = GameConfig::new();
        let mut spec = ChallengeSpec::scored(CoreId::EconomicBase, "Economic Base", &config);
        for n in 0..questions {
            spec = spec.with_question(Question::choice(format!("q{n}"), "right", &["wrong"]));
        }
        MiniGame::new(spec).unwrap()
    }

    fn timed() -> MiniGame {
        let spec = ChallengeSpec::timed(CoreId::Innovation, "Innovation", &GameConfig::new())
            .with_question(Question::text("_____ cách mạng", "QUÁ ĐỘ"))
            .with_question(Question::text("giai cấp _____", "VÔ SẢN"));
        MiniGame::new(spec).unwrap()
    }

    #[test]
    fn scored_quiz_passes_at_sixty_percent() {
        let mut game = quiz(5);
        for input in ["right", "right", "right", "wrong"] {
            assert!(game.answer(input, Language::En).unwrap().outcome.is_none());
        }
        let last = game.answer("wrong", Language::En).unwrap();
        assert_eq!(last.outcome, Some(MiniGameOutcome::Won));
        assert_eq!(game.score(), 3);
    }

    #[test]
    fn failed_quiz_can_be_retried_from_scratch() {
        let mut game = quiz(1);
        let feedback = game.answer("nope", Language::En).unwrap();
        assert_eq!(
            feedback.outcome,
            Some(MiniGameOutcome::Failed {
                score: 0,
                required: 1
            })
        );
        assert_eq!(game.answer("right", Language::En), Err(MiniGameError::AlreadyFinished));

        game.retry().unwrap();
        assert_eq!(game.step(), 0);
        assert_eq!(
            game.answer("right", Language::En).unwrap().outcome,
            Some(MiniGameOutcome::Won)
        );
        assert_eq!(game.retry(), Err(MiniGameError::NotRetryable));
    }

    #[test]
    fn feedback_explains_in_the_players_language() {
        let mut question = Question::choice("driving force?", "Class struggle", &["Luck"]);
        question.explanation = Some("History is class struggle.".into());
        question.explanation_vi = Some("Lịch sử là đấu tranh giai cấp.".into());
        let config = GameConfig::new();
        let spec = ChallengeSpec::scored(CoreId::ClassStruggle, "Class Struggle", &config)
            .with_question(question);
        let mut game = MiniGame::new(spec).unwrap();

        let feedback = game.answer("luck", Language::Vi).unwrap();
        assert_eq!(
            feedback.explanation.as_deref(),
            Some("Lịch sử là đấu tranh giai cấp.")
        );
    }

    #[test]
    fn wrong_timed_answer_costs_penalty_and_repeats_question() {
        let mut game = timed();
        let feedback = game.answer("qua", Language::En).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.penalty_secs, 5);
        assert_eq!(game.time_left(), Some(115));
        assert_eq!(game.step(), 0);

        assert!(game.answer("quá độ", Language::En).unwrap().correct);
        assert_eq!(
            game.answer("Vô Sản", Language::En).unwrap().outcome,
            Some(MiniGameOutcome::Won)
        );
    }

    #[test]
    fn countdown_saturates_and_times_out() {
        let mut game = timed();
        assert_eq!(game.tick(118), None);
        let feedback = game.answer("wrong", Language::En).unwrap();
        assert_eq!(feedback.penalty_secs, 2);
        assert_eq!(feedback.outcome, Some(MiniGameOutcome::TimedOut));
        assert_eq!(game.time_left(), Some(0));
        assert_eq!(game.tick(1), None);

        game.retry().unwrap();
        assert_eq!(game.time_left(), Some(120));
    }

    #[test]
    fn scored_runs_ignore_ticks() {
        let mut game = quiz(2);
        assert_eq!(game.tick(500), None);
        assert_eq!(game.time_left(), None);
        assert!(!game.is_finished());
    }

    #[test]
    fn empty_challenge_is_rejected() {
        let spec = ChallengeSpec::scored(CoreId::StatePower, "State Power", &GameConfig::new());
        assert_eq!(
            MiniGame::new(spec),
            Err(MiniGameError::NoQuestions(CoreId::StatePower))
        );
    }

    #[test]
    fn opening_requires_locked_core_in_current_room() {
        let mut state = GameState::empty();
        assert_eq!(
            can_open(&state, CoreId::Justice),
            Err(MiniGameError::NotInCurrentRoom {
                core: CoreId::Justice,
                current: RoomIndex::FOUNDATION
            })
        );

        state.current_room = RoomIndex::THEORY;
        assert_eq!(can_open(&state, CoreId::ClassStruggle), Ok(()));

        state
            .rooms
            .room2
            .cores
            .unlock(CoreId::ClassStruggle, RoomIndex::THEORY)
            .unwrap();
        assert_eq!(
            can_open(&state, CoreId::ClassStruggle),
            Err(MiniGameError::AlreadyUnlocked {
                core: CoreId::ClassStruggle,
                status: CoreStatus::Unlocked
            })
        );
    }
}
