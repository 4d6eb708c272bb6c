//! Read-only snapshots handed to clients.

use escape_core::{CoreId, Language, MiniGame, MiniGameOutcome};
use serde::{Deserialize, Serialize};

/// What a client needs to render the open mini-game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniGameView {
    pub core: CoreId,
    pub title: String,
    pub timed: bool,
    /// Zero-based index of the current question.
    pub step: usize,
    pub question_count: usize,
    /// Current prompt, `None` once the run is over.
    pub prompt: Option<String>,
    /// Shuffled choices or tiles for the current question; empty for free text.
    pub options: Vec<String>,
    pub hint: Option<String>,
    pub score: u32,
    pub time_left: Option<u32>,
    pub outcome: Option<MiniGameOutcome>,
}

impl MiniGameView {
    pub(crate) fn new(game: &MiniGame, options: &[String], language: Language) -> Self {
        let question = game.current_question();
        Self {
            core: game.core(),
            title: game.spec().title(language).to_owned(),
            timed: game.is_timed(),
            step: game.step(),
            question_count: game.question_count(),
            prompt: question.map(|q| q.prompt(language).to_owned()),
            options: options.to_vec(),
            hint: question.and_then(|q| q.hint.clone()),
            score: game.score(),
            time_left: game.time_left(),
            outcome: game.outcome(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Result of submitting one answer: the feedback plus the refreshed view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerReport {
    pub feedback: escape_core::AnswerFeedback,
    pub view: MiniGameView,
}
