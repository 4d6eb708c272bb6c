//! Static challenge definitions bound to cores.

use crate::config::GameConfig;
use crate::rooms::CoreId;
use crate::state::Language;

/// A mini-game definition. Winning it unlocks `core`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChallengeSpec {
    pub core: CoreId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title_vi: String,
    pub mode: ChallengeMode,
    pub questions: Vec<Question>,
}

impl ChallengeSpec {
    pub fn title(&self, language: Language) -> &str {
        language.pick(&self.title, &self.title_vi)
    }

    /// Scored quiz with the configured pass threshold.
    pub fn scored(core: CoreId, title: impl Into<String>, config: &GameConfig) -> Self {
        Self {
            core,
            title: title.into(),
            title_vi: String::new(),
            mode: ChallengeMode::Scored {
                pass_percent: config.quiz_pass_percent,
            },
            questions: Vec::new(),
        }
    }

    /// Timed challenge with the configured limit and penalty.
    pub fn timed(core: CoreId, title: impl Into<String>, config: &GameConfig) -> Self {
        Self {
            core,
            title: title.into(),
            title_vi: String::new(),
            mode: ChallengeMode::Timed {
                time_limit_secs: config.timed_limit_secs,
                penalty_secs: config.timed_penalty_secs,
            },
            questions: Vec::new(),
        }
    }

    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }
}

/// How a challenge is won.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChallengeMode {
    /// Every question is answered once; the run passes when
    /// `score * 100 >= questions * pass_percent`.
    Scored { pass_percent: u8 },
    /// Questions must be answered correctly in order before the clock runs
    /// out. A wrong answer costs `penalty_secs`.
    Timed {
        time_limit_secs: u32,
        penalty_secs: u32,
    },
}

impl ChallengeMode {
    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Timed { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Question {
    pub prompt: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prompt_vi: String,
    pub answer: Answer,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hint: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub explanation: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub explanation_vi: Option<String>,
}

impl Question {
    pub fn choice(prompt: impl Into<String>, correct: impl Into<String>, wrong: &[&str]) -> Self {
        Self {
            prompt: prompt.into(),
            prompt_vi: String::new(),
            answer: Answer::Choice {
                correct: correct.into(),
                wrong: wrong.iter().map(|option| (*option).to_owned()).collect(),
            },
            hint: None,
            explanation: None,
            explanation_vi: None,
        }
    }

    pub fn text(prompt: impl Into<String>, accepted: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            prompt_vi: String::new(),
            answer: Answer::Text {
                accepted: accepted.into(),
                tiles: Vec::new(),
            },
            hint: None,
            explanation: None,
            explanation_vi: None,
        }
    }

    pub fn prompt(&self, language: Language) -> &str {
        if self.prompt_vi.is_empty() {
            return &self.prompt;
        }
        language.pick(&self.prompt, &self.prompt_vi)
    }

    /// Shown after an answer. Falls back to English when no translation exists.
    pub fn explanation(&self, language: Language) -> Option<&str> {
        match (language, &self.explanation_vi) {
            (Language::Vi, Some(vi)) => Some(vi),
            _ => self.explanation.as_deref(),
        }
    }

    /// True when `input` answers this question.
    pub fn accepts(&self, input: &str) -> bool {
        let input = normalize_answer(input);
        match &self.answer {
            Answer::Choice { correct, .. } => normalize_answer(correct) == input,
            Answer::Text { accepted, .. } => normalize_answer(accepted) == input,
        }
    }
}

/// Expected answer of a question.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Answer {
    /// Multiple choice; hosts present `correct` mixed into `wrong`.
    Choice { correct: String, wrong: Vec<String> },
    /// Free text, optionally assembled from a bank of tiles (letters or words).
    Text {
        accepted: String,
        #[cfg_attr(feature = "serde", serde(default))]
        tiles: Vec<String>,
    },
}

impl Answer {
    /// Options to present for a choice question, correct one first.
    pub fn options(&self) -> Vec<&str> {
        match self {
            Answer::Choice { correct, wrong } => std::iter::once(correct.as_str())
                .chain(wrong.iter().map(String::as_str))
                .collect(),
            Answer::Text { tiles, .. } => tiles.iter().map(String::as_str).collect(),
        }
    }
}

/// Removes all whitespace and lowercases (Unicode-aware).
pub fn normalize_answer(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_answers_ignore_spacing_and_case() {
        let question = Question::text("thời kỳ gì?", "Qua Do");
        assert!(question.accepts("quado"));
        assert!(question.accepts("  QUA   DO "));
        assert!(!question.accepts("qua"));
    }

    #[test]
    fn vietnamese_capitals_fold_to_lowercase() {
        let question = Question::text("giai cấp _____", "VÔ SẢN");
        assert!(question.accepts("vô sản"));
        assert_eq!(normalize_answer("QUÁ ĐỘ"), "quáđộ");
    }

    #[test]
    fn explanation_follows_language_with_english_fallback() {
        let mut question = Question::choice("driving force?", "Class struggle", &["Luck"]);
        question.explanation = Some("History is class struggle.".into());
        assert_eq!(question.explanation(Language::Vi), Some("History is class struggle."));

        question.explanation_vi = Some("Lịch sử là đấu tranh giai cấp.".into());
        assert_eq!(
            question.explanation(Language::Vi),
            Some("Lịch sử là đấu tranh giai cấp.")
        );
        assert_eq!(question.explanation(Language::En), Some("History is class struggle."));
    }

    #[test]
    fn choice_lists_correct_option_first() {
        let question = Question::choice("driving force?", "Class struggle", &["Divine will"]);
        assert_eq!(
            question.answer.options(),
            vec!["Class struggle", "Divine will"]
        );
        assert!(question.accepts("class struggle"));
    }
}
