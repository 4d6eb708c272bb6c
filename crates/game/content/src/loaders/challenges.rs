//! Mini-game challenge loader.

use std::path::Path;

use escape_core::{ChallengeMode, ChallengeSpec, CoreId, GameConfig, Question};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Challenge catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeCatalog {
    pub challenges: Vec<ChallengeEntry>,
}

/// One challenge as written in RON. `core` is the kebab-case core id
/// (`"economic-base"`), which is not a valid RON identifier.
///
/// Mode parameters are optional; missing ones are taken from [`GameConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeEntry {
    pub core: String,
    pub title: String,
    #[serde(default)]
    pub title_vi: String,
    pub mode: ModeKind,
    #[serde(default)]
    pub pass_percent: Option<u8>,
    #[serde(default)]
    pub time_limit_secs: Option<u32>,
    #[serde(default)]
    pub penalty_secs: Option<u32>,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeKind {
    Scored,
    Timed,
}

impl ChallengeEntry {
    pub fn into_spec(self, config: &GameConfig) -> LoadResult<ChallengeSpec> {
        let core = CoreId::parse(&self.core)?;
        let mode = match self.mode {
            ModeKind::Scored => {
                let pass_percent = self.pass_percent.unwrap_or(config.quiz_pass_percent);
                anyhow::ensure!(
                    (1..=100).contains(&pass_percent),
                    "challenge '{}': pass_percent must be within 1..=100, got {}",
                    self.core,
                    pass_percent
                );
                ChallengeMode::Scored { pass_percent }
            }
            ModeKind::Timed => ChallengeMode::Timed {
                time_limit_secs: self.time_limit_secs.unwrap_or(config.timed_limit_secs),
                penalty_secs: self.penalty_secs.unwrap_or(config.timed_penalty_secs),
            },
        };
        Ok(ChallengeSpec {
            core,
            title: self.title,
            title_vi: self.title_vi,
            mode,
            questions: self.questions,
        })
    }
}

/// Loader for mini-game challenges from RON files.
pub struct ChallengeLoader;

impl ChallengeLoader {
    pub fn load(path: &Path, config: &GameConfig) -> LoadResult<Vec<ChallengeSpec>> {
        let content = read_file(path)?;
        Self::parse(&content, config)
    }

    pub fn parse(content: &str, config: &GameConfig) -> LoadResult<Vec<ChallengeSpec>> {
        let catalog: ChallengeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse challenge catalog RON: {}", e))?;

        catalog
            .challenges
            .into_iter()
            .map(|entry| entry.into_spec(config))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape_core::{Answer, Language, MiniGame, MiniGameOutcome};

    const TWO_QUESTION_QUIZ: &str = r#"ChallengeCatalog(challenges: [
        (
            core: "economic-base",
            title: "Economic Base",
            mode: Scored,
            questions: [
                (prompt: "Components?", answer: Choice(correct: "Forces and relations", wrong: ["Money"])),
                (prompt: "Built upon?", answer: Choice(correct: "The economic base", wrong: ["Luck"])),
            ],
        ),
    ])"#;

    fn half_right(config: &GameConfig) -> Option<MiniGameOutcome> {
        let spec = ChallengeLoader::parse(TWO_QUESTION_QUIZ, config).unwrap().remove(0);
        let mut game = MiniGame::new(spec).unwrap();
        game.answer("Forces and relations", Language::En).unwrap();
        game.answer("Money", Language::En).unwrap().outcome
    }

    #[test]
    fn parses_kebab_case_core_ids() {
        let specs = ChallengeLoader::parse(
            r#"ChallengeCatalog(challenges: [
                (
                    core: "class-struggle",
                    title: "Class Struggle",
                    mode: Scored,
                    questions: [
                        (prompt: "Driving force?", answer: Choice(correct: "Class struggle", wrong: ["Luck"])),
                    ],
                ),
            ])"#,
            &GameConfig::default(),
        )
        .unwrap();

        assert_eq!(specs[0].core, CoreId::ClassStruggle);
        assert!(matches!(specs[0].questions[0].answer, Answer::Choice { .. }));
        assert_eq!(specs[0].questions[0].hint, None);
    }

    #[test]
    fn unknown_core_is_an_error() {
        let result = ChallengeLoader::parse(
            r#"ChallengeCatalog(challenges: [
                (core: "flux-capacitor", title: "?", mode: Timed, questions: []),
            ])"#,
            &GameConfig::default(),
        );
        let message = result.unwrap_err().to_string();
        assert!(message.contains("flux-capacitor"), "{message}");
    }

    #[test]
    fn configured_pass_percent_decides_quiz_outcome() {
        let lenient = GameConfig {
            quiz_pass_percent: 50,
            ..GameConfig::default()
        };
        assert_eq!(half_right(&lenient), Some(MiniGameOutcome::Won));

        let strict = GameConfig {
            quiz_pass_percent: 100,
            ..GameConfig::default()
        };
        assert_eq!(
            half_right(&strict),
            Some(MiniGameOutcome::Failed {
                score: 1,
                required: 2
            })
        );
    }

    #[test]
    fn explicit_timings_override_configured_defaults() {
        let config = GameConfig {
            timed_limit_secs: 90,
            timed_penalty_secs: 7,
            ..GameConfig::default()
        };
        let specs = ChallengeLoader::parse(
            r#"ChallengeCatalog(challenges: [
                (core: "justice", title: "Justice", mode: Timed, time_limit_secs: Some(150),
                 questions: [(prompt: "?", answer: Text(accepted: "CÔNG BẰNG"))]),
                (core: "digital", title: "Digital", mode: Timed, penalty_secs: Some(0),
                 questions: [(prompt: "?", answer: Text(accepted: "SỐ"))]),
            ])"#,
            &config,
        )
        .unwrap();

        assert_eq!(
            specs[0].mode,
            ChallengeMode::Timed {
                time_limit_secs: 150,
                penalty_secs: 7
            }
        );
        assert_eq!(
            specs[1].mode,
            ChallengeMode::Timed {
                time_limit_secs: 90,
                penalty_secs: 0
            }
        );
    }

    #[test]
    fn out_of_range_pass_percent_override_is_rejected() {
        let result = ChallengeLoader::parse(
            r#"ChallengeCatalog(challenges: [
                (core: "innovation", title: "?", mode: Scored, pass_percent: Some(0), questions: []),
            ])"#,
            &GameConfig::default(),
        );
        assert!(result.is_err());
    }
}
