//! Game configuration loader.

use std::path::Path;

use escape_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// The `config.toml` bundled with the crate.
    pub fn builtin() -> LoadResult<GameConfig> {
        Self::parse(include_str!("../../data/config.toml"))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            (1..=100).contains(&config.quiz_pass_percent),
            "quiz_pass_percent must be within 1..=100, got {}",
            config.quiz_pass_percent
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("transition_delay_ms = 250").unwrap();
        assert_eq!(config.transition_delay_ms, 250);
        assert_eq!(config.quiz_pass_percent, GameConfig::DEFAULT_QUIZ_PASS_PERCENT);
    }

    #[test]
    fn bundled_config_matches_defaults() {
        assert_eq!(ConfigLoader::builtin().unwrap(), GameConfig::default());
    }

    #[test]
    fn rejects_out_of_range_pass_percent() {
        assert!(ConfigLoader::parse("quiz_pass_percent = 0").is_err());
    }
}
