use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::MiniGameType;

/// A mini-game is offered after every `MINI_GAME_INTERVAL`-th question.
pub const MINI_GAME_INTERVAL: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("at least one mini-game type must be enabled")]
    NoMiniGames,

    #[error("mini-game type listed twice: {0}")]
    DuplicateMiniGame(MiniGameType),
}

/// What gets recorded when a timed question expires unanswered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutPolicy {
    /// The option marked as timeout default, otherwise the last option.
    #[default]
    MarkedOrLast,
    /// Only a marked option; questions without one record no selection.
    MarkedOnly,
}

/// Per-session configuration chosen before `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSettings {
    enabled_games: Vec<MiniGameType>,
    shuffle_questions: bool,
    seed: Option<u64>,
    timeout_policy: TimeoutPolicy,
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            enabled_games: MiniGameType::ALL.to_vec(),
            shuffle_questions: false,
            seed: None,
            timeout_policy: TimeoutPolicy::default(),
        }
    }
}

impl AssessmentSettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if no mini-game is enabled or one is listed twice.
    pub fn new(
        enabled_games: Vec<MiniGameType>,
        shuffle_questions: bool,
        seed: Option<u64>,
        timeout_policy: TimeoutPolicy,
    ) -> Result<Self, SettingsError> {
        if enabled_games.is_empty() {
            return Err(SettingsError::NoMiniGames);
        }
        let mut seen = HashSet::new();
        for game in &enabled_games {
            if !seen.insert(*game) {
                return Err(SettingsError::DuplicateMiniGame(*game));
            }
        }

        Ok(Self {
            enabled_games,
            shuffle_questions,
            seed,
            timeout_policy,
        })
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_shuffle_questions(mut self, shuffle: bool) -> Self {
        self.shuffle_questions = shuffle;
        self
    }

    #[must_use]
    pub fn with_timeout_policy(mut self, policy: TimeoutPolicy) -> Self {
        self.timeout_policy = policy;
        self
    }

    #[must_use]
    pub fn enabled_games(&self) -> &[MiniGameType] {
        &self.enabled_games
    }

    #[must_use]
    pub fn shuffle_questions(&self) -> bool {
        self.shuffle_questions
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn timeout_policy(&self) -> TimeoutPolicy {
        self.timeout_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_every_game() {
        let settings = AssessmentSettings::default();
        assert_eq!(settings.enabled_games(), &MiniGameType::ALL);
        assert!(!settings.shuffle_questions());
        assert_eq!(settings.timeout_policy(), TimeoutPolicy::MarkedOrLast);
    }

    #[test]
    fn rejects_empty_and_duplicate_games() {
        let err = AssessmentSettings::new(Vec::new(), false, None, TimeoutPolicy::MarkedOrLast)
            .unwrap_err();
        assert_eq!(err, SettingsError::NoMiniGames);

        let err = AssessmentSettings::new(
            vec![MiniGameType::ReactionTime, MiniGameType::ReactionTime],
            false,
            None,
            TimeoutPolicy::MarkedOrLast,
        )
        .unwrap_err();
        assert_eq!(err, SettingsError::DuplicateMiniGame(MiniGameType::ReactionTime));
    }
}
