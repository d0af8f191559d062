use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kinds of mini-game interleaved between questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MiniGameType {
    ReactionTime,
    PatternMemory,
    NumberSequence,
    SpatialPuzzle,
}

impl MiniGameType {
    pub const ALL: [MiniGameType; 4] = [
        Self::ReactionTime,
        Self::PatternMemory,
        Self::NumberSequence,
        Self::SpatialPuzzle,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MiniGameType::ReactionTime => "reactionTime",
            MiniGameType::PatternMemory => "patternMemory",
            MiniGameType::NumberSequence => "numberSequence",
            MiniGameType::SpatialPuzzle => "spatialPuzzle",
        }
    }
}

impl fmt::Display for MiniGameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown mini-game type: {raw:?}")]
pub struct ParseMiniGameTypeError {
    pub raw: String,
}

impl FromStr for MiniGameType {
    type Err = ParseMiniGameTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|game| game.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseMiniGameTypeError { raw: s.to_string() })
    }
}

/// Normalized outcome of one mini-game.
///
/// `score` is always within `[0, 100]`; `raw_metrics` are kept for display
/// and never feed trait scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiniGameResult {
    pub game_type: MiniGameType,
    pub score: f64,
    #[serde(default)]
    pub raw_metrics: BTreeMap<String, f64>,
}

impl MiniGameResult {
    /// Build a result, clamping `score` into `[0, 100]` (non-finite becomes 0).
    #[must_use]
    pub fn new(game_type: MiniGameType, score: f64) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            game_type,
            score,
            raw_metrics: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.raw_metrics.insert(name.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_type_roundtrips_through_str() {
        for game in MiniGameType::ALL {
            assert_eq!(game.as_str().parse::<MiniGameType>().unwrap(), game);
        }
        assert!("tetris".parse::<MiniGameType>().is_err());
    }

    #[test]
    fn result_score_is_clamped() {
        assert_eq!(MiniGameResult::new(MiniGameType::ReactionTime, 140.0).score, 100.0);
        assert_eq!(MiniGameResult::new(MiniGameType::ReactionTime, -3.0).score, 0.0);
        assert_eq!(MiniGameResult::new(MiniGameType::ReactionTime, f64::NAN).score, 0.0);
    }

    #[test]
    fn serializes_game_type_in_camel_case() {
        let result = MiniGameResult::new(MiniGameType::PatternMemory, 75.0)
            .with_metric("highest_level", 10.0);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["game_type"], "patternMemory");
        assert_eq!(json["raw_metrics"]["highest_level"], 10.0);
    }
}
