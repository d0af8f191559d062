use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{MiniGameResult, MiniGameType, TraitName};

/// The five personality traits reported in the personality map.
pub const PERSONALITY_TRAITS: [&str; 5] = [
    "openness",
    "conscientiousness",
    "extraversion",
    "agreeableness",
    "neuroticism",
];

//
// ─── LEVELS ────────────────────────────────────────────────────────────────────
//

/// Classification of a normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreLevel {
    Developing,
    Intermediate,
    Advanced,
}

impl ScoreLevel {
    /// `>= 80` is advanced, `>= 60` intermediate, anything else developing.
    #[must_use]
    pub fn classify(score: f64) -> Self {
        if score >= 80.0 {
            ScoreLevel::Advanced
        } else if score >= 60.0 {
            ScoreLevel::Intermediate
        } else {
            ScoreLevel::Developing
        }
    }
}

impl fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScoreLevel::Developing => "Developing",
            ScoreLevel::Intermediate => "Intermediate",
            ScoreLevel::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

/// Normalized score of one category or trait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    /// Mean contribution in `[0, 100]`.
    pub score: f64,
    pub level: ScoreLevel,
    /// Number of questions that fed this dimension (always > 0).
    pub contributing: u32,
}

impl DimensionScore {
    #[must_use]
    pub fn new(score: f64, contributing: u32) -> Self {
        Self {
            score,
            level: ScoreLevel::classify(score),
            contributing,
        }
    }
}

//
// ─── MINI-GAMES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiniGameSummary {
    pub played: u32,
    pub average_score: f64,
    pub best_game: MiniGameType,
    pub best_score: f64,
}

//
// ─── COGNITIVE PROFILE ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingPattern {
    Analytical,
    Creative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingStyle {
    Integrated,
    Analytical,
    Creative,
    Balanced,
}

/// Composite view derived from the intelligence and creativity scores plus
/// the personality map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveProfile {
    /// Mean of the available intelligence and creativity scores.
    pub complexity_score: f64,
    pub complexity: Complexity,
    pub primary: ThinkingPattern,
    pub secondary: ThinkingPattern,
    pub style: ThinkingStyle,
    pub strengths: Vec<String>,
    /// Personality traits scoring above 65, in alphabetical order.
    pub dominant_traits: Vec<TraitName>,
}

//
// ─── INSIGHTS ──────────────────────────────────────────────────────────────────
//

/// Strengths and suggestions read off an ability score's level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityInsight {
    pub score: f64,
    pub level: ScoreLevel,
    pub strengths: Vec<String>,
    pub suggestions: Vec<String>,
}

/// One personality trait with its high or low description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitReading {
    pub score: f64,
    /// High description above 50, low description otherwise.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityInsight {
    pub traits: BTreeMap<TraitName, TraitReading>,
    pub overview: String,
    /// What the dominant traits suggest together; `None` without dominant traits.
    pub combination: Option<String>,
    pub suggestions: Vec<String>,
}

//
// ─── ACHIEVEMENTS ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub title: &'static str,
    pub description: &'static str,
    pub rarity: Rarity,
    pub unlocked: bool,
}

//
// ─── RESULTS MODEL ─────────────────────────────────────────────────────────────
//

/// Aggregated, immutable output of a completed assessment.
///
/// Dimensions without a contributing question are absent rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsModel {
    /// Objective buckets keyed by question category (e.g. `intelligence`).
    pub categories: BTreeMap<String, DimensionScore>,
    /// Subjective trait accumulators keyed by trait name.
    pub traits: BTreeMap<TraitName, DimensionScore>,
    pub mini_games: BTreeMap<MiniGameType, MiniGameResult>,
    pub mini_game_summary: Option<MiniGameSummary>,
    pub profile: Option<CognitiveProfile>,
    pub intelligence_insight: Option<AbilityInsight>,
    pub creativity_insight: Option<AbilityInsight>,
    pub personality_insight: Option<PersonalityInsight>,
    pub achievements: Vec<Achievement>,
    pub answered: u32,
    pub timed_out: u32,
}

impl ResultsModel {
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&DimensionScore> {
        self.categories.get(name)
    }

    #[must_use]
    pub fn trait_score(&self, name: &str) -> Option<&DimensionScore> {
        self.traits.iter().find(|(t, _)| t.as_str() == name).map(|(_, s)| s)
    }

    /// Objective intelligence score.
    #[must_use]
    pub fn intelligence(&self) -> Option<&DimensionScore> {
        self.category("intelligence")
    }

    /// Creativity as a trait, falling back to an objective creativity bucket.
    #[must_use]
    pub fn creativity(&self) -> Option<&DimensionScore> {
        self.trait_score("creativity").or_else(|| self.category("creativity"))
    }

    /// Personality map restricted to the five reported traits.
    pub fn personality(&self) -> impl Iterator<Item = (&TraitName, &DimensionScore)> {
        self.traits
            .iter()
            .filter(|(name, _)| PERSONALITY_TRAITS.contains(&name.as_str()))
    }

    #[must_use]
    pub fn unlocked_achievements(&self) -> Vec<&Achievement> {
        self.achievements.iter().filter(|a| a.unlocked).collect()
    }
}
