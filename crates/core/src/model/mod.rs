mod answer;
mod ids;
mod mini_game;
mod mode;
mod question;
pub mod results;
mod settings;

pub use ids::{ParseIdError, QuestionId, SessionId};

pub use answer::Answer;
pub use mini_game::{MiniGameResult, MiniGameType, ParseMiniGameTypeError};
pub use mode::{AssessmentMode, ParseModeError};
pub use question::{
    AnswerOption, Category, MAX_OPTIONS, MIN_OPTIONS, Question, QuestionDraft, QuestionError,
    TraitImpact, TraitName, TraitNameError,
};
pub use results::{
    AbilityInsight, Achievement, CognitiveProfile, Complexity, DimensionScore, MiniGameSummary,
    PersonalityInsight, Rarity, ResultsModel, ScoreLevel, ThinkingPattern, ThinkingStyle,
    TraitReading,
};
pub use settings::{AssessmentSettings, MINI_GAME_INTERVAL, SettingsError, TimeoutPolicy};
