use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Fewest options a question may offer.
pub const MIN_OPTIONS: usize = 2;
/// Most options a question may offer.
pub const MAX_OPTIONS: usize = 4;

//
// ─── TRAITS ────────────────────────────────────────────────────────────────────
//

/// Validated trait name (trimmed, non-empty), e.g. `openness` or `analytical`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TraitName(String);

impl TraitName {
    /// Create a validated trait name.
    ///
    /// # Errors
    ///
    /// Returns `TraitNameError::Empty` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TraitNameError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TraitNameError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TraitName {
    type Error = TraitNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TraitName> for String {
    fn from(value: TraitName) -> Self {
        value.0
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TraitNameError {
    #[error("trait name cannot be empty")]
    Empty,
}

/// Mapping from trait to integer contribution.
pub type TraitImpact = BTreeMap<TraitName, i32>;

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// Scoring bucket a question belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Intelligence,
    Creativity,
    #[default]
    Personality,
    Cognitive,
    Philosophical,
    Ethical,
    Abstract,
    Other(String),
}

impl Category {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Category::Intelligence => "intelligence",
            Category::Creativity => "creativity",
            Category::Personality => "personality",
            Category::Cognitive => "cognitive",
            Category::Philosophical => "philosophical",
            Category::Ethical => "ethical",
            Category::Abstract => "abstract",
            Category::Other(name) => name,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "intelligence" => Self::Intelligence,
            "creativity" | "creative" => Self::Creativity,
            "personality" => Self::Personality,
            "cognitive" => Self::Cognitive,
            "philosophical" => Self::Philosophical,
            "ethical" => Self::Ethical,
            "abstract" => Self::Abstract,
            _ => Self::Other(normalized),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── OPTIONS ───────────────────────────────────────────────────────────────────
//

/// One selectable answer. Catalog entries are either a bare string or an
/// object carrying per-trait impact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerOption {
    PlainText(String),
    Weighted {
        text: String,
        #[serde(default)]
        impact: TraitImpact,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reasoning: Option<String>,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        timeout_default: bool,
    },
}

impl AnswerOption {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText(text.into())
    }

    #[must_use]
    pub fn weighted(text: impl Into<String>, impact: TraitImpact) -> Self {
        Self::Weighted {
            text: text.into(),
            impact,
            reasoning: None,
            timeout_default: false,
        }
    }

    /// Mark this option as the one recorded when the question times out.
    ///
    /// Plain options are promoted to weighted ones with no impact.
    #[must_use]
    pub fn as_timeout_default(self) -> Self {
        match self {
            Self::PlainText(text) => Self::Weighted {
                text,
                impact: TraitImpact::new(),
                reasoning: None,
                timeout_default: true,
            },
            Self::Weighted {
                text,
                impact,
                reasoning,
                ..
            } => Self::Weighted {
                text,
                impact,
                reasoning,
                timeout_default: true,
            },
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::PlainText(text) | Self::Weighted { text, .. } => text,
        }
    }

    /// Per-trait impact, if the option carries any.
    #[must_use]
    pub fn impact(&self) -> Option<&TraitImpact> {
        match self {
            Self::Weighted { impact, .. } if !impact.is_empty() => Some(impact),
            _ => None,
        }
    }

    #[must_use]
    pub fn reasoning(&self) -> Option<&str> {
        match self {
            Self::Weighted { reasoning, .. } => reasoning.as_deref(),
            Self::PlainText(_) => None,
        }
    }

    #[must_use]
    pub fn is_timeout_default(&self) -> bool {
        matches!(
            self,
            Self::Weighted {
                timeout_default: true,
                ..
            }
        )
    }
}

//
// ─── QUESTION DRAFT ────────────────────────────────────────────────────────────
//

/// Unvalidated question as it appears in the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub text: String,
    #[serde(default)]
    pub category: Category,
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub timed: bool,
    #[serde(default)]
    pub time_limit: Option<u32>,
    /// Text of the correct option for objective questions.
    #[serde(default)]
    pub correct: Option<String>,
    #[serde(default)]
    pub weight: TraitImpact,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            id: QuestionId::new(id),
            text: text.into(),
            category: Category::default(),
            options,
            timed: false,
            time_limit: None,
            correct: None,
            weight: TraitImpact::new(),
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.timed = true;
        self.time_limit = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_correct(mut self, correct: impl Into<String>) -> Self {
        self.correct = Some(correct.into());
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: TraitImpact) -> Self {
        self.weight = weight;
        self
    }

    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the entry is malformed: blank id, empty text, wrong
    /// option count, duplicate options, a timed question without a positive
    /// limit, several timeout defaults, or a `correct` value that names no option.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.id.as_str().trim().is_empty() {
            return Err(QuestionError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }

        let count = self.options.len();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&count) {
            return Err(QuestionError::OptionCount { count });
        }

        let mut seen = HashSet::with_capacity(count);
        for (index, option) in self.options.iter().enumerate() {
            let text = option.text().trim();
            if text.is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            if !seen.insert(text) {
                return Err(QuestionError::DuplicateOption {
                    text: text.to_string(),
                });
            }
        }

        let defaults = self
            .options
            .iter()
            .filter(|option| option.is_timeout_default())
            .count();
        if defaults > 1 {
            return Err(QuestionError::MultipleTimeoutDefaults { count: defaults });
        }

        let time_limit = match (self.timed, self.time_limit) {
            (false, _) => None,
            (true, None) => return Err(QuestionError::MissingTimeLimit),
            (true, Some(0)) => return Err(QuestionError::ZeroTimeLimit),
            (true, Some(secs)) => Some(secs),
        };

        let correct = match self.correct {
            None => None,
            Some(value) => {
                let wanted = value.trim();
                let index = self
                    .options
                    .iter()
                    .position(|option| option.text().trim() == wanted)
                    .ok_or_else(|| QuestionError::UnknownCorrect {
                        value: value.clone(),
                    })?;
                Some(index)
            }
        };

        Ok(Question {
            id: self.id,
            text: self.text,
            category: self.category,
            options: self.options,
            time_limit,
            correct,
            weight: self.weight,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Immutable, validated question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    category: Category,
    options: Vec<AnswerOption>,
    time_limit: Option<u32>,
    correct: Option<usize>,
    weight: TraitImpact,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&AnswerOption> {
        self.options.get(index)
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_timed(&self) -> bool {
        self.time_limit.is_some()
    }

    /// Countdown length in seconds for timed questions.
    #[must_use]
    pub fn time_limit(&self) -> Option<u32> {
        self.time_limit
    }

    /// Index of the correct option for objective questions.
    #[must_use]
    pub fn correct_index(&self) -> Option<usize> {
        self.correct
    }

    #[must_use]
    pub fn is_objective(&self) -> bool {
        self.correct.is_some()
    }

    /// Question-level trait weights, used when the chosen option carries none.
    #[must_use]
    pub fn weight(&self) -> &TraitImpact {
        &self.weight
    }

    /// Option explicitly marked as the timeout default, if any.
    #[must_use]
    pub fn marked_timeout_default(&self) -> Option<usize> {
        self.options
            .iter()
            .position(AnswerOption::is_timeout_default)
    }

    /// Option recorded on expiry: the marked one, else the last option.
    #[must_use]
    pub fn timeout_default(&self) -> usize {
        self.marked_timeout_default()
            .unwrap_or(self.options.len().saturating_sub(1))
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,

    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question must have between 2 and 4 options, got {count}")]
    OptionCount { count: usize },

    #[error("option {index} has empty text")]
    EmptyOption { index: usize },

    #[error("duplicate option text: {text:?}")]
    DuplicateOption { text: String },

    #[error("timed question is missing a time limit")]
    MissingTimeLimit,

    #[error("time limit must be > 0")]
    ZeroTimeLimit,

    #[error("only one option may be the timeout default, found {count}")]
    MultipleTimeoutDefaults { count: usize },

    #[error("correct answer {value:?} does not match any option")]
    UnknownCorrect { value: String },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
