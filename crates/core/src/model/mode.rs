use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Assessment length. Modes differ only in how many catalog questions they use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentMode {
    #[default]
    Quick,
    Standard,
    Deep,
}

impl AssessmentMode {
    pub const ALL: [AssessmentMode; 3] = [Self::Quick, Self::Standard, Self::Deep];

    /// Number of questions presented in this mode.
    #[must_use]
    pub fn question_count(self) -> usize {
        match self {
            AssessmentMode::Quick => 10,
            AssessmentMode::Standard => 30,
            AssessmentMode::Deep => 50,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AssessmentMode::Quick => "quick",
            AssessmentMode::Standard => "standard",
            AssessmentMode::Deep => "deep",
        }
    }
}

impl fmt::Display for AssessmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown assessment mode: {raw:?} (expected quick, standard or deep)")]
pub struct ParseModeError {
    pub raw: String,
}

impl FromStr for AssessmentMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(Self::Quick),
            "standard" => Ok(Self::Standard),
            "deep" | "in-depth" => Ok(Self::Deep),
            _ => Err(ParseModeError { raw: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_grow_with_depth() {
        assert_eq!(AssessmentMode::Quick.question_count(), 10);
        assert_eq!(AssessmentMode::Standard.question_count(), 30);
        assert_eq!(AssessmentMode::Deep.question_count(), 50);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Quick".parse::<AssessmentMode>().unwrap(), AssessmentMode::Quick);
        assert_eq!(" deep ".parse::<AssessmentMode>().unwrap(), AssessmentMode::Deep);
        let err = "marathon".parse::<AssessmentMode>().unwrap_err();
        assert_eq!(err.raw, "marathon");
    }
}
