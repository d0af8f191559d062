//! Shared error types for the services crate.

use thiserror::Error;

use mind_core::bank::BankError;
use mind_core::model::{ParseMiniGameTypeError, ParseModeError, SettingsError};
use mind_core::scoring::ScoringError;

use crate::sessions::SessionState;

/// Coarse classification of a `SessionError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operation is not allowed in the current session state.
    InvalidStateTransition,
    /// The caller passed a value the session cannot accept.
    InvalidInput,
    /// The question data or recorded answers are inconsistent.
    Configuration,
}

/// Errors emitted by the assessment session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {action} while session is {state}")]
    InvalidStateTransition {
        state: SessionState,
        action: &'static str,
    },
    #[error("question {index} must be answered before advancing")]
    Unanswered { index: usize },
    #[error("already at the first question")]
    AtFirstQuestion,
    #[error("cannot go back across the mini-game played after question {slot}")]
    GoBackLocked { slot: usize },
    #[error("option {option} is out of range for question {question_index} ({count} options)")]
    OptionOutOfRange {
        question_index: usize,
        option: usize,
        count: usize,
    },
    #[error(transparent)]
    Mode(#[from] ParseModeError),
    #[error(transparent)]
    MiniGameType(#[from] ParseMiniGameTypeError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl SessionError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::InvalidStateTransition { .. }
            | SessionError::Unanswered { .. }
            | SessionError::AtFirstQuestion
            | SessionError::GoBackLocked { .. } => ErrorKind::InvalidStateTransition,
            SessionError::OptionOutOfRange { .. }
            | SessionError::Mode(_)
            | SessionError::MiniGameType(_) => ErrorKind::InvalidInput,
            SessionError::Settings(_) | SessionError::Bank(_) | SessionError::Scoring(_) => {
                ErrorKind::Configuration
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failures_are_invalid_input() {
        let err: SessionError = "turbo"
            .parse::<mind_core::model::AssessmentMode>()
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn state_errors_mention_action() {
        let err = SessionError::InvalidStateTransition {
            state: SessionState::Completed,
            action: "submit an answer",
        };
        assert_eq!(err.kind(), ErrorKind::InvalidStateTransition);
        assert_eq!(err.to_string(), "cannot submit an answer while session is completed");
    }

    #[test]
    fn scoring_errors_are_configuration() {
        let err = SessionError::from(ScoringError::DuplicateAnswer { index: 1 });
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
