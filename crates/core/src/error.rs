use thiserror::Error;

use crate::bank::BankError;
use crate::model::{
    ParseIdError, ParseMiniGameTypeError, ParseModeError, QuestionError, SettingsError,
    TraitNameError,
};
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    TraitName(#[from] TraitNameError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Mode(#[from] ParseModeError),
    #[error(transparent)]
    MiniGameType(#[from] ParseMiniGameTypeError),
    #[error(transparent)]
    SessionId(#[from] ParseIdError),
}
