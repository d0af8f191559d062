use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{AssessmentMode, Question, QuestionDraft, QuestionError, QuestionId};

const BUILTIN_CATALOG: &str = include_str!("../data/questions.json");

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct QuestionList {
    questions: Vec<QuestionDraft>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("failed to parse question catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid question {id}: {source}")]
    InvalidQuestion {
        id: QuestionId,
        #[source]
        source: QuestionError,
    },

    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),

    #[error("catalog holds {available} questions, {mode} mode needs {needed}")]
    NotEnoughQuestions {
        mode: AssessmentMode,
        needed: usize,
        available: usize,
    },

    #[error("question index {index} out of range (bank has {count})")]
    IndexOutOfRange { index: usize, count: usize },
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Every validated question, in catalog order.
///
/// Modes draw prefixes of this list, so the quick set is contained in the
/// standard set which is contained in the deep set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Load the catalog compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the embedded catalog fails to parse or validate.
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from JSON text of the form
    /// `{"questions": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Parse` for malformed JSON,
    /// `BankError::InvalidQuestion` for an entry that fails validation, and
    /// `BankError::DuplicateId` when two entries share an id.
    pub fn from_json(raw: &str) -> Result<Self, BankError> {
        let list: QuestionList = serde_json::from_str(raw)?;
        Self::from_drafts(list.questions)
    }

    /// Validate a list of drafts into a catalog.
    ///
    /// # Errors
    ///
    /// See [`QuestionCatalog::from_json`].
    pub fn from_drafts(drafts: Vec<QuestionDraft>) -> Result<Self, BankError> {
        let mut seen = HashSet::with_capacity(drafts.len());
        let mut questions = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = draft.id.clone();
            if !seen.insert(id.clone()) {
                return Err(BankError::DuplicateId(id));
            }
            let question = draft
                .validate()
                .map_err(|source| BankError::InvalidQuestion { id, source })?;
            questions.push(question);
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Ordered question list for `mode`.
    ///
    /// # Errors
    ///
    /// Returns `BankError::NotEnoughQuestions` if the catalog is shorter than
    /// the mode's question count.
    pub fn bank(&self, mode: AssessmentMode) -> Result<QuestionBank, BankError> {
        let needed = mode.question_count();
        if self.questions.len() < needed {
            return Err(BankError::NotEnoughQuestions {
                mode,
                needed,
                available: self.questions.len(),
            });
        }
        Ok(QuestionBank {
            mode,
            questions: self.questions[..needed].to_vec(),
        })
    }
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// Fixed, ordered question list of one assessment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    mode: AssessmentMode,
    questions: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn mode(&self) -> AssessmentMode {
        self.mode
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.questions.len()
    }

    /// Question at `index`.
    ///
    /// # Errors
    ///
    /// Returns `BankError::IndexOutOfRange` when `index >= count()`.
    pub fn get(&self, index: usize) -> Result<&Question, BankError> {
        self.questions.get(index).ok_or(BankError::IndexOutOfRange {
            index,
            count: self.questions.len(),
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Reorder the bank with the given index permutation.
    ///
    /// Entries of `order` that are out of range or repeated are ignored;
    /// questions not named keep their relative order at the end.
    #[must_use]
    pub fn reordered(self, order: &[usize]) -> Self {
        let mut taken = vec![false; self.questions.len()];
        let mut questions = Vec::with_capacity(self.questions.len());
        for &index in order {
            if let Some(slot) = taken.get_mut(index)
                && !*slot
            {
                *slot = true;
                questions.push(self.questions[index].clone());
            }
        }
        for (index, question) in self.questions.iter().enumerate() {
            if !taken[index] {
                questions.push(question.clone());
            }
        }
        Self {
            mode: self.mode,
            questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerOption;

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::builtin().expect("builtin catalog should validate")
    }

    #[test]
    fn builtin_catalog_covers_every_mode() {
        let catalog = catalog();
        for mode in AssessmentMode::ALL {
            let bank = catalog.bank(mode).unwrap();
            assert_eq!(bank.count(), mode.question_count());
            assert_eq!(bank.mode(), mode);
        }
    }

    #[test]
    fn smaller_modes_are_prefixes_of_larger_ones() {
        let catalog = catalog();
        let quick = catalog.bank(AssessmentMode::Quick).unwrap();
        let deep = catalog.bank(AssessmentMode::Deep).unwrap();
        assert_eq!(quick.questions(), &deep.questions()[..quick.count()]);
    }

    #[test]
    fn builtin_catalog_contains_objective_and_timed_questions() {
        let catalog = catalog();
        assert!(catalog.questions().iter().any(Question::is_objective));
        assert!(catalog.questions().iter().any(Question::is_timed));
    }

    #[test]
    fn get_out_of_range_is_error() {
        let bank = catalog().bank(AssessmentMode::Quick).unwrap();
        let err = bank.get(10).unwrap_err();
        assert!(matches!(
            err,
            BankError::IndexOutOfRange {
                index: 10,
                count: 10
            }
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let options = vec![AnswerOption::plain("a"), AnswerOption::plain("b")];
        let drafts = vec![
            QuestionDraft::new("q1", "first", options.clone()),
            QuestionDraft::new("q1", "second", options),
        ];
        let err = QuestionCatalog::from_drafts(drafts).unwrap_err();
        assert!(matches!(err, BankError::DuplicateId(id) if id.as_str() == "q1"));
    }

    #[test]
    fn invalid_entry_reports_its_id() {
        let raw = r#"{"questions":[{"id":"bad","text":"?","options":["only"]}]}"#;
        let err = QuestionCatalog::from_json(raw).unwrap_err();
        match err {
            BankError::InvalidQuestion { id, source } => {
                assert_eq!(id.as_str(), "bad");
                assert_eq!(source, QuestionError::OptionCount { count: 1 });
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_id_is_rejected() {
        let raw = r#"{"questions":[{"id":"  ","text":"?","options":["a","b"]}]}"#;
        let err = QuestionCatalog::from_json(raw).unwrap_err();
        assert!(matches!(
            err,
            BankError::InvalidQuestion {
                source: QuestionError::EmptyId,
                ..
            }
        ));
    }

    #[test]
    fn short_catalog_cannot_serve_deep_mode() {
        let raw = r#"{"questions":[{"id":"q","text":"?","options":["a","b"]}]}"#;
        let catalog = QuestionCatalog::from_json(raw).unwrap();
        let err = catalog.bank(AssessmentMode::Quick).unwrap_err();
        assert!(matches!(
            err,
            BankError::NotEnoughQuestions {
                needed: 10,
                available: 1,
                ..
            }
        ));
    }

    #[test]
    fn reordered_applies_permutation_and_ignores_noise() {
        let bank = catalog().bank(AssessmentMode::Quick).unwrap();
        let first = bank.get(0).unwrap().id().clone();
        let last = bank.get(9).unwrap().id().clone();

        let reordered = bank.reordered(&[9, 9, 42, 0]);
        assert_eq!(reordered.count(), 10);
        assert_eq!(reordered.get(0).unwrap().id(), &last);
        assert_eq!(reordered.get(1).unwrap().id(), &first);
    }
}
