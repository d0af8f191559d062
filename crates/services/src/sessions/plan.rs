use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use mind_core::bank::{BankError, QuestionBank, QuestionCatalog};
use mind_core::model::{AssessmentMode, AssessmentSettings};

/// Builds the ordered question list for one run.
pub struct QuestionPlanner<'a> {
    catalog: &'a QuestionCatalog,
    shuffle: bool,
    seed: Option<u64>,
}

impl<'a> QuestionPlanner<'a> {
    #[must_use]
    pub fn new(catalog: &'a QuestionCatalog) -> Self {
        Self {
            catalog,
            shuffle: false,
            seed: None,
        }
    }

    /// Take the shuffle flag and seed from `settings`.
    #[must_use]
    pub fn with_settings(mut self, settings: &AssessmentSettings) -> Self {
        self.shuffle = settings.shuffle_questions();
        self.seed = settings.seed();
        self
    }

    /// Select the mode's questions, shuffled when requested.
    ///
    /// A seeded planner always produces the same order.
    ///
    /// # Errors
    ///
    /// Returns `BankError::NotEnoughQuestions` if the catalog cannot fill the mode.
    pub fn build(self, mode: AssessmentMode) -> Result<QuestionBank, BankError> {
        let bank = self.catalog.bank(mode)?;
        if !self.shuffle {
            return Ok(bank);
        }

        let mut order: Vec<usize> = (0..bank.count()).collect();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        order.as_mut_slice().shuffle(&mut rng);
        Ok(bank.reordered(&order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::builtin().unwrap()
    }

    #[test]
    fn unshuffled_plan_keeps_catalog_order() {
        let catalog = catalog();
        let bank = QuestionPlanner::new(&catalog)
            .build(AssessmentMode::Quick)
            .unwrap();
        assert_eq!(bank.questions(), &catalog.questions()[..10]);
    }

    #[test]
    fn seeded_shuffle_is_reproducible_and_keeps_the_same_questions() {
        let catalog = catalog();
        let settings = AssessmentSettings::default()
            .with_shuffle_questions(true)
            .with_seed(11);

        let first = QuestionPlanner::new(&catalog)
            .with_settings(&settings)
            .build(AssessmentMode::Standard)
            .unwrap();
        let second = QuestionPlanner::new(&catalog)
            .with_settings(&settings)
            .build(AssessmentMode::Standard)
            .unwrap();
        assert_eq!(first, second);

        let mut ids: Vec<_> = first.questions().iter().map(|q| q.id().clone()).collect();
        let mut expected: Vec<_> = catalog.questions()[..30]
            .iter()
            .map(|q| q.id().clone())
            .collect();
        ids.sort();
        expected.sort();
        assert_eq!(ids, expected);
    }
}
