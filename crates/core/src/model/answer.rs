use serde::{Deserialize, Serialize};

/// A single recorded response to the question at `question_index`.
///
/// `selected` is `None` when the question expired and no option could be
/// resolved as its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_index: usize,
    pub selected: Option<usize>,
    pub timed_out: bool,
}

impl Answer {
    /// An option chosen by the user.
    #[must_use]
    pub fn chosen(question_index: usize, option_index: usize) -> Self {
        Self {
            question_index,
            selected: Some(option_index),
            timed_out: false,
        }
    }

    /// A question that ran out of time; `default` is the auto-selected option.
    #[must_use]
    pub fn expired(question_index: usize, default: Option<usize>) -> Self {
        Self {
            question_index,
            selected: default,
            timed_out: true,
        }
    }

    /// True when the user actually picked the option.
    #[must_use]
    pub fn is_user_choice(&self) -> bool {
        !self.timed_out && self.selected.is_some()
    }
}
