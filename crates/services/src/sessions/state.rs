use std::fmt;

use mind_core::model::MiniGameType;

/// Lifecycle of an assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    InProgress,
    /// Blocked on the mini-game shown after question `slot`.
    AwaitingMiniGame { game: MiniGameType, slot: usize },
    Completed,
}

impl SessionState {
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(self, SessionState::InProgress)
    }

    #[must_use]
    pub fn is_awaiting_mini_game(&self) -> bool {
        matches!(self, SessionState::AwaitingMiniGame { .. })
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, SessionState::Completed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => f.write_str("not started"),
            SessionState::InProgress => f.write_str("in progress"),
            SessionState::AwaitingMiniGame { game, .. } => {
                write!(f, "awaiting the {game} mini-game")
            }
            SessionState::Completed => f.write_str("completed"),
        }
    }
}

/// Whether the step after question `index` hosts a mini-game.
#[must_use]
pub fn is_mini_game_slot(index: usize) -> bool {
    (index + 1) % mind_core::model::MINI_GAME_INTERVAL == 0
}
