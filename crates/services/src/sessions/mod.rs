mod listeners;
mod plan;
mod progress;
mod service;
mod state;

// Public API of the session subsystem.
pub use crate::error::{ErrorKind, SessionError};
pub use listeners::{
    CompleteListener, MiniGameListener, QuestionListener, SubscriptionId, TickListener,
};
pub use plan::QuestionPlanner;
pub use progress::SessionProgress;
pub use service::AssessmentSession;
pub use state::{SessionState, is_mini_game_slot};
