#![forbid(unsafe_code)]

pub mod error;
pub mod mini_games;
pub mod sessions;
pub mod sound;
pub mod timer;

pub use mind_core::Clock;
pub use sessions as session;

pub use error::{ErrorKind, SessionError};
pub use mini_games::{MiniGameAdapter, MiniGameOutcome, MiniGamePicker, MiniGameRunner};
pub use sessions::{AssessmentSession, SessionProgress, SessionState, SubscriptionId};
pub use sound::{NullSound, SoundEvent, SoundSink};
pub use timer::{TimerController, TimerHandle};
