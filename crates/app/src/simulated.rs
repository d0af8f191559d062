use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use mind_core::model::MiniGameType;
use services::MiniGameOutcome;
use services::MiniGameRunner;
use services::mini_games::OutcomeCallback;

/// Plays each mini-game by rolling a plausible outcome and reporting it after
/// a short delay on the runtime.
pub struct SimulatedRunner {
    rng: StdRng,
    delay: Duration,
}

impl SimulatedRunner {
    pub fn new(seed: Option<u64>, delay: Duration) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ 0x5eed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rng, delay }
    }

    fn roll(&mut self, game: MiniGameType) -> MiniGameOutcome {
        match game {
            MiniGameType::ReactionTime => MiniGameOutcome::ReactionTime {
                best_ms: (!self.rng.random_bool(0.1)).then(|| self.rng.random_range(160..=420)),
            },
            MiniGameType::PatternMemory => {
                let highest_level = self.rng.random_range(3..=14);
                MiniGameOutcome::PatternMemory {
                    highest_level,
                    points: highest_level * highest_level * 10,
                }
            }
            MiniGameType::NumberSequence => MiniGameOutcome::NumberSequence {
                correct: self.rng.random_bool(0.6),
            },
            MiniGameType::SpatialPuzzle => MiniGameOutcome::SpatialPuzzle {
                solved: self.rng.random_bool(0.7),
                moves: self.rng.random_range(8..=30),
            },
        }
    }
}

impl MiniGameRunner for SimulatedRunner {
    fn run(&mut self, game: MiniGameType, on_complete: OutcomeCallback) {
        let outcome = self.roll(game);
        let delay = self.delay;
        debug!(%game, ?outcome, "simulating mini-game");
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_complete(outcome);
        });
    }
}
