//! Mini-game contract: runners report typed raw outcomes, the adapter turns
//! them into normalized `MiniGameResult`s, and the picker decides which game
//! fills the next slot.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use mind_core::model::{AssessmentSettings, MiniGameResult, MiniGameType};

/// Raw outcome reported by a mini-game activity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MiniGameOutcome {
    /// Fastest valid reaction; `None` when every attempt was premature.
    ReactionTime { best_ms: Option<u32> },
    PatternMemory { highest_level: u32, points: u32 },
    NumberSequence { correct: bool },
    SpatialPuzzle { solved: bool, moves: u32 },
}

impl MiniGameOutcome {
    #[must_use]
    pub fn game_type(&self) -> MiniGameType {
        match self {
            MiniGameOutcome::ReactionTime { .. } => MiniGameType::ReactionTime,
            MiniGameOutcome::PatternMemory { .. } => MiniGameType::PatternMemory,
            MiniGameOutcome::NumberSequence { .. } => MiniGameType::NumberSequence,
            MiniGameOutcome::SpatialPuzzle { .. } => MiniGameType::SpatialPuzzle,
        }
    }
}

/// Normalize a raw outcome into a score in `[0, 100]` plus display metrics.
#[must_use]
pub fn normalize(outcome: MiniGameOutcome) -> MiniGameResult {
    let game = outcome.game_type();
    match outcome {
        MiniGameOutcome::ReactionTime { best_ms: None } => MiniGameResult::new(game, 0.0),
        MiniGameOutcome::ReactionTime { best_ms: Some(ms) } => {
            let score = 100.0 - (f64::from(ms) - 150.0) / 2.0;
            MiniGameResult::new(game, score)
                .with_metric("best_time_ms", f64::from(ms))
                .with_metric("percentile", reaction_percentile(ms))
        }
        MiniGameOutcome::PatternMemory {
            highest_level,
            points,
        } => MiniGameResult::new(game, memory_percentile(highest_level))
            .with_metric("highest_level", f64::from(highest_level))
            .with_metric("points", f64::from(points)),
        MiniGameOutcome::NumberSequence { correct } => {
            MiniGameResult::new(game, if correct { 100.0 } else { 0.0 })
        }
        MiniGameOutcome::SpatialPuzzle { solved, moves } => {
            MiniGameResult::new(game, if solved { 100.0 } else { 0.0 })
                .with_metric("moves", f64::from(moves))
        }
    }
}

fn reaction_percentile(ms: u32) -> f64 {
    match ms {
        0..160 => 99.0,
        160..200 => 90.0,
        200..230 => 75.0,
        230..270 => 50.0,
        _ => (50.0 * (400.0 - f64::from(ms)) / 130.0).round().max(1.0),
    }
}

fn memory_percentile(level: u32) -> f64 {
    match level {
        20.. => 99.9,
        15.. => 99.0,
        12.. => 90.0,
        10.. => 75.0,
        8.. => 50.0,
        _ => (50.0 * f64::from(level) / 8.0).round().max(1.0),
    }
}

//
// ─── RUNNER + ADAPTER ──────────────────────────────────────────────────────────
//

pub type OutcomeCallback = Box<dyn FnOnce(MiniGameOutcome) + Send>;
pub type ResultCallback = Box<dyn FnOnce(MiniGameResult) + Send>;

/// An opaque mini-game activity.
///
/// Implementations call `on_complete` exactly once, either before `run`
/// returns or later from wherever the activity finishes.
pub trait MiniGameRunner: Send {
    fn run(&mut self, game: MiniGameType, on_complete: OutcomeCallback);
}

/// Wraps a runner so callers only ever see normalized results.
pub struct MiniGameAdapter {
    runner: Box<dyn MiniGameRunner>,
}

impl std::fmt::Debug for MiniGameAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniGameAdapter").finish_non_exhaustive()
    }
}

impl MiniGameAdapter {
    #[must_use]
    pub fn new(runner: impl MiniGameRunner + 'static) -> Self {
        Self {
            runner: Box::new(runner),
        }
    }

    pub fn run(&mut self, game: MiniGameType, on_complete: ResultCallback) {
        self.runner.run(
            game,
            Box::new(move |outcome| on_complete(normalize(outcome))),
        );
    }
}

//
// ─── PICKER ────────────────────────────────────────────────────────────────────
//

/// Chooses the next mini-game, never repeating the previous one unless only
/// one game is enabled.
#[derive(Debug, Clone)]
pub struct MiniGamePicker {
    enabled: Vec<MiniGameType>,
    previous: Option<MiniGameType>,
    rng: StdRng,
}

impl MiniGamePicker {
    #[must_use]
    pub fn new(settings: &AssessmentSettings) -> Self {
        let rng = match settings.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            enabled: settings.enabled_games().to_vec(),
            previous: None,
            rng,
        }
    }

    /// Pick the next game, or `None` if no game is enabled.
    pub fn pick(&mut self) -> Option<MiniGameType> {
        let candidates: Vec<MiniGameType> = if self.enabled.len() > 1 {
            self.enabled
                .iter()
                .copied()
                .filter(|game| Some(*game) != self.previous)
                .collect()
        } else {
            self.enabled.clone()
        };
        let game = *candidates.choose(&mut self.rng)?;
        self.previous = Some(game);
        Some(game)
    }

    #[must_use]
    pub fn previous(&self) -> Option<MiniGameType> {
        self.previous
    }
}
