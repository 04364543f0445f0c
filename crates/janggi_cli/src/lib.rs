//! Terminal driver for the janggi engine: interactive play and self-play.

pub mod config;
pub mod play;
pub mod selfplay;

pub use config::{CliConfig, EngineKind, Formations, Overrides};
pub use play::{Command, Session};
pub use selfplay::{play_game, GameRecord, RecordedAction, SelfPlayConfig};

use classical_engine::ClassicalEngine;
use janggi_core::{EndReason, Engine, Outcome};
use random_engine::RandomEngine;

/// Builds the engine named by `kind`. The seed only affects the random engine.
pub fn create_engine(kind: EngineKind, seed: Option<u64>) -> Box<dyn Engine> {
    match kind {
        EngineKind::Classical => Box::new(ClassicalEngine::new()),
        EngineKind::Random => match seed {
            Some(seed) => Box::new(RandomEngine::with_seed(seed)),
            None => Box::new(RandomEngine::new()),
        },
    }
}

/// One-line summary such as `game over (checkmate): first wins`.
pub fn describe_outcome(outcome: Outcome) -> String {
    let reason = match outcome.reason {
        EndReason::Checkmate => "checkmate",
        EndReason::MoveLimit => "move limit",
        EndReason::DoublePass => "both sides passed",
        EndReason::LowMaterial => "low material",
    };
    match outcome.winner {
        Some(side) => format!("game over ({reason}): {side} wins"),
        None => format!("game over ({reason}): draw"),
    }
}
