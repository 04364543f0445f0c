//! Engine-versus-engine games with an optional JSON record.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use janggi_core::{Engine, Game, GameState, Move, Outcome, PieceKind, Rules, Side};

use crate::config::Formations;

/// Configuration for a self-play game
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Search depth for both engines
    pub depth: u8,
    pub formations: Formations,
    pub rules: Rules,
    /// Hard stop on moves plus passes. The move limit normally ends the game
    /// first; this only guards against adjudication being deferred forever.
    pub max_actions: u32,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            formations: Formations::default(),
            rules: Rules::default(),
            max_actions: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum RecordedAction {
    Move {
        side: Side,
        #[serde(rename = "move")]
        mv: Move,
        captured: Option<PieceKind>,
        score: i32,
    },
    Pass {
        side: Side,
    },
}

/// Complete record of one self-play game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub first_engine: String,
    pub second_engine: String,
    pub formations: Formations,
    pub rules: Rules,
    pub actions: Vec<RecordedAction>,
    /// `None` when `max_actions` ran out first.
    pub outcome: Option<Outcome>,
    /// Board notation of the last position.
    pub final_position: String,
}

impl GameRecord {
    /// Save the record to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize game record")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write game record {}", path.display()))
    }

    /// Load a record from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read game record {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse game record {}", path.display()))
    }

    pub fn move_count(&self) -> usize {
        self.actions.len()
    }
}

/// Plays one game, `first` moving first. A side whose engine finds no legal
/// move passes.
pub fn play_game(
    first: &mut dyn Engine,
    second: &mut dyn Engine,
    config: &SelfPlayConfig,
) -> Result<GameRecord> {
    let state = GameState::new(config.formations.first, config.formations.second)
        .with_rules(config.rules);
    let mut game = Game::from_state(state);
    first.new_game();
    second.new_game();

    let mut actions = Vec::new();
    for _ in 0..config.max_actions {
        if game.state().is_over() {
            break;
        }

        let side = game.state().side_to_move();
        let engine: &mut dyn Engine = match side {
            Side::First => &mut *first,
            Side::Second => &mut *second,
        };
        let search = engine.search(game.state(), config.depth)?;

        let action = match search.best_move {
            Some(mv) => {
                let result = game.apply_move(mv.from, mv.to)?;
                RecordedAction::Move {
                    side,
                    mv,
                    captured: result.captured,
                    score: search.score,
                }
            }
            None => {
                game.apply_pass()?;
                RecordedAction::Pass { side }
            }
        };
        debug!(?action, nodes = search.nodes, "self-play action");
        actions.push(action);
    }

    let outcome = game.state().outcome();
    info!(
        first = first.name(),
        second = second.name(),
        actions = actions.len(),
        ?outcome,
        "self-play finished"
    );

    Ok(GameRecord {
        first_engine: first.name().to_string(),
        second_engine: second.name().to_string(),
        formations: config.formations,
        rules: config.rules,
        actions,
        outcome,
        final_position: game.state().board().to_fen(),
    })
}

#[cfg(test)]
#[path = "selfplay_tests.rs"]
mod selfplay_tests;
