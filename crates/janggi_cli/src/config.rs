//! Driver configuration: an optional TOML file overlaid by command-line flags.
//!
//! ```toml
//! player_side = "second"
//! level = 4
//! engine = "classical"
//!
//! [formations]
//! first = 0
//! second = 2
//!
//! [rules]
//! move_limit = 200
//! komi = 1.5
//! low_material = 10
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use janggi_core::{depth_for_level, Formation, Game, GameState, Rules, Side};

/// Which [`janggi_core::Engine`] plays the computer side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Classical,
    Random,
}

/// Opening formation for each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formations {
    pub first: Formation,
    pub second: Formation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Side the human plays in `play`.
    pub player_side: Side,
    /// Difficulty 1..=9, mapped to search depth.
    pub level: u8,
    pub engine: EngineKind,
    pub formations: Formations,
    pub rules: Rules,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            player_side: Side::First,
            level: 3,
            engine: EngineKind::Classical,
            formations: Formations::default(),
            rules: Rules::default(),
        }
    }
}

/// Values given on the command line; each one replaces the file's value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub player_side: Option<Side>,
    pub level: Option<u8>,
    pub engine: Option<EngineKind>,
    pub first_formation: Option<Formation>,
    pub second_formation: Option<Formation>,
}

impl CliConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Loads `path` if given, otherwise starts from the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(side) = overrides.player_side {
            self.player_side = side;
        }
        if let Some(level) = overrides.level {
            self.level = level;
        }
        if let Some(engine) = overrides.engine {
            self.engine = engine;
        }
        if let Some(formation) = overrides.first_formation {
            self.formations.first = formation;
        }
        if let Some(formation) = overrides.second_formation {
            self.formations.second = formation;
        }
    }

    pub fn depth(&self) -> u8 {
        depth_for_level(self.level)
    }

    pub fn new_game(&self) -> Game {
        let state = GameState::new(self.formations.first, self.formations.second)
            .with_rules(self.rules);
        Game::from_state(state)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
