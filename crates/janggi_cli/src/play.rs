//! Human-versus-engine session driven by line-based input.
//!
//! The session owns the [`Game`] and borrows the engine. It alternates between
//! reading one command from the human and asking the engine for a reply, so a
//! search never overlaps a human move.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use janggi_core::{Engine, Game, GameError, Move, MoveResult, Outcome, Position, Side};

use crate::{config::CliConfig, describe_outcome};

const HELP: &str = "\
commands:
  moves <square>   destinations for the piece on <square>, e.g. `moves a6`
  <from><to>       play a move, e.g. `a6a5` (or `move a6a5`)
  pass             pass the turn
  undo             take back your last move and the engine's reply
  board            show the board
  score            show material and adjudicated scores
  help             show this text
  quit             leave the game";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Moves(Position),
    Play(Move),
    Pass,
    Undo,
    Board,
    Score,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let word = words.next().unwrap_or("");
        let arg = words.next();
        if words.next().is_some() {
            bail!("too many arguments in `{}`", line.trim());
        }

        let command = match (word.to_ascii_lowercase().as_str(), arg) {
            ("moves", Some(square)) => Command::Moves(square.parse()?),
            ("move", Some(mv)) => Command::Play(mv.parse()?),
            ("pass", None) => Command::Pass,
            ("undo", None) => Command::Undo,
            ("board", None) => Command::Board,
            ("score", None) => Command::Score,
            ("help" | "?", None) => Command::Help,
            ("quit" | "exit", None) => Command::Quit,
            (mv, None) if mv.len() == 4 => Command::Play(mv.parse()?),
            _ => bail!("unknown command `{}`, type `help`", line.trim()),
        };
        Ok(command)
    }
}

pub struct Session<'e> {
    game: Game,
    engine: &'e mut dyn Engine,
    human: Side,
    depth: u8,
}

impl<'e> Session<'e> {
    pub fn new(config: &CliConfig, engine: &'e mut dyn Engine) -> Self {
        engine.new_game();
        Self {
            game: config.new_game(),
            engine,
            human: config.player_side,
            depth: config.depth(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs until the game ends, the human quits or the input is exhausted.
    /// Returns the outcome if the game ended.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<Option<Outcome>> {
        writeln!(out, "{}", self.game.state().board())?;
        let mut lines = input.lines();

        loop {
            if let Some(outcome) = self.game.state().outcome() {
                writeln!(out, "{}", describe_outcome(outcome))?;
                return Ok(Some(outcome));
            }

            if self.game.state().side_to_move() != self.human {
                self.engine_turn(out)?;
                continue;
            }

            write!(out, "{} to move> ", self.human)?;
            out.flush()?;
            let Some(line) = lines.next() else {
                return Ok(None);
            };
            let line = line.context("failed to read command")?;
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => return Ok(None),
                Ok(command) => self.execute(command, out)?,
                Err(err) => writeln!(out, "{err}")?,
            }
        }
    }

    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::Moves(pos) => match self.game.legal_moves(pos) {
                Ok(dests) if dests.is_empty() => writeln!(out, "{pos}: no legal moves")?,
                Ok(dests) => {
                    let list: Vec<String> = dests.iter().map(ToString::to_string).collect();
                    writeln!(out, "{pos}: {}", list.join(" "))?;
                }
                Err(err) => reject(out, err)?,
            },
            Command::Play(mv) => match self.game.apply_move(mv.from, mv.to) {
                Ok(result) => self.report(self.human, &mv.to_string(), &result, out)?,
                Err(err) => reject(out, err)?,
            },
            Command::Pass => match self.game.apply_pass() {
                Ok(result) => self.report(self.human, "pass", &result, out)?,
                Err(err) => reject(out, err)?,
            },
            Command::Undo => match self.game.undo_turn() {
                Ok(state) => writeln!(out, "{}", state.board())?,
                Err(err) => reject(out, err)?,
            },
            Command::Board => writeln!(out, "{}", self.game.state().board())?,
            Command::Score => {
                let state = self.game.state();
                let (first, second) = state.material_scores();
                let (first_adj, second_adj) = state.adjudicated_scores();
                writeln!(
                    out,
                    "material: first {first}, second {second} (adjudicated {first_adj:.1} : {second_adj:.1})"
                )?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn engine_turn<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let side = self.game.state().side_to_move();
        let search = self.engine.search(self.game.state(), self.depth)?;
        debug!(
            engine = self.engine.name(),
            depth = search.depth,
            nodes = search.nodes,
            score = search.score,
            "engine reply"
        );

        let (label, result) = match search.best_move {
            Some(mv) => (mv.to_string(), self.game.apply_move(mv.from, mv.to)?),
            None => ("pass".to_string(), self.game.apply_pass()?),
        };
        self.report(side, &label, &result, out)
    }

    fn report<W: Write>(
        &self,
        side: Side,
        action: &str,
        result: &MoveResult,
        out: &mut W,
    ) -> Result<()> {
        write!(out, "{side} plays {action}")?;
        if let Some(kind) = result.captured {
            write!(out, ", capturing {kind:?}")?;
        }
        writeln!(out)?;
        writeln!(out, "{}", self.game.state().board())?;

        if result.game_over.is_none() {
            if result.check {
                writeln!(out, "{} is in check", result.side_to_move)?;
            }
            if result.stalemate {
                writeln!(out, "{} has no legal move and must pass", result.side_to_move)?;
            }
        }
        Ok(())
    }
}

fn reject<W: Write>(out: &mut W, err: GameError) -> Result<()> {
    warn!(%err, "action rejected");
    writeln!(out, "error: {err}")?;
    Ok(())
}

#[cfg(test)]
#[path = "play_tests.rs"]
mod play_tests;
