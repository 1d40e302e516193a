//! Collaborator contracts the engine calls into, and the local
//! implementations used when no authority or solver is attached.
//!
//! Everything here is synchronous and returns immediately; the engine
//! assumes each collaborator keeps its own invariants.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::config::GameConfig;
use crate::hero::{GridPathfinder, Pathfinder, Roster};
use crate::tile::{GridGeometry, TileGeometry};

/// Coarse game progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Heroes are on their way to the articles.
    #[default]
    Theft,
    /// Articles are stolen; heroes head for the exits.
    Escape,
}

/// The AI solver as seen from the client.
pub trait Solver {
    /// Re-evaluate hints and bots after the board changed.
    fn run(&mut self, board: &Board, roster: &Roster);

    /// Whether the current roster satisfies the win condition.
    fn check_for_win(&self, roster: &Roster) -> bool;
}

/// The shared sand clock.
pub trait Clock {
    fn invert(&mut self);
}

/// Game-level state owned outside the engine.
pub trait Game {
    fn is_ended(&self) -> bool;
    fn win(&mut self);
    fn phase(&self) -> Phase;
    fn set_phase(&mut self, phase: Phase);
    fn is_paused(&self) -> bool;
    fn pause(&mut self);
    fn resume(&mut self);
    /// Human clients connected to the game, including this one.
    fn players(&self) -> usize;
    /// Bot opponents attached to the game.
    fn bots(&self) -> usize;

    fn is_phase(&self, phase: Phase) -> bool {
        self.phase() == phase
    }
}

/// Solver that only answers the win check: the game is won once every
/// hero has exited.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleSolver;

impl Solver for IdleSolver {
    fn run(&mut self, board: &Board, roster: &Roster) {
        debug!(cells = board.len(), heroes = roster.len(), "solver run requested");
    }

    fn check_for_win(&self, roster: &Roster) -> bool {
        !roster.is_empty() && roster.iter().all(|h| h.exited)
    }
}

/// Sand timer. Inverting it swaps the sand still to fall with the sand
/// already fallen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hourglass {
    total: Duration,
    remaining: Duration,
}

impl Hourglass {
    #[must_use]
    pub fn new(total: Duration) -> Self {
        Self { total, remaining: total }
    }
}

impl Clock for Hourglass {
    fn invert(&mut self) {
        self.remaining = self.total.saturating_sub(self.remaining);
    }
}

/// In-process game state.
#[derive(Debug, Clone, Default)]
pub struct LocalGame {
    pub phase: Phase,
    pub ended: bool,
    pub won: bool,
    pub paused: bool,
    pub players: usize,
    pub bots: usize,
}

impl LocalGame {
    #[must_use]
    pub fn new(players: usize, bots: usize) -> Self {
        Self { players, bots, ..Self::default() }
    }

    /// End the game without winning (clock ran out, abandon).
    pub fn end(&mut self) {
        self.ended = true;
    }
}

impl Game for LocalGame {
    fn is_ended(&self) -> bool {
        self.ended
    }

    fn win(&mut self) {
        self.won = true;
        self.ended = true;
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn players(&self) -> usize {
        self.players
    }

    fn bots(&self) -> usize {
        self.bots
    }
}

/// Default sand clock length.
pub const DEFAULT_CLOCK: Duration = Duration::from_secs(180);

/// The collaborators injected into the engine at construction.
pub struct Host {
    pub geometry: Box<dyn TileGeometry>,
    pub pathfinder: Box<dyn Pathfinder>,
    pub solver: Box<dyn Solver>,
    pub clock: Box<dyn Clock>,
    pub game: Box<dyn Game>,
}

impl Host {
    /// Local collaborators for a single client with no authority attached.
    #[must_use]
    pub fn local(config: &GameConfig, players: usize) -> Self {
        Self {
            geometry: Box::new(GridGeometry::new(config.tile_size)),
            pathfinder: Box::new(GridPathfinder),
            solver: Box::new(IdleSolver),
            clock: Box::new(Hourglass::new(DEFAULT_CLOCK)),
            game: Box::new(LocalGame::new(players, 0)),
        }
    }
}
