//! Heroes, the roster, and reachability.
//!
//! The roster itself does not enforce single selection; the engine does,
//! because selection is tied to its action mode.

#[cfg(test)]
#[path = "hero_test.rs"]
mod hero_test;

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::board::{Board, CellPos, Color};

/// Unique identifier for a hero.
pub type HeroId = u32;

/// Selection status of a hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroStatus {
    #[default]
    Set,
    Selected,
}

/// A hero piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub pos: CellPos,
    pub color: Color,
    #[serde(default)]
    pub status: HeroStatus,
    #[serde(default = "default_true")]
    pub selectable: bool,
    #[serde(default)]
    pub exited: bool,
    /// Whether the hero carries its article (basic ruleset).
    #[serde(default)]
    pub stolen: bool,
    /// Displayed path toward the hovered cell.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<CellPos>,
}

fn default_true() -> bool {
    true
}

impl Hero {
    #[must_use]
    pub fn new(id: HeroId, pos: CellPos, color: Color) -> Self {
        Self {
            id,
            pos,
            color,
            status: HeroStatus::Set,
            selectable: true,
            exited: false,
            stolen: false,
            path: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.status == HeroStatus::Selected
    }

    pub fn steal(&mut self) {
        self.stolen = true;
    }

    #[must_use]
    pub fn has_stolen(&self) -> bool {
        self.stolen
    }

    /// Leave the maze. An exited hero can no longer be selected.
    pub fn exit(&mut self) {
        self.exited = true;
        self.selectable = false;
        self.status = HeroStatus::Set;
        self.path.clear();
    }
}

/// All heroes in play.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    heroes: Vec<Hero>,
}

impl Roster {
    #[must_use]
    pub fn new(heroes: Vec<Hero>) -> Self {
        Self { heroes }
    }

    pub fn load_snapshot(&mut self, heroes: Vec<Hero>) {
        self.heroes = heroes;
    }

    #[must_use]
    pub fn get(&self, id: HeroId) -> Option<&Hero> {
        self.heroes.iter().find(|h| h.id == id)
    }

    pub fn get_mut(&mut self, id: HeroId) -> Option<&mut Hero> {
        self.heroes.iter_mut().find(|h| h.id == id)
    }

    /// The selectable hero standing on `pos`, if any.
    #[must_use]
    pub fn selectable_at(&self, pos: CellPos) -> Option<&Hero> {
        self.heroes.iter().find(|h| h.pos == pos && h.selectable && !h.exited)
    }

    /// Whether any hero other than `except` stands on `pos`.
    #[must_use]
    pub fn is_occupied(&self, pos: CellPos, except: HeroId) -> bool {
        self.heroes.iter().any(|h| h.id != except && !h.exited && h.pos == pos)
    }

    /// Heroes currently selected. At most one when the engine is in control.
    pub fn selected(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.iter().filter(|h| h.is_selected())
    }

    /// Heroes still in the maze.
    pub fn in_play(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.iter().filter(|h| !h.exited)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}

/// Reachability for hero moves.
///
/// Called both to display a path while dragging and to validate the move at
/// release, always against the board and roster as they are at call time.
pub trait Pathfinder {
    /// Path from the hero's cell to `target`, excluding the start and
    /// including `target`, or `None` when the target is unreachable.
    fn path(&self, board: &Board, roster: &Roster, hero: &Hero, target: CellPos) -> Option<Vec<CellPos>>;
}

/// Breadth-first search over existing board cells, four-connected, blocked
/// by other heroes.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridPathfinder;

impl Pathfinder for GridPathfinder {
    fn path(&self, board: &Board, roster: &Roster, hero: &Hero, target: CellPos) -> Option<Vec<CellPos>> {
        if target == hero.pos || !board.contains(target) || roster.is_occupied(target, hero.id) {
            return None;
        }

        let mut came_from: HashMap<CellPos, CellPos> = HashMap::new();
        let mut seen: HashSet<CellPos> = HashSet::from([hero.pos]);
        let mut queue = VecDeque::from([hero.pos]);

        while let Some(current) = queue.pop_front() {
            if current == target {
                break;
            }
            for next in current.neighbours() {
                if seen.contains(&next) || !board.contains(next) || roster.is_occupied(next, hero.id) {
                    continue;
                }
                seen.insert(next);
                came_from.insert(next, current);
                queue.push_back(next);
            }
        }

        let mut path = Vec::new();
        let mut step = target;
        while step != hero.pos {
            path.push(step);
            step = *came_from.get(&step)?;
        }
        path.reverse();
        Some(path)
    }
}
