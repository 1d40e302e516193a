//! Hero selection, path preview, and move commit.

#[cfg(test)]
#[path = "movement_test.rs"]
mod movement_test;

use tracing::{debug, info};

use crate::board::CellPos;
use crate::engine::Engine;
use crate::hero::{HeroId, HeroStatus};
use crate::input::ActionMode;
use crate::sync::Message;

impl Engine {
    /// Select or deselect a hero.
    ///
    /// Selecting makes it the active hero and drops any placement in
    /// progress. Refused while another hero is selected.
    pub fn toggle_hero(&mut self, id: HeroId) -> bool {
        if self.guard_ended() {
            return false;
        }
        let Some(hero) = self.roster.get(id) else {
            return false;
        };
        if hero.exited {
            return false;
        }
        if hero.is_selected() {
            self.release_hero(id);
            return true;
        }
        if self.roster.selected().any(|other| other.id != id) {
            debug!(hero = id, "another hero is already selected");
            return false;
        }

        if self.mode.is_placing() {
            self.tiles.put_back_in_stock();
        }
        if let Some(hero) = self.roster.get_mut(id) {
            hero.status = HeroStatus::Selected;
        }
        self.mode = ActionMode::HeroSelected { hero: id };
        self.hovered = None;
        self.check_path(id, None);
        true
    }

    /// Recompute the displayed path toward `target`. No target, or an
    /// unreachable one, clears the path.
    pub fn check_path(&mut self, id: HeroId, target: Option<CellPos>) {
        let Some(hero) = self.roster.get(id) else {
            return;
        };
        let path = target
            .and_then(|target| self.host.pathfinder.path(&self.board, &self.roster, hero, target))
            .unwrap_or_default();
        if let Some(hero) = self.roster.get_mut(id) {
            hero.path = path;
        }
    }

    /// Whether the hero can reach `target` on the current board.
    #[must_use]
    pub fn can_go_to(&self, id: HeroId, target: CellPos) -> bool {
        self.roster
            .get(id)
            .is_some_and(|hero| self.host.pathfinder.path(&self.board, &self.roster, hero, target).is_some())
    }

    /// Move a hero to `target` and apply the target cell's effect.
    ///
    /// Reachability is checked again here against the board and roster as
    /// they are now, not as they were when the path was previewed.
    pub fn commit_move(&mut self, id: HeroId, target: CellPos) -> bool {
        if self.guard_ended() {
            return false;
        }
        if self.roster.get(id).is_none_or(|hero| hero.exited) {
            return false;
        }
        if !self.can_go_to(id, target) {
            debug!(hero = id, ?target, "move rejected: unreachable");
            return false;
        }

        if let Some(hero) = self.roster.get_mut(id) {
            hero.pos = target;
            hero.path.clear();
        }
        self.outbox.push(Message::HeroMoved { hero_id: id, cell: target });
        info!(hero = id, ?target, "hero moved");

        if let Some(effect) = self.evaluate(target, id) {
            debug!(hero = id, ?effect, "effect applied");
        }
        true
    }
}
