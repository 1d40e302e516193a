//! Tile placement: committing the picked tile to the board.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use tracing::{debug, info, warn};

use crate::board::CellPos;
use crate::engine::Engine;
use crate::input::{ActionMode, PlacingTrigger};
use crate::sync::Message;
use crate::tile::{Orientation, TileStatus};

impl Engine {
    /// Recompute whether the picked tile fits with its entrance on `target`.
    pub(crate) fn refresh_placeable(&mut self, target: CellPos) {
        let ActionMode::Placing { trigger } = self.mode else {
            return;
        };
        let Some(orientation) = self.tiles.picked().map(|tile| tile.orientation) else {
            return;
        };
        let placeable = self.placeable(trigger, target, orientation);
        if let Some(tile) = self.tiles.picked_mut() {
            tile.can_be_set = placeable;
        }
    }

    /// The footprint must be free and the entrance must open onto the board:
    /// onto the triggering gate itself, or onto any cell for a crystal.
    fn placeable(&self, trigger: PlacingTrigger, target: CellPos, orientation: Orientation) -> bool {
        let geometry = self.host.geometry.as_ref();
        let origin = geometry.origin(target, orientation);
        if !geometry.fits(&self.board, origin, orientation) {
            return false;
        }
        match (trigger, geometry.enter(&self.board, target, orientation)) {
            (PlacingTrigger::Gate(gate), Some(entry)) => entry == gate,
            (PlacingTrigger::Crystal(_), Some(_)) => true,
            (_, None) => false,
        }
    }

    /// Set the picked tile with its entrance on `target`.
    ///
    /// Returns `false` and leaves everything untouched when not placing,
    /// when the tile is flagged as not fitting, or when its entrance does not
    /// open onto the trigger.
    pub fn set_tile(&mut self, target: CellPos) -> bool {
        if self.guard_ended() {
            return false;
        }
        let ActionMode::Placing { trigger } = self.mode else {
            return false;
        };
        let Some(tile) = self.tiles.picked() else {
            warn!("placing without a picked tile");
            self.mode = ActionMode::Idle;
            return false;
        };
        if !tile.can_be_set || tile.status != TileStatus::Picked {
            debug!(tile_id = tile.id, ?target, "tile does not fit here");
            return false;
        }
        let (tile_id, orientation) = (tile.id, tile.orientation);
        if !self.placeable(trigger, target, orientation) {
            debug!(tile_id, ?target, ?trigger, "entrance does not open onto the trigger");
            return false;
        }

        let geometry = self.host.geometry.as_ref();
        let origin = geometry.origin(target, orientation);
        // Resolved before the tile's own cells exist on the board.
        let entry = geometry.enter(&self.board, target, orientation);

        if let Some(tile) = self.tiles.picked_mut() {
            tile.set(origin);
        }
        self.mode = ActionMode::Idle;
        if let Some(tile) = self.tiles.get(tile_id) {
            self.board.lay_tile(tile, geometry);
        }
        self.outbox.push(Message::TilePlaced { origin, tile_id, orientation });

        // For a gate trigger the entry is the gate itself.
        if let Some(entry) = entry {
            self.board.set_explored(entry);
        }
        if let PlacingTrigger::Crystal(pos) = trigger {
            if self.board.add_use(pos) {
                self.outbox.push(Message::CellUsed { x: pos.x, y: pos.y });
            }
        }

        self.host.solver.run(&self.board, &self.roster);
        info!(tile_id, ?origin, ?orientation, "tile set");
        true
    }
}
