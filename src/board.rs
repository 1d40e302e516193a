//! Board model: cells, the items printed on them, and the in-memory store.
//!
//! The board is owned by the engine and only mutated through the narrow
//! `set_*` calls below, mirroring what the rules are allowed to change:
//! exploration of gates, consumption of time cells, crystals and cameras,
//! and theft of articles.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::CRYSTAL_USES;
use crate::tile::{Tile, TileGeometry, TileId};

/// Integer board coordinates of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours, clockwise from north.
    #[must_use]
    pub fn neighbours(self) -> [Self; 4] {
        [self.offset(0, -1), self.offset(1, 0), self.offset(0, 1), self.offset(-1, 0)]
    }
}

/// Hero and item colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Purple,
    Orange,
    Yellow,
    Green,
}

/// What is printed on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Unexplored edge that opens a new tile for a matching hero.
    #[serde(alias = "bridge")]
    Gate,
    /// Grants tile placements to a matching hero.
    Crystal,
    /// Inverts the shared clock once.
    Time,
    /// The article a hero of the same color must steal.
    Article,
    /// Where a hero leaves the maze.
    Exit,
    /// Security camera, disabled when a matching hero steps on it.
    Camera,
}

/// An item on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub color: Color,
    #[serde(default)]
    pub used: bool,
    #[serde(default)]
    pub stolen: bool,
}

impl Item {
    #[must_use]
    pub fn new(kind: ItemKind, color: Color) -> Self {
        Self { kind, color, used: false, stolen: false }
    }

    /// Whether this item is of `kind` and matches `color`.
    #[must_use]
    pub fn is(&self, kind: ItemKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }
}

/// A board cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub pos: CellPos,
    #[serde(default)]
    pub item: Option<Item>,
    #[serde(default)]
    pub explored: bool,
    #[serde(default)]
    pub used: bool,
    /// Tile placements consumed from this cell (crystals only).
    #[serde(default)]
    pub uses: u32,
    /// Tile this cell was laid with, if any.
    #[serde(default)]
    pub tile_id: Option<TileId>,
}

impl Cell {
    #[must_use]
    pub fn new(pos: CellPos) -> Self {
        Self { pos, item: None, explored: false, used: false, uses: 0, tile_id: None }
    }

    #[must_use]
    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    #[must_use]
    pub fn is_used(&self) -> bool {
        self.used || self.item.is_some_and(|item| item.used)
    }
}

/// In-memory store of board cells keyed by position.
#[derive(Debug, Clone, Default)]
pub struct Board {
    cells: HashMap<CellPos, Cell>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all cells with a full snapshot.
    pub fn load_snapshot(&mut self, cells: Vec<Cell>) {
        self.cells.clear();
        for cell in cells {
            self.cells.insert(cell.pos, cell);
        }
    }

    /// Insert or replace a cell.
    pub fn insert(&mut self, cell: Cell) {
        self.cells.insert(cell.pos, cell);
    }

    #[must_use]
    pub fn get(&self, pos: CellPos) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    #[must_use]
    pub fn contains(&self, pos: CellPos) -> bool {
        self.cells.contains_key(&pos)
    }

    /// The item on a cell, if the cell exists and holds one.
    #[must_use]
    pub fn item(&self, pos: CellPos) -> Option<Item> {
        self.cells.get(&pos).and_then(|cell| cell.item)
    }

    /// Mark a cell and its item used. Returns false if the cell doesn't exist.
    pub fn set_used(&mut self, pos: CellPos) -> bool {
        let Some(cell) = self.cells.get_mut(&pos) else {
            return false;
        };
        cell.used = true;
        if let Some(item) = cell.item.as_mut() {
            item.used = true;
        }
        true
    }

    /// Mark a cell explored. Returns false if the cell doesn't exist.
    pub fn set_explored(&mut self, pos: CellPos) -> bool {
        let Some(cell) = self.cells.get_mut(&pos) else {
            return false;
        };
        cell.explored = true;
        true
    }

    /// Mark the item on a cell stolen. Returns false if there is no item.
    pub fn set_stolen(&mut self, pos: CellPos) -> bool {
        match self.cells.get_mut(&pos).and_then(|cell| cell.item.as_mut()) {
            Some(item) => {
                item.stolen = true;
                true
            }
            None => false,
        }
    }

    /// Consume one placement from a crystal. Returns true once the crystal
    /// is spent by this call.
    pub fn add_use(&mut self, pos: CellPos) -> bool {
        let Some(cell) = self.cells.get_mut(&pos) else {
            return false;
        };
        cell.uses += 1;
        if cell.uses >= CRYSTAL_USES && !cell.is_used() {
            cell.used = true;
            if let Some(item) = cell.item.as_mut() {
                item.used = true;
            }
            return true;
        }
        false
    }

    /// Insert a placed tile's cells at their rotated board positions.
    ///
    /// Existing cells are never overwritten.
    pub fn lay_tile(&mut self, tile: &Tile, geometry: &dyn TileGeometry) -> usize {
        let Some(origin) = tile.origin else {
            return 0;
        };
        let mut laid = 0;
        for part in &tile.layout {
            let pos = geometry.place(part.local, origin, tile.orientation);
            if self.cells.contains_key(&pos) {
                continue;
            }
            let mut cell = Cell::new(pos);
            cell.item = part.item;
            cell.tile_id = Some(tile.id);
            self.cells.insert(pos, cell);
            laid += 1;
        }
        laid
    }

    /// Number of cells on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the board has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
