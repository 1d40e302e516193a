//! Maze tiles: orientation, the ordered stock, and placement geometry.
//!
//! A tile moves `InStock -> Picked -> Set`, and back from `Picked` to
//! `InStock` when placement is cancelled. [`TileSet`] guarantees at most one
//! tile is `Picked` at any time.

#[cfg(test)]
#[path = "tile_test.rs"]
mod tile_test;

use serde::{Deserialize, Serialize};

use crate::board::{Board, CellPos, Item};
use crate::consts::MIN_TILE_SIZE;

/// Unique identifier for a tile.
pub type TileId = u32;

/// One of four tile rotations, clockwise from `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

/// Rotation direction for [`Orientation::rotated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Orientation {
    const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Number of clockwise quarter turns from `Up`.
    #[must_use]
    pub fn quarter_turns(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    #[must_use]
    pub fn rotated(self, rotation: Rotation) -> Self {
        let step = match rotation {
            Rotation::Clockwise => 1,
            Rotation::CounterClockwise => 3,
        };
        Self::ALL[(self.quarter_turns() + step) % 4]
    }
}

/// Placement status of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileStatus {
    #[default]
    InStock,
    Picked,
    Set,
}

/// A cell of a tile's layout, in tile-local coordinates for `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCell {
    pub local: CellPos,
    #[serde(default)]
    pub item: Option<Item>,
}

/// A maze tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub status: TileStatus,
    /// Whether the tile fits where it is currently hovered.
    #[serde(default = "default_true")]
    pub can_be_set: bool,
    /// Board position of the local `(0, 0)` cell once set.
    #[serde(default)]
    pub origin: Option<CellPos>,
    #[serde(default)]
    pub layout: Vec<LayoutCell>,
}

fn default_true() -> bool {
    true
}

impl Tile {
    #[must_use]
    pub fn new(id: TileId) -> Self {
        Self {
            id,
            orientation: Orientation::Up,
            status: TileStatus::InStock,
            can_be_set: true,
            origin: None,
            layout: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Vec<LayoutCell>) -> Self {
        self.layout = layout;
        self
    }

    pub fn rotate(&mut self, rotation: Rotation) {
        self.orientation = self.orientation.rotated(rotation);
    }

    /// Fix the tile on the board at `origin`.
    pub fn set(&mut self, origin: CellPos) {
        self.origin = Some(origin);
        self.status = TileStatus::Set;
    }
}

/// All tiles of the game in stock order.
#[derive(Debug, Clone, Default)]
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl TileSet {
    #[must_use]
    pub fn new(tiles: Vec<Tile>) -> Self {
        let mut set = Self::default();
        set.load_snapshot(tiles);
        set
    }

    /// Replace all tiles. Extra `Picked` tiles beyond the first go back to
    /// stock so the single-pick invariant holds after loading.
    pub fn load_snapshot(&mut self, tiles: Vec<Tile>) {
        self.tiles = tiles;
        let mut seen_pick = false;
        for tile in &mut self.tiles {
            if tile.status == TileStatus::Picked {
                if seen_pick {
                    tile.status = TileStatus::InStock;
                }
                seen_pick = true;
            }
        }
    }

    /// Number of tiles still in stock.
    #[must_use]
    pub fn stock_size(&self) -> usize {
        self.tiles.iter().filter(|t| t.status == TileStatus::InStock).count()
    }

    #[must_use]
    pub fn has_picked(&self) -> bool {
        self.picked().is_some()
    }

    #[must_use]
    pub fn picked(&self) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.status == TileStatus::Picked)
    }

    pub fn picked_mut(&mut self) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| t.status == TileStatus::Picked)
    }

    /// Pick the next tile from stock unless one is already picked.
    ///
    /// Returns the id of the picked tile.
    pub fn get_from_stock(&mut self) -> Option<TileId> {
        if let Some(tile) = self.picked() {
            return Some(tile.id);
        }
        let tile = self.tiles.iter_mut().find(|t| t.status == TileStatus::InStock)?;
        tile.status = TileStatus::Picked;
        Some(tile.id)
    }

    /// Return the picked tile to the front of the stock, unrotated.
    pub fn put_back_in_stock(&mut self) -> Option<TileId> {
        let index = self.tiles.iter().position(|t| t.status == TileStatus::Picked)?;
        let mut tile = self.tiles.remove(index);
        tile.status = TileStatus::InStock;
        tile.orientation = Orientation::Up;
        tile.can_be_set = true;
        let id = tile.id;
        let front = self
            .tiles
            .iter()
            .position(|t| t.status == TileStatus::InStock)
            .unwrap_or(self.tiles.len());
        self.tiles.insert(front, tile);
        Some(id)
    }

    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Tile geometry: where a tile lands for a clicked cell and orientation, and
/// which board cell its entrance opens onto.
pub trait TileGeometry {
    /// Board position of the tile's local origin when its entrance is placed
    /// on `target` with `orientation`.
    fn origin(&self, target: CellPos, orientation: Orientation) -> CellPos;

    /// The existing board cell the tile's entrance connects to, or `None`
    /// when it cannot be determined from the board.
    fn enter(&self, board: &Board, target: CellPos, orientation: Orientation) -> Option<CellPos>;

    /// Board position of a tile-local cell.
    fn place(&self, local: CellPos, origin: CellPos, orientation: Orientation) -> CellPos;

    /// Whether the tile's footprint is free on the board.
    fn fits(&self, board: &Board, origin: CellPos, orientation: Orientation) -> bool;
}

/// Square `size x size` tiles whose entrance sits at local `(1, size - 1)`
/// and opens downward when the tile points `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    size: i32,
}

impl GridGeometry {
    /// Sizes below the minimum are clamped.
    #[must_use]
    pub fn new(size: i32) -> Self {
        Self { size: size.max(MIN_TILE_SIZE) }
    }

    #[must_use]
    pub fn size(&self) -> i32 {
        self.size
    }

    fn entrance(&self) -> CellPos {
        CellPos::new(1, self.size - 1)
    }

    /// Rotate a tile-local cell clockwise within the square.
    fn rotate_local(&self, local: CellPos, orientation: Orientation) -> CellPos {
        let mut p = local;
        for _ in 0..orientation.quarter_turns() {
            p = CellPos::new(self.size - 1 - p.y, p.x);
        }
        p
    }

    /// Outward direction of the entrance.
    fn outward(orientation: Orientation) -> (i32, i32) {
        let (mut dx, mut dy) = (0, 1);
        for _ in 0..orientation.quarter_turns() {
            (dx, dy) = (-dy, dx);
        }
        (dx, dy)
    }
}

impl TileGeometry for GridGeometry {
    fn origin(&self, target: CellPos, orientation: Orientation) -> CellPos {
        let entrance = self.rotate_local(self.entrance(), orientation);
        CellPos::new(target.x - entrance.x, target.y - entrance.y)
    }

    fn enter(&self, board: &Board, target: CellPos, orientation: Orientation) -> Option<CellPos> {
        let (dx, dy) = Self::outward(orientation);
        let gate = target.offset(dx, dy);
        board.contains(gate).then_some(gate)
    }

    fn place(&self, local: CellPos, origin: CellPos, orientation: Orientation) -> CellPos {
        let rotated = self.rotate_local(local, orientation);
        origin.offset(rotated.x, rotated.y)
    }

    fn fits(&self, board: &Board, origin: CellPos, _orientation: Orientation) -> bool {
        (0..self.size).all(|x| (0..self.size).all(|y| !board.contains(origin.offset(x, y))))
    }
}
