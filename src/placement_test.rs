use crate::board::{CellPos, Color, Item, ItemKind};
use crate::config::GameConfig;
use crate::engine::Engine;
use crate::input::{ActionMode, PlacingTrigger};
use crate::sync::Message;
use crate::test_support::*;
use crate::tile::{LayoutCell, Orientation, Rotation, Tile, TileStatus};

/// Tile whose entrance cell and the cell behind it carry content.
fn corridor(id: u32) -> Tile {
    Tile::new(id).with_layout(vec![
        LayoutCell { local: CellPos::new(1, 3), item: None },
        LayoutCell { local: CellPos::new(1, 2), item: Some(Item::new(ItemKind::Time, Color::Green)) },
    ])
}

/// Purple hero on a purple gate at the bottom edge, placing tile 1 pointed
/// down so its entrance faces the gate.
fn placing_below_gate() -> (Engine, Probe) {
    let (mut engine, probe) = probed_engine(GameConfig::default(), 1, 0);
    engine.load_tiles(vec![corridor(1), Tile::new(2)]);
    put_item(&mut engine, 2, 5, ItemKind::Gate, Color::Purple);
    engine.load_heroes(vec![hero(1, 2, 5, Color::Purple)]);
    engine.new_tile();
    engine.rotate_tile(Rotation::Clockwise);
    engine.rotate_tile(Rotation::Clockwise);
    (engine, probe)
}

#[test]
fn click_sets_tile_and_explores_entry() {
    let (mut engine, probe) = placing_below_gate();
    down(&mut engine, 2, 6);

    let tile = engine.tiles.get(1).unwrap();
    assert_eq!(tile.status, TileStatus::Set);
    assert_eq!(tile.origin, Some(CellPos::new(0, 6)));
    assert!(engine.mode().is_idle());
    assert!(engine.board.get(CellPos::new(2, 5)).unwrap().explored);
    assert!(engine.board.contains(CellPos::new(2, 6)));
    assert_eq!(engine.board.item(CellPos::new(2, 7)).map(|i| i.kind), Some(ItemKind::Time));
    assert_eq!(engine.board.get(CellPos::new(2, 7)).unwrap().tile_id, Some(1));
    assert_eq!(probe.solver_runs(), 1);
    assert_eq!(
        messages(&mut engine),
        vec![Message::TilePlaced { origin: CellPos::new(0, 6), tile_id: 1, orientation: Orientation::Down }]
    );
}

#[test]
fn overlapping_tile_is_refused() {
    let (mut engine, probe) = placing_below_gate();
    engine.rotate_tile(Rotation::Clockwise);
    engine.rotate_tile(Rotation::Clockwise);
    // Pointing up, the footprint would cover existing cells.
    down(&mut engine, 2, 6);

    assert!(engine.mode().is_placing());
    let tile = engine.tiles.picked().unwrap();
    assert!(!tile.can_be_set);
    assert_eq!(tile.origin, None);
    assert_eq!(probe.solver_runs(), 0);
    assert!(engine.outbox.is_empty());
    assert_invariants(&engine);
}

#[test]
fn hover_refreshes_fit() {
    let (mut engine, _) = placing_below_gate();
    hover(&mut engine, 2, 2);
    assert!(!engine.tiles.picked().unwrap().can_be_set);
    hover(&mut engine, 2, 6);
    assert!(engine.tiles.picked().unwrap().can_be_set);
}

#[test]
fn set_tile_outside_placing_is_refused() {
    let mut engine = engine();
    assert!(!engine.set_tile(CellPos::new(10, 10)));
    assert_eq!(engine.tiles.stock_size(), 3);
}

#[test]
fn set_tile_respects_fit_flag() {
    let (mut engine, _) = placing_below_gate();
    if let Some(tile) = engine.tiles.picked_mut() {
        tile.can_be_set = false;
    }
    assert!(!engine.set_tile(CellPos::new(2, 6)));
    assert!(engine.mode().is_placing());
}

#[test]
fn entrance_must_open_onto_the_board() {
    let (mut engine, probe) = placing_below_gate();
    // A stale fit flag does not let a tile float in empty space.
    engine.tiles.picked_mut().unwrap().can_be_set = true;
    assert!(!engine.set_tile(CellPos::new(20, 20)));

    assert!(engine.mode().is_placing());
    assert_eq!(engine.tiles.picked().unwrap().origin, None);
    assert!(!engine.board.get(CellPos::new(2, 5)).unwrap().explored);
    assert_eq!(probe.solver_runs(), 0);
    assert!(engine.outbox.is_empty());
}

#[test]
fn one_gate_grants_exactly_one_tile() {
    let (mut engine, probe) = placing_below_gate();

    // Entrance against a bare cell two columns left of the gate.
    hover(&mut engine, 0, 6);
    assert!(!engine.tiles.picked().unwrap().can_be_set);
    engine.tiles.picked_mut().unwrap().can_be_set = true;
    assert!(!engine.set_tile(CellPos::new(0, 6)));
    assert!(!engine.board.get(CellPos::new(0, 5)).unwrap().explored);
    assert!(!engine.board.get(CellPos::new(2, 5)).unwrap().explored);

    down(&mut engine, 2, 6);
    assert!(engine.board.get(CellPos::new(2, 5)).unwrap().explored);
    assert_eq!(engine.tiles.stock_size(), 1);

    // The gate is spent: the hero still stands on it but gets no new tile.
    engine.new_tile();
    assert!(engine.mode().is_idle());
    assert!(!engine.tiles.has_picked());
    assert_eq!(engine.tiles.stock_size(), 1);
    assert_eq!(probe.solver_runs(), 1);
}

#[test]
fn crystal_placement_spends_the_crystal() {
    let (mut engine, probe) = probed_engine(GameConfig::default(), 1, 0);
    put_item(&mut engine, 1, 1, ItemKind::Crystal, Color::Orange);
    engine.load_heroes(vec![hero(1, 1, 1, Color::Orange)]);
    engine.new_tile();
    assert_eq!(
        engine.mode(),
        ActionMode::Placing { trigger: PlacingTrigger::Crystal(CellPos::new(1, 1)) }
    );
    engine.rotate_tile(Rotation::CounterClockwise);
    engine.rotate_tile(Rotation::CounterClockwise);

    // Nothing lies outside the entrance out here.
    assert!(!engine.set_tile(CellPos::new(20, 20)));
    assert!(!engine.board.get(CellPos::new(1, 1)).unwrap().is_used());

    down(&mut engine, 4, 6);

    assert!(engine.board.get(CellPos::new(1, 1)).unwrap().is_used());
    // The entry cell is explored, the crystal cell is not.
    assert!(engine.board.get(CellPos::new(4, 5)).unwrap().explored);
    assert!(!engine.board.get(CellPos::new(1, 1)).unwrap().explored);
    assert_eq!(probe.solver_runs(), 1);
    assert_eq!(
        messages(&mut engine),
        vec![
            Message::TilePlaced { origin: CellPos::new(2, 6), tile_id: 1, orientation: Orientation::Down },
            Message::CellUsed { x: 1, y: 1 },
        ]
    );

    // Spent: no further tiles from this crystal.
    engine.new_tile();
    assert!(engine.mode().is_idle());
}

#[test]
fn placed_tile_opens_a_path() {
    let (mut engine, _) = placing_below_gate();
    down(&mut engine, 2, 6);
    engine.outbox.drain();

    assert!(engine.can_go_to(1, CellPos::new(2, 7)));
    drag(&mut engine, (2, 5), (2, 7));
    assert_eq!(engine.roster.get(1).unwrap().pos, CellPos::new(2, 7));
}

#[test]
fn ended_game_returns_tile_instead_of_setting_it() {
    let (mut engine, _) = placing_below_gate();
    engine.game_mut().win();
    assert!(!engine.set_tile(CellPos::new(2, 6)));
    assert!(engine.mode().is_idle());
    assert_eq!(engine.tiles.get(1).unwrap().status, TileStatus::InStock);
    assert!(engine.outbox.is_empty());
}
