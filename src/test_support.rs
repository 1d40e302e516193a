//! Fixtures shared by the engine-level unit tests.

use std::cell::Cell as Counter;
use std::rc::Rc;

use crate::board::{Cell, CellPos, Color, Item, ItemKind};
use crate::camera::Point;
use crate::config::GameConfig;
use crate::engine::Engine;
use crate::hero::{GridPathfinder, Hero, Roster};
use crate::host::{Clock, Host, IdleSolver, LocalGame, Solver};
use crate::input::{ActionMode, Key};
use crate::player::{Player, Role};
use crate::sync::Message;
use crate::tile::{GridGeometry, Tile, TileStatus};

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 600.0;

/// Counts collaborator calls made by the engine.
#[derive(Debug, Clone, Default)]
pub struct Probe {
    inversions: Rc<Counter<u32>>,
    solver_runs: Rc<Counter<u32>>,
}

impl Probe {
    pub fn inversions(&self) -> u32 {
        self.inversions.get()
    }

    pub fn solver_runs(&self) -> u32 {
        self.solver_runs.get()
    }
}

struct ProbeClock(Rc<Counter<u32>>);

impl Clock for ProbeClock {
    fn invert(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

struct ProbeSolver(Rc<Counter<u32>>);

impl Solver for ProbeSolver {
    fn run(&mut self, _board: &crate::board::Board, _roster: &Roster) {
        self.0.set(self.0.get() + 1);
    }

    fn check_for_win(&self, roster: &Roster) -> bool {
        IdleSolver.check_for_win(roster)
    }
}

/// `w x h` block of bare cells anchored at the origin.
pub fn grid(w: i32, h: i32) -> Vec<Cell> {
    (0..w)
        .flat_map(|x| (0..h).map(move |y| Cell::new(CellPos::new(x, y))))
        .collect()
}

/// Engine on a 6x6 board with three tiles in stock and an exploring player.
pub fn probed_engine(config: GameConfig, players: usize, bots: usize) -> (Engine, Probe) {
    let probe = Probe::default();
    let host = Host {
        geometry: Box::new(GridGeometry::new(config.tile_size)),
        pathfinder: Box::new(GridPathfinder),
        solver: Box::new(ProbeSolver(Rc::clone(&probe.solver_runs))),
        clock: Box::new(ProbeClock(Rc::clone(&probe.inversions))),
        game: Box::new(LocalGame::new(players, bots)),
    };
    let mut engine = Engine::new(config, host);
    engine.set_viewport(WIDTH, HEIGHT);
    engine.load_board(grid(6, 6));
    engine.load_tiles((1..=3).map(Tile::new).collect());
    engine.set_player(Player::new(vec![Role::Explore]));
    (engine, probe)
}

pub fn engine() -> Engine {
    probed_engine(GameConfig::default(), 1, 0).0
}

pub fn hero(id: u32, x: i32, y: i32, color: Color) -> Hero {
    Hero::new(id, CellPos::new(x, y), color)
}

pub fn put_item(engine: &mut Engine, x: i32, y: i32, kind: ItemKind, color: Color) {
    engine.board.insert(Cell::new(CellPos::new(x, y)).with_item(Item::new(kind, color)));
}

/// Screen point at the center of a cell under the current camera.
pub fn screen(engine: &Engine, x: i32, y: i32) -> Point {
    let corner = engine.camera.cell_to_screen(CellPos::new(x, y), engine.viewport, engine.config.cell_size);
    let half = engine.camera.cell_span(engine.config.cell_size) / 2.0;
    Point::new(corner.x + half, corner.y + half)
}

pub fn down(engine: &mut Engine, x: i32, y: i32) {
    let at = screen(engine, x, y);
    engine.on_pointer_down(at);
}

pub fn hover(engine: &mut Engine, x: i32, y: i32) {
    let at = screen(engine, x, y);
    engine.on_pointer_move(at);
}

pub fn up(engine: &mut Engine, x: i32, y: i32) {
    let at = screen(engine, x, y);
    engine.on_pointer_up(at);
}

/// Press on `from`, move over `to`, release on `to`.
pub fn drag(engine: &mut Engine, from: (i32, i32), to: (i32, i32)) {
    down(engine, from.0, from.1);
    hover(engine, to.0, to.1);
    up(engine, to.0, to.1);
}

pub fn press(engine: &mut Engine, key: &str) {
    let key = Key::new(key);
    engine.on_key_down(&key);
    engine.on_key_up(&key);
}

pub fn picked_count(engine: &Engine) -> usize {
    engine.tiles.iter().filter(|t| t.status == TileStatus::Picked).count()
}

pub fn selected_count(engine: &Engine) -> usize {
    engine.roster.selected().count()
}

pub fn messages(engine: &mut Engine) -> Vec<Message> {
    engine.outbox.drain()
}

/// The mode/selection invariants that must hold between any two events.
pub fn assert_invariants(engine: &Engine) {
    assert!(picked_count(engine) <= 1, "more than one picked tile");
    assert!(selected_count(engine) <= 1, "more than one selected hero");
    match engine.mode() {
        ActionMode::Placing { .. } => assert_eq!(picked_count(engine), 1),
        ActionMode::HeroSelected { hero } => {
            let selected: Vec<_> = engine.roster.selected().map(|h| h.id).collect();
            assert_eq!(selected, vec![hero]);
        }
        ActionMode::Idle => {}
    }
}
