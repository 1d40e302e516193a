//! Scripted input replay.
//!
//! A script is a JSON document holding an initial board, heroes, tiles and
//! player, plus an ordered list of raw input events. Events are fed to the
//! engine exactly as a browser host would feed them.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use serde::Deserialize;

use crate::board::Cell;
use crate::camera::Point;
use crate::config::GameConfig;
use crate::engine::Engine;
use crate::hero::Hero;
use crate::host::Host;
use crate::input::Key;
use crate::player::Player;
use crate::tile::Tile;

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Human clients in the game, this one included.
    #[serde(default = "default_players")]
    pub players: usize,
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub heroes: Vec<Hero>,
    #[serde(default)]
    pub tiles: Vec<Tile>,
    #[serde(default)]
    pub player: Player,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    600.0
}

fn default_players() -> usize {
    1
}

fn default_ticks() -> u32 {
    1
}

/// One raw input event. Pointer coordinates are screen pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    KeyDown { key: String },
    KeyUp { key: String },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    ContextMenu,
    Tick {
        #[serde(default = "default_ticks")]
        count: u32,
    },
}

impl Script {
    /// Build an engine loaded with the script's initial state.
    #[must_use]
    pub fn build(&self, config: GameConfig) -> Engine {
        let host = Host::local(&config, self.players);
        let mut engine = Engine::new(config, host);
        engine.set_viewport(self.width, self.height);
        engine.load_board(self.cells.clone());
        engine.load_tiles(self.tiles.clone());
        engine.load_heroes(self.heroes.clone());
        engine.set_player(self.player.clone());
        engine
    }
}

/// Feed one event to the engine.
pub fn apply(engine: &mut Engine, event: &ScriptEvent) {
    match event {
        ScriptEvent::KeyDown { key } => engine.on_key_down(&Key::new(key.as_str())),
        ScriptEvent::KeyUp { key } => engine.on_key_up(&Key::new(key.as_str())),
        ScriptEvent::PointerDown { x, y } => engine.on_pointer_down(Point::new(*x, *y)),
        ScriptEvent::PointerMove { x, y } => engine.on_pointer_move(Point::new(*x, *y)),
        ScriptEvent::PointerUp { x, y } => engine.on_pointer_up(Point::new(*x, *y)),
        ScriptEvent::ContextMenu => {
            engine.on_context_menu();
        }
        ScriptEvent::Tick { count } => {
            for _ in 0..*count {
                engine.tick();
            }
        }
    }
}
