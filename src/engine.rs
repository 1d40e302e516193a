//! The action state machine.
//!
//! `Engine` owns the camera, the board/tile/hero stores, the current
//! [`ActionMode`], and the outbox. Raw input events come in through the
//! `on_*` handlers, are resolved to board cells through the camera, and are
//! routed by mode to placement ([`crate::placement`]), movement
//! ([`crate::movement`]), and effect evaluation ([`crate::rules`]).
//!
//! No handler fails. Illegal attempts leave the state untouched, except a
//! rejected hero release, which queues a resync request.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::debug;

use crate::board::{Board, Cell, CellPos, ItemKind};
use crate::camera::{Camera, PanSignal, Point, Viewport};
use crate::config::GameConfig;
use crate::hero::{Hero, HeroId, HeroStatus, Roster};
use crate::host::{Game, Host};
use crate::input::{ActionMode, Command, HeldKeys, Key, PlacingTrigger, UiState};
use crate::player::Player;
use crate::sync::{Message, Outbox};
use crate::tile::{Rotation, Tile, TileSet};

pub struct Engine {
    pub config: GameConfig,
    pub camera: Camera,
    pub viewport: Viewport,
    pub board: Board,
    pub tiles: TileSet,
    pub roster: Roster,
    pub player: Player,
    pub ui: UiState,
    pub outbox: Outbox,
    pub(crate) host: Host,
    pub(crate) mode: ActionMode,
    /// Last cell the pointer hovered while a hero was selected.
    pub(crate) hovered: Option<CellPos>,
    /// Cell under the pointer when the current hero selection started.
    pub(crate) press_cell: Option<CellPos>,
    held: HeldKeys,
}

impl Engine {
    #[must_use]
    pub fn new(config: GameConfig, host: Host) -> Self {
        Self {
            config,
            camera: Camera::default(),
            viewport: Viewport::new(0.0, 0.0),
            board: Board::new(),
            tiles: TileSet::default(),
            roster: Roster::default(),
            player: Player::default(),
            ui: UiState::default(),
            outbox: Outbox::new(),
            host,
            mode: ActionMode::Idle,
            hovered: None,
            press_cell: None,
            held: HeldKeys::default(),
        }
    }

    // --- Data inputs ---

    pub fn load_board(&mut self, cells: Vec<Cell>) {
        self.board.load_snapshot(cells);
    }

    /// Replace the tile set. Any placement in progress is dropped.
    pub fn load_tiles(&mut self, tiles: Vec<Tile>) {
        self.tiles.load_snapshot(tiles);
        if self.mode.is_placing() && !self.tiles.has_picked() {
            self.mode = ActionMode::Idle;
        }
    }

    /// Replace the roster. Any selection in progress is dropped.
    pub fn load_heroes(&mut self, heroes: Vec<Hero>) {
        self.roster.load_snapshot(heroes);
        if self.mode.active_hero().is_some() {
            self.mode = ActionMode::Idle;
        }
        self.hovered = None;
        self.press_cell = None;
    }

    pub fn set_player(&mut self, player: Player) {
        self.player = player;
    }

    /// Update viewport dimensions in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> ActionMode {
        self.mode
    }

    #[must_use]
    pub fn active_hero(&self) -> Option<&Hero> {
        self.mode.active_hero().and_then(|id| self.roster.get(id))
    }

    #[must_use]
    pub fn game(&self) -> &dyn Game {
        self.host.game.as_ref()
    }

    pub fn game_mut(&mut self) -> &mut dyn Game {
        self.host.game.as_mut()
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.host.game.is_ended()
    }

    /// Board cell under a screen point.
    #[must_use]
    pub fn hovered_cell(&self, screen: Point) -> CellPos {
        self.camera.screen_to_cell(screen, self.viewport, self.config.cell_size)
    }

    // --- Render tick ---

    /// Advance zoom easing and apply held pan keys.
    pub fn tick(&mut self) {
        self.camera.apply_zoom(self.held.zoom_signal());
        self.camera.apply_pan(self.held.pan_signal(), self.config.camera_speed, None);
    }

    /// Move the camera to an explicit pan offset.
    pub fn recenter(&mut self, pan: Point) {
        self.camera.apply_pan(PanSignal::default(), self.config.camera_speed, Some(pan));
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key) {
        if self.guard_ended() {
            return;
        }
        self.held.press(key);
        let Some(command) = Command::from_key(key) else {
            return;
        };
        match command {
            Command::EngageTile => self.new_tile(),
            Command::Rotate(rotation) => self.rotate_tile(rotation),
            Command::Cancel => self.cancel(),
            Command::TogglePause => self.toggle_pause(),
            Command::ToggleGrid => self.ui.show_grid = !self.ui.show_grid,
        }
    }

    pub fn on_key_up(&mut self, key: &Key) {
        self.held.release(key);
    }

    /// Secondary click rotates the picked tile clockwise. Always returns
    /// `true`: the host must suppress the platform context menu.
    pub fn on_context_menu(&mut self) -> bool {
        self.rotate_tile(Rotation::Clockwise);
        true
    }

    // --- Pointer ---

    pub fn on_pointer_down(&mut self, screen: Point) {
        if self.guard_ended() || self.player.is_spectator() {
            return;
        }
        let cell = self.hovered_cell(screen);

        if self.mode.is_placing() {
            self.refresh_placeable(cell);
            self.set_tile(cell);
        }

        if let Some(id) = self.roster.selectable_at(cell).map(|h| h.id) {
            if self.toggle_hero(id) && self.mode.active_hero() == Some(id) {
                self.press_cell = Some(cell);
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen: Point) {
        if self.guard_ended() {
            return;
        }
        let cell = self.hovered_cell(screen);

        match self.mode {
            ActionMode::Placing { .. } => self.refresh_placeable(cell),
            ActionMode::HeroSelected { hero } => {
                if self.hovered != Some(cell) {
                    self.hovered = Some(cell);
                    self.check_path(hero, Some(cell));
                }
            }
            ActionMode::Idle => {}
        }
    }

    pub fn on_pointer_up(&mut self, screen: Point) {
        if self.guard_ended() {
            return;
        }
        let Some(hero) = self.mode.active_hero() else {
            return;
        };
        let cell = self.hovered_cell(screen);

        let moved = self.press_cell != Some(cell) && self.commit_move(hero, cell);
        if !moved {
            debug!(hero, ?cell, "hero released without moving");
            self.outbox.push(Message::RecomputeAi);
        }
        self.release_hero(hero);
    }

    // --- Commands ---

    /// Pick a tile and enter placing mode, if a hero stands on an
    /// unexplored gate or an unused crystal of its own color.
    pub fn new_tile(&mut self) {
        if self.guard_ended() {
            return;
        }
        if !self.player.can_explore() && !self.config.debug {
            debug!("tile refused: player cannot explore");
            return;
        }
        if self.tiles.stock_size() == 0 {
            debug!("tile refused: stock is empty");
            return;
        }
        if self.mode.active_hero().is_some() {
            debug!("tile refused: a hero is selected");
            return;
        }
        let Some(trigger) = self.find_trigger() else {
            debug!("tile refused: no hero on a gate or crystal");
            return;
        };

        self.mode = ActionMode::Placing { trigger };
        if !self.tiles.has_picked() {
            self.tiles.get_from_stock();
        }
        debug!(?trigger, "placing tile");
    }

    /// An unexplored gate under a hero of its color wins over an unused
    /// crystal under a hero of its color.
    fn find_trigger(&self) -> Option<PlacingTrigger> {
        let mut crystal = None;
        for hero in self.roster.in_play() {
            let Some(cell) = self.board.get(hero.pos) else {
                continue;
            };
            let Some(item) = cell.item else {
                continue;
            };
            if item.is(ItemKind::Gate, hero.color) && !cell.explored {
                return Some(PlacingTrigger::Gate(cell.pos));
            }
            if crystal.is_none() && item.is(ItemKind::Crystal, hero.color) && !cell.is_used() {
                crystal = Some(PlacingTrigger::Crystal(cell.pos));
            }
        }
        crystal
    }

    /// Rotate the picked tile. Only meaningful while placing.
    pub fn rotate_tile(&mut self, rotation: Rotation) {
        if self.guard_ended() || !self.mode.is_placing() {
            return;
        }
        if let Some(tile) = self.tiles.picked_mut() {
            tile.rotate(rotation);
        }
    }

    /// Abandon the current action: the picked tile goes back to stock and a
    /// selected hero is released.
    pub fn cancel(&mut self) {
        if self.guard_ended() {
            return;
        }
        self.reset_transient();
    }

    pub fn toggle_pause(&mut self) {
        if self.guard_ended() {
            return;
        }
        let paused = !self.host.game.is_paused();
        if paused {
            self.host.game.pause();
        } else {
            self.host.game.resume();
        }
        self.outbox.push(Message::PauseRequested { paused });
    }

    /// React to the game ending: drop every transient per-mode state.
    pub fn on_game_ended(&mut self) {
        self.reset_transient();
        self.held.clear();
    }

    /// Returns `true` when the game has ended, after making sure nothing
    /// transient survived the end.
    pub(crate) fn guard_ended(&mut self) -> bool {
        if !self.host.game.is_ended() {
            return false;
        }
        if !self.mode.is_idle() || self.tiles.has_picked() {
            self.on_game_ended();
        }
        true
    }

    fn reset_transient(&mut self) {
        if self.tiles.put_back_in_stock().is_some() {
            debug!("picked tile returned to stock");
        }
        for hero in self.roster.selected().map(|h| h.id).collect::<Vec<_>>() {
            self.release_hero(hero);
        }
        self.mode = ActionMode::Idle;
        self.hovered = None;
        self.press_cell = None;
    }

    // --- Remote deltas ---

    /// Apply a delta announced by a peer.
    pub fn apply_remote(&mut self, message: &Message) {
        match *message {
            Message::TilePlaced { origin, tile_id, orientation } => {
                let Some(tile) = self.tiles.get_mut(tile_id) else {
                    debug!(tile_id, "remote tile unknown");
                    return;
                };
                tile.orientation = orientation;
                tile.set(origin);
                if let Some(tile) = self.tiles.get(tile_id) {
                    self.board.lay_tile(tile, self.host.geometry.as_ref());
                }
                if self.mode.is_placing() && !self.tiles.has_picked() {
                    self.mode = ActionMode::Idle;
                }
            }
            Message::HeroMoved { hero_id, cell } => {
                if let Some(hero) = self.roster.get_mut(hero_id) {
                    hero.pos = cell;
                    hero.path.clear();
                }
            }
            Message::CellUsed { x, y } => {
                self.board.set_used(CellPos::new(x, y));
            }
            Message::ClockInverted => self.host.clock.invert(),
            Message::PauseRequested { paused } => {
                if paused {
                    self.host.game.pause();
                } else {
                    self.host.game.resume();
                }
            }
            Message::RecomputeAi | Message::RolesSwapRequested => {
                debug!(syscall = message.syscall(), "authority request ignored by client");
            }
        }
    }

    /// Deselect a hero and clear its displayed path. Leaves hero mode if it
    /// was the active hero.
    pub(crate) fn release_hero(&mut self, id: HeroId) {
        if let Some(hero) = self.roster.get_mut(id) {
            hero.status = HeroStatus::Set;
            hero.path.clear();
        }
        if self.mode.active_hero() == Some(id) {
            self.mode = ActionMode::Idle;
            self.hovered = None;
            self.press_cell = None;
        }
    }
}
