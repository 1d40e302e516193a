//! Input model: keys, key bindings, held-key signals, and the action mode.
//!
//! `ActionMode` is the single "what is the player doing" value. Every variant
//! carries the context its handlers need, so there are no loose flags to keep
//! in sync with it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::HashSet;

use crate::board::CellPos;
use crate::camera::{PanSignal, ZoomSignal};
use crate::hero::HeroId;
use crate::tile::Rotation;

/// A keyboard key as reported by the browser (e.g. `"c"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Lowercased key name, so bindings ignore caps lock and shift.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

/// A discrete command bound to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pick a tile and enter placing mode.
    EngageTile,
    /// Rotate the picked tile.
    Rotate(Rotation),
    /// Abandon the current action.
    Cancel,
    /// Pause or resume the game.
    TogglePause,
    /// Show or hide the grid overlay.
    ToggleGrid,
}

impl Command {
    /// Map a pressed key to its command, if bound.
    #[must_use]
    pub fn from_key(key: &Key) -> Option<Self> {
        match key.normalized().as_str() {
            "c" => Some(Self::EngageTile),
            "r" => Some(Self::Rotate(Rotation::CounterClockwise)),
            "t" => Some(Self::Rotate(Rotation::Clockwise)),
            "escape" => Some(Self::Cancel),
            "p" => Some(Self::TogglePause),
            "g" => Some(Self::ToggleGrid),
            _ => None,
        }
    }
}

/// Keys currently held down, sampled by the render tick.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys: HashSet<String>,
}

impl HeldKeys {
    pub fn press(&mut self, key: &Key) {
        self.keys.insert(key.normalized());
    }

    pub fn release(&mut self, key: &Key) {
        self.keys.remove(&key.normalized());
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    #[must_use]
    pub fn is_down(&self, name: &str) -> bool {
        self.keys.contains(name)
    }

    /// `a` zooms out, `e` zooms in.
    #[must_use]
    pub fn zoom_signal(&self) -> ZoomSignal {
        ZoomSignal { zoom_out: self.is_down("a"), zoom_in: self.is_down("e") }
    }

    /// `z`/`q`/`s`/`d` pan up/left/down/right.
    #[must_use]
    pub fn pan_signal(&self) -> PanSignal {
        PanSignal {
            up: self.is_down("z"),
            left: self.is_down("q"),
            down: self.is_down("s"),
            right: self.is_down("d"),
        }
    }
}

/// The cell that justified entering placing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacingTrigger {
    /// An unexplored gate under a matching hero.
    Gate(CellPos),
    /// An unused crystal under a matching hero; placing consumes one use.
    Crystal(CellPos),
}

/// What the player is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionMode {
    /// Nothing in progress.
    #[default]
    Idle,
    /// A tile is picked and follows the pointer.
    Placing {
        /// Cell that allowed this placement.
        trigger: PlacingTrigger,
    },
    /// A hero is selected and being dragged.
    HeroSelected {
        /// The selected hero.
        hero: HeroId,
    },
}

impl ActionMode {
    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_placing(self) -> bool {
        matches!(self, Self::Placing { .. })
    }

    #[must_use]
    pub fn active_hero(self) -> Option<HeroId> {
        match self {
            Self::HeroSelected { hero } => Some(hero),
            _ => None,
        }
    }
}

/// Persistent UI flags visible to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    pub show_grid: bool,
}
