//! Viewport transform: pan/zoom state with eased zoom and the screen-to-cell
//! mapping every pointer decision goes through.
//!
//! The forward (render) transform is
//! `screen = viewport_center + zoom * (world + pan)`, so the inverse used for
//! hit-testing subtracts `pan * zoom` after removing the viewport center.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::board::CellPos;
use crate::consts::{MIN_ZOOM, ZOOM_EASING, ZOOM_SNAP_EPSILON, ZOOM_STEP};

/// A point in either screen or board space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Zoom key signals sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoomSignal {
    pub zoom_out: bool,
    pub zoom_in: bool,
}

/// Directional pan key signals sampled once per tick.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanSignal {
    pub up: bool,
    pub left: bool,
    pub down: bool,
    pub right: bool,
}

/// Camera state for the board view.
///
/// `zoom` is what the renderer scales by; it eases toward `target_zoom`,
/// which is what zoom input actually changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub zoom: f64,
    pub target_zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { zoom: MIN_ZOOM, target_zoom: MIN_ZOOM, pan_x: 0.0, pan_y: 0.0 }
    }
}

impl Camera {
    /// Apply one tick of zoom input, then ease the displayed zoom.
    ///
    /// Zooming out wins when both keys are held.
    pub fn apply_zoom(&mut self, signal: ZoomSignal) {
        if signal.zoom_out {
            self.target_zoom = (self.target_zoom / ZOOM_STEP).max(MIN_ZOOM);
        } else if signal.zoom_in {
            self.target_zoom *= ZOOM_STEP;
        }

        let gap = self.target_zoom - self.zoom;
        if gap.abs() > ZOOM_SNAP_EPSILON {
            self.zoom += gap / ZOOM_EASING;
        } else {
            self.zoom = self.target_zoom;
        }
    }

    /// Apply one tick of pan input.
    ///
    /// An explicit position overwrites the pan (programmatic recentering) and
    /// skips the directional keys for this tick.
    pub fn apply_pan(&mut self, signal: PanSignal, speed: f64, explicit: Option<Point>) {
        if let Some(at) = explicit {
            self.pan_x = at.x;
            self.pan_y = at.y;
            return;
        }
        if signal.up {
            self.pan_y += speed;
        }
        if signal.left {
            self.pan_x += speed;
        }
        if signal.down {
            self.pan_y -= speed;
        }
        if signal.right {
            self.pan_x -= speed;
        }
    }

    /// Map a screen point to the board cell under it.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn screen_to_cell(&self, screen: Point, viewport: Viewport, cell_size: f64) -> CellPos {
        let center = viewport.center();
        let span = cell_size * self.zoom;
        let x = ((screen.x - center.x - self.pan_x * self.zoom) / span).floor();
        let y = ((screen.y - center.y - self.pan_y * self.zoom) / span).floor();
        CellPos::new(x as i32, y as i32)
    }

    /// Screen position of a cell's top-left corner under the render transform.
    #[must_use]
    pub fn cell_to_screen(&self, cell: CellPos, viewport: Viewport, cell_size: f64) -> Point {
        let center = viewport.center();
        Point::new(
            center.x + self.zoom * (f64::from(cell.x) * cell_size + self.pan_x),
            center.y + self.zoom * (f64::from(cell.y) * cell_size + self.pan_y),
        )
    }

    /// Screen-space side length of one cell.
    #[must_use]
    pub fn cell_span(&self, cell_size: f64) -> f64 {
        cell_size * self.zoom
    }
}
