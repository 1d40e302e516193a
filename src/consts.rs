//! Shared numeric constants for the rule engine.

// ── Camera ──────────────────────────────────────────────────────

/// Multiplicative zoom step applied per tick while a zoom key is held.
pub const ZOOM_STEP: f64 = 1.1;

/// Lower bound for the zoom target.
pub const MIN_ZOOM: f64 = 1.0;

/// Below this gap the displayed zoom snaps onto the target.
pub const ZOOM_SNAP_EPSILON: f64 = 0.005;

/// Easing divisor: each tick closes `1 / ZOOM_EASING` of the remaining gap.
pub const ZOOM_EASING: f64 = 15.0;

// ── Config defaults ─────────────────────────────────────────────

/// Screen pixels per board cell at zoom 1.
pub const DEFAULT_CELL_SIZE: f64 = 40.0;

/// Pan distance per tick for each held direction key.
pub const DEFAULT_CAMERA_SPEED: f64 = 10.0;

/// Side of the square tile footprint, in cells.
pub const DEFAULT_TILE_SIZE: i32 = 4;

/// Smallest tile side the grid geometry accepts.
pub const MIN_TILE_SIZE: i32 = 2;

/// Highest supported scenario tier.
pub const MAX_SCENARIO: u8 = 7;

// ── Rules ───────────────────────────────────────────────────────

/// Tile placements a crystal grants before it is spent.
pub const CRYSTAL_USES: u32 = 1;

/// Scenario tier from which a clock inversion swaps roles between players.
pub const ROLE_SWAP_MIN_SCENARIO: u8 = 3;
