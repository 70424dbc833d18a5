//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! The runtime-tunable subset is mirrored by [`crate::config::GameConfig`]
//! and can be overridden via `assets/game.toml`.
//!
//! Coordinates are Bevy world units (pixels at `pixels_per_meter(1.0)`),
//! origin at the container centre, y up.

// ── Container Geometry ────────────────────────────────────────────────────────

/// Interior + wall width of the container (world units). Matches the window width.
pub const CONTAINER_WIDTH: f32 = 620.0;

/// Full height of the container (world units). Matches the window height.
pub const CONTAINER_HEIGHT: f32 = 850.0;

/// Thickness of each side wall.
pub const WALL_THICKNESS: f32 = 30.0;

/// Thickness of the ground slab at the container bottom.
pub const GROUND_THICKNESS: f32 = 60.0;

/// X coordinate of the left wall's inner face. A fruit's centre may not go
/// below `LEFT_BOUND + radius`.
pub const LEFT_BOUND: f32 = -(CONTAINER_WIDTH / 2.0) + WALL_THICKNESS;

/// X coordinate of the right wall's inner face.
pub const RIGHT_BOUND: f32 = CONTAINER_WIDTH / 2.0 - WALL_THICKNESS;

/// Y coordinate of the overflow sensor line (150 u below the container top).
///
/// Every dropped fruit falls through this line once; the drop cooldown keeps
/// that crossing from being misread as an overflow (see the detector's
/// input-disabled guard).
pub const SENSOR_Y: f32 = CONTAINER_HEIGHT / 2.0 - 150.0;

/// Half-thickness of the sensor line collider.
pub const SENSOR_HALF_THICKNESS: f32 = 1.0;

/// Y coordinate of the pending fruit's hold position. High enough that the
/// largest spawnable fruit hangs clear of the sensor line.
pub const DROP_HEIGHT: f32 = CONTAINER_HEIGHT / 2.0 - 50.0;

// ── Physics ───────────────────────────────────────────────────────────────────

/// Downward gravity (u/s²) applied to the Rapier world.
///
/// At pixel scale Rapier's real-world default (−9.81) is imperceptible; this
/// value gives a drop feel close to the classic container games.
pub const GRAVITY_Y: f32 = -1000.0;

/// Restitution coefficient for every fruit body.
/// 0.0 = perfectly inelastic; 1.0 = perfectly elastic.
pub const FRUIT_RESTITUTION: f32 = 0.5;

// ── Player Control ────────────────────────────────────────────────────────────

/// Horizontal distance the pending fruit moves per nudge tick.
pub const NUDGE_STEP: f32 = 1.5;

/// Period of the repeating nudge timer (seconds). At 5 ms a held direction
/// travels 300 u/s.
pub const NUDGE_TICK_SECS: f32 = 0.005;

/// Seconds after a drop before the next pending fruit appears. Input is
/// disabled for the whole window, which also bounds the drop rate.
pub const DROP_COOLDOWN_SECS: f32 = 0.8;

/// Number of catalog ranks eligible for random spawning (ranks `0..5`).
/// Large late-game fruits are only ever produced by merging.
pub const SPAWNABLE_RANKS: usize = 5;

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Points awarded for a merge of two rank-`r` fruits: `(r + 1) × MERGE_REWARD_FACTOR`.
pub const MERGE_REWARD_FACTOR: u32 = 10;

/// Maximum number of entries kept in the persisted ranking list.
pub const LEADERBOARD_CAPACITY: usize = 5;
