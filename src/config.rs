//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the tunable constants in
//! [`crate::constants`]. At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file. Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.nudge_step`, `config.drop_cooldown_secs`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`. Override any subset by setting the value in
/// `assets/game.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Physics ───────────────────────────────────────────────────────────────
    pub gravity_y: f32,
    pub fruit_restitution: f32,

    // ── Player Control ────────────────────────────────────────────────────────
    pub nudge_step: f32,
    pub nudge_tick_secs: f32,
    pub drop_cooldown_secs: f32,
    pub spawnable_ranks: usize,

    // ── Geometry ──────────────────────────────────────────────────────────────
    pub drop_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity_y: GRAVITY_Y,
            fruit_restitution: FRUIT_RESTITUTION,
            nudge_step: NUDGE_STEP,
            nudge_tick_secs: NUDGE_TICK_SECS,
            drop_cooldown_secs: DROP_COOLDOWN_SECS,
            spawnable_ranks: SPAWNABLE_RANKS,
            drop_height: DROP_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Spawnable rank count clamped to the catalog length. A TOML override
    /// larger than the catalog must never make `spawn_pending_fruit` index
    /// out of bounds.
    pub fn effective_spawnable_ranks(&self) -> usize {
        self.spawnable_ranks.clamp(1, crate::fruit::FRUITS.len())
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults. TOML parse errors are logged
/// but do not abort the game. A missing file is silently ignored (defaults
/// are already in place from `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/game.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded game config from {path}");
            }
            Err(e) => {
                warn!("Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            info!("No {path} found; using compiled defaults");
        }
    }
}
