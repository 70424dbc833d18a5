//! Pending-fruit lifecycle: spawn, steer, drop, cooldown, respawn.
//!
//! ## Flow
//!
//! 1. `initial_fruit_system` spawns the first pending fruit on entering play.
//! 2. `lateral_motion_system` nudges the held fruit sideways on a fixed-period
//!    tick while a direction is held, clamped to the container bounds.
//! 3. `drop_system` activates physics on the pending fruit and starts the
//!    cooldown, during which all input is disabled.
//! 4. `cooldown_respawn_system` finishes the cooldown, re-enables input, and
//!    spawns the next pending fruit.
//!
//! At most one pending fruit exists at any time; during the cooldown window
//! there is none. The cooldown is never cancelled once started.

use crate::config::GameConfig;
use crate::constants::{LEFT_BOUND, RIGHT_BOUND};
use crate::fruit::{self, Fruit, FruitActivation, PendingFruit};
use crate::input::ControlIntent;
use crate::menu::GameState;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

// ── Resources ─────────────────────────────────────────────────────────────────

/// Post-drop cooldown. `Some` while a drop is settling, which doubles as the
/// global input-disabled flag: no motion, no drops, no overflow detection.
#[derive(Resource, Default, Debug)]
pub struct DropCooldown(pub Option<Timer>);

impl DropCooldown {
    /// True while the cooldown runs; all player input is ignored.
    pub fn input_disabled(&self) -> bool {
        self.0.is_some()
    }
}

/// Direction of an active lateral nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDir {
    Left,
    Right,
}

impl NudgeDir {
    fn sign(self) -> f32 {
        match self {
            NudgeDir::Left => -1.0,
            NudgeDir::Right => 1.0,
        }
    }
}

/// The single lateral-nudge slot plus its fixed-period tick timer.
///
/// One slot means one direction at a time: the first direction held owns the
/// slot until released, and the opposite key is ignored meanwhile.
#[derive(Resource, Debug)]
pub struct NudgeState {
    pub active: Option<NudgeDir>,
    pub timer: Timer,
}

impl NudgeState {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            active: None,
            timer: Timer::from_seconds(config.nudge_tick_secs, TimerMode::Repeating),
        }
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct DropperPlugin;

impl Plugin for DropperPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DropCooldown>()
            .add_systems(
                Startup,
                init_nudge_state.after(crate::config::load_game_config),
            )
            .add_systems(OnEnter(GameState::Playing), initial_fruit_system)
            .add_systems(
                Update,
                (lateral_motion_system, drop_system, cooldown_respawn_system)
                    .chain()
                    .after(crate::input::control_button_intent_system)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

fn init_nudge_state(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(NudgeState::from_config(&config));
}

// ── Spawn controller ──────────────────────────────────────────────────────────

/// Spawn the next pending fruit at the drop point: a uniformly random rank
/// from the low spawnable band, physics held off until the drop.
pub fn spawn_pending_fruit(commands: &mut Commands, config: &GameConfig) -> Entity {
    let mut rng = rand::thread_rng();
    let rank = rng.gen_range(0..config.effective_spawnable_ranks());
    fruit::spawn_fruit(
        commands,
        config,
        rank,
        Vec2::new(0.0, config.drop_height),
        FruitActivation::Pending,
    )
}

/// Put the first pending fruit under player control when play begins.
pub fn initial_fruit_system(mut commands: Commands, config: Res<GameConfig>) {
    spawn_pending_fruit(&mut commands, &config);
}

// ── Lateral motion controller ─────────────────────────────────────────────────

/// Resolve the nudge slot for this frame: release frees it, then the first
/// held direction claims it. On a same-frame tie, left wins.
pub fn resolve_nudge_slot(
    active: Option<NudgeDir>,
    left_held: bool,
    right_held: bool,
) -> Option<NudgeDir> {
    let active = match active {
        Some(NudgeDir::Left) if !left_held => None,
        Some(NudgeDir::Right) if !right_held => None,
        other => other,
    };
    if active.is_some() {
        return active;
    }
    if left_held {
        Some(NudgeDir::Left)
    } else if right_held {
        Some(NudgeDir::Right)
    } else {
        None
    }
}

/// Clamp a fruit centre so its edge stays inside the container walls.
pub fn clamp_to_bounds(x: f32, radius: f32) -> f32 {
    x.clamp(LEFT_BOUND + radius, RIGHT_BOUND - radius)
}

/// Nudge the pending fruit sideways while a direction is held.
///
/// Runs every frame but only moves on elapsed ticks of the fixed-period
/// timer, so movement speed is frame-rate independent. No motion while input
/// is disabled or no pending fruit exists.
pub fn lateral_motion_system(
    time: Res<Time>,
    intent: Res<ControlIntent>,
    cooldown: Res<DropCooldown>,
    config: Res<GameConfig>,
    mut nudge: ResMut<NudgeState>,
    mut q_pending: Query<(&mut Transform, &Fruit), With<PendingFruit>>,
) {
    nudge.active = resolve_nudge_slot(nudge.active, intent.move_left, intent.move_right);

    let Some(dir) = nudge.active else {
        nudge.timer.reset();
        return;
    };
    if cooldown.input_disabled() {
        return;
    }
    let Ok((mut transform, fruit)) = q_pending.single_mut() else {
        return;
    };

    nudge.timer.tick(time.delta());
    let steps = nudge.timer.times_finished_this_tick();
    if steps == 0 {
        return;
    }

    let delta = config.nudge_step * steps as f32 * dir.sign();
    transform.translation.x = clamp_to_bounds(transform.translation.x + delta, fruit.kind().radius);
}

// ── Drop controller ───────────────────────────────────────────────────────────

/// Commit the pending fruit on a drop edge: physics on, input off, cooldown
/// started. Ignored while input is disabled.
pub fn drop_system(
    mut commands: Commands,
    intent: Res<ControlIntent>,
    mut cooldown: ResMut<DropCooldown>,
    config: Res<GameConfig>,
    q_pending: Query<Entity, With<PendingFruit>>,
) {
    if !intent.drop || cooldown.input_disabled() {
        return;
    }
    let Ok(entity) = q_pending.single() else {
        return;
    };

    commands
        .entity(entity)
        .remove::<PendingFruit>()
        .insert(RigidBody::Dynamic);
    cooldown.0 = Some(Timer::from_seconds(
        config.drop_cooldown_secs,
        TimerMode::Once,
    ));
}

/// Tick the cooldown; on completion, re-enable input and spawn the next
/// pending fruit. The cooldown always runs to completion once started.
pub fn cooldown_respawn_system(
    mut commands: Commands,
    time: Res<Time>,
    mut cooldown: ResMut<DropCooldown>,
    config: Res<GameConfig>,
) {
    let Some(timer) = cooldown.0.as_mut() else {
        return;
    };
    timer.tick(time.delta());
    if !timer.finished() {
        return;
    }
    cooldown.0 = None;
    spawn_pending_fruit(&mut commands, &config);
}
