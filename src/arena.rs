//! Static container world: walls, ground, and the overflow sensor line.
//!
//! Spawned once on `OnEnter(GameState::Playing)`. The walls and ground are
//! plain fixed cuboids; the sensor line is a full-width [`Sensor`] collider
//! that never resolves contacts — it exists only to raise collision-start
//! events for the game-over detector. All of it survives game over; only
//! fruit bodies are cleared.

use crate::config::GameConfig;
use crate::constants::{
    CONTAINER_HEIGHT, CONTAINER_WIDTH, GROUND_THICKNESS, SENSOR_HALF_THICKNESS, SENSOR_Y,
    WALL_THICKNESS,
};
use crate::menu::GameState;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Marker for the static container walls and ground.
#[derive(Component, Debug, Clone, Copy)]
pub struct Wall;

/// Marker for the overflow sensor line near the container top.
#[derive(Component, Debug, Clone, Copy)]
pub struct TopSensor;

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), spawn_arena)
            .add_systems(Startup, configure_gravity.after(crate::config::load_game_config));
    }
}

/// Point Rapier's gravity straight down at the configured pixel-scale value.
pub fn configure_gravity(config: Res<GameConfig>, mut rapier: Query<&mut RapierConfiguration>) {
    for mut cfg in rapier.iter_mut() {
        cfg.gravity = Vec2::new(0.0, config.gravity_y);
    }
}

/// Spawn the container statics: two side walls, the ground slab, and the
/// overflow sensor line.
pub fn spawn_arena(mut commands: Commands) {
    let wall_half_h = (CONTAINER_HEIGHT - GROUND_THICKNESS) / 2.0;
    let wall_x = CONTAINER_WIDTH / 2.0 - WALL_THICKNESS / 2.0;
    // Walls sit flush on the ground slab, so their centre is lifted by half
    // the ground thickness.
    let wall_y = GROUND_THICKNESS / 2.0;
    let ground_y = -(CONTAINER_HEIGHT / 2.0) + GROUND_THICKNESS / 2.0;

    commands.spawn((
        Wall,
        RigidBody::Fixed,
        Collider::cuboid(WALL_THICKNESS / 2.0, wall_half_h),
        Transform::from_xyz(-wall_x, wall_y, 0.0),
        GlobalTransform::default(),
    ));

    commands.spawn((
        Wall,
        RigidBody::Fixed,
        Collider::cuboid(WALL_THICKNESS / 2.0, wall_half_h),
        Transform::from_xyz(wall_x, wall_y, 0.0),
        GlobalTransform::default(),
    ));

    commands.spawn((
        Wall,
        RigidBody::Fixed,
        Collider::cuboid(CONTAINER_WIDTH / 2.0, GROUND_THICKNESS / 2.0),
        Transform::from_xyz(0.0, ground_y, 0.0),
        GlobalTransform::default(),
    ));

    commands.spawn((
        TopSensor,
        RigidBody::Fixed,
        Collider::cuboid(CONTAINER_WIDTH / 2.0, SENSOR_HALF_THICKNESS),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        Transform::from_xyz(0.0, SENSOR_Y, 0.0),
        GlobalTransform::default(),
    ));

    info!("Arena spawned: {CONTAINER_WIDTH}x{CONTAINER_HEIGHT}, sensor at y={SENSOR_Y}");
}
