use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

use fruitfall::constants::{CONTAINER_HEIGHT, CONTAINER_WIDTH};
use fruitfall::{arena, config, dropper, input, menu, merge, rendering, score};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Fruitfall".into(),
                resolution: WindowResolution::new(
                    CONTAINER_WIDTH as u32,
                    CONTAINER_HEIGHT as u32,
                ),
                ..Default::default()
            }),
            ..Default::default()
        }))
        // Pale sprout-green backdrop behind the container.
        .insert_resource(ClearColor(Color::srgb(0.95, 1.0, 0.91)))
        // Insert GameConfig with compiled defaults; load_game_config will
        // overwrite it from assets/game.toml (if present) in the Startup schedule.
        .insert_resource(config::GameConfig::default())
        // pixels_per_meter(1.0) keeps world units equal to screen pixels, so
        // the container geometry constants map 1:1 onto the window.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_plugins((
            menu::MenuPlugin,
            input::InputPlugin,
            arena::ArenaPlugin,
            dropper::DropperPlugin,
            merge::MergePlugin,
            score::ScorePlugin,
            rendering::RenderingPlugin,
        ))
        .add_systems(Startup, config::load_game_config)
        .run();
}
