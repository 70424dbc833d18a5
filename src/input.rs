//! Logical input layer: keyboard and on-screen buttons merged into one intent.
//!
//! Three logical actions exist — move-left, move-right, drop. Each can come
//! from the keyboard (arrow keys; ArrowDown and Space are synonymous drop
//! triggers) or from the on-screen control bar (three UI buttons, for touch
//! and mouse play). All sources are merged into [`ControlIntent`], which is
//! cleared at the start of every frame and consumed by the controllers in
//! [`crate::dropper`].

use crate::menu::GameState;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

/// Per-frame logical input.
///
/// `move_left` / `move_right` are *held* states; `drop` is a press edge.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct ControlIntent {
    pub move_left: bool,
    pub move_right: bool,
    pub drop: bool,
}

/// Which logical action an on-screen control button maps to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    MoveLeft,
    Drop,
    MoveRight,
}

/// Root node of the on-screen control bar.
#[derive(Component)]
pub struct ControlBarRoot;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlIntent>()
            .add_systems(OnEnter(GameState::Playing), setup_control_bar)
            .add_systems(OnExit(GameState::Playing), cleanup_control_bar)
            .add_systems(
                Update,
                (
                    control_intent_clear_system,
                    keyboard_intent_system,
                    control_button_intent_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ── Intent systems ────────────────────────────────────────────────────────────

/// Reset the intent at the start of each frame; the source systems re-assert
/// whatever is currently held or pressed.
pub fn control_intent_clear_system(mut intent: ResMut<ControlIntent>) {
    *intent = ControlIntent::default();
}

/// Map arrow keys and Space onto the logical intent.
pub fn keyboard_intent_system(keys: Res<ButtonInput<KeyCode>>, mut intent: ResMut<ControlIntent>) {
    if keys.pressed(KeyCode::ArrowLeft) {
        intent.move_left = true;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        intent.move_right = true;
    }
    if keys.any_just_pressed([KeyCode::ArrowDown, KeyCode::Space]) {
        intent.drop = true;
    }
}

/// Map on-screen button state onto the logical intent.
///
/// Move buttons act while held (`Interaction::Pressed` every frame); the drop
/// button acts on the press edge only, via `Changed<Interaction>`.
#[allow(clippy::type_complexity)]
pub fn control_button_intent_system(
    held: Query<(&Interaction, &ControlButton)>,
    edges: Query<(&Interaction, &ControlButton), Changed<Interaction>>,
    mut intent: ResMut<ControlIntent>,
) {
    for (interaction, button) in held.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            ControlButton::MoveLeft => intent.move_left = true,
            ControlButton::MoveRight => intent.move_right = true,
            ControlButton::Drop => {}
        }
    }

    for (interaction, button) in edges.iter() {
        if *interaction == Interaction::Pressed && *button == ControlButton::Drop {
            intent.drop = true;
        }
    }
}

// ── Control bar UI ────────────────────────────────────────────────────────────

fn button_bg() -> Color {
    Color::srgba(0.33, 0.49, 0.33, 0.85)
}
fn button_border() -> Color {
    Color::srgb(0.18, 0.30, 0.18)
}
fn button_text() -> Color {
    Color::srgb(0.95, 1.0, 0.91)
}

/// Spawn the bottom control bar: ◀ ▼ ▶.
pub fn setup_control_bar(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                bottom: Val::Px(8.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                column_gap: Val::Px(18.0),
                ..default()
            },
            ControlBarRoot,
        ))
        .with_children(|bar| {
            control_button(bar, ControlButton::MoveLeft, "◀");
            control_button(bar, ControlButton::Drop, "▼");
            control_button(bar, ControlButton::MoveRight, "▶");
        });
}

/// Despawn the control bar when play ends; the game-over overlay replaces it.
pub fn cleanup_control_bar(mut commands: Commands, query: Query<Entity, With<ControlBarRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

fn control_button(parent: &mut ChildSpawnerCommands<'_>, action: ControlButton, label: &str) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(72.0),
                height: Val::Px(44.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(button_bg()),
            BorderColor::all(button_border()),
            action,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(button_text()),
            ));
        });
}
