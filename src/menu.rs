//! `GameState` definition and the blocking game-over overlay.
//!
//! ## States
//!
//! | State      | Description                                            |
//! |------------|--------------------------------------------------------|
//! | `Playing`  | Initial state; all gameplay systems active             |
//! | `GameOver` | Terminal; world frozen, overlay with standings shown   |
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                     | Schedule                | Purpose                       |
//! |----------------------------|-------------------------|-------------------------------|
//! | `clear_fruit_bodies_system`| `OnEnter(GameOver)`     | Remove every fruit body       |
//! | `setup_game_over`          | `OnEnter(GameOver)`     | Spawn overlay + ranking panel |
//! | `game_over_button_system`  | `Update / in GameOver`  | Handle Quit                   |

use crate::constants::LEADERBOARD_CAPACITY;
use crate::fruit::Fruit;
use crate::score::{Leaderboard, SessionScore};
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level game state machine.
///
/// Every gameplay system runs under `.run_if(in_state(GameState::Playing))`;
/// nothing ever transitions back out of `GameOver`, making it terminal for
/// the process.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Active play; entered immediately at startup.
    #[default]
    Playing,
    /// Overflow reached; the session is over and only the overlay is live.
    GameOver,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the game-over overlay.
#[derive(Component)]
pub struct GameOverRoot;

/// Tags the "Quit" button on the overlay.
#[derive(Component)]
pub struct GameOverQuitButton;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState` and the game-over overlay flow.
///
/// This plugin must be added to the app **before** any plugin that calls
/// `.run_if(in_state(GameState::Playing))`, so the state is always registered
/// first.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(
                OnEnter(GameState::GameOver),
                (clear_fruit_bodies_system, setup_game_over)
                    .chain()
                    .after(crate::score::record_final_score_system),
            )
            .add_systems(
                Update,
                game_over_button_system.run_if(in_state(GameState::GameOver)),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn banner_color() -> Color {
    Color::srgb(0.85, 0.15, 0.12)
}
fn panel_bg() -> Color {
    Color::srgb(0.10, 0.14, 0.08)
}
fn panel_border() -> Color {
    Color::srgb(0.33, 0.49, 0.33)
}
fn standings_color() -> Color {
    Color::srgb(0.92, 0.90, 0.62)
}
fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}
fn hint_color() -> Color {
    Color::srgb(0.55, 0.55, 0.50)
}

/// Position label for a standings row (0-based index).
pub fn position_label(index: usize) -> &'static str {
    const LABELS: [&str; LEADERBOARD_CAPACITY] = ["1st", "2nd", "3rd", "4th", "5th"];
    LABELS[index]
}

// ── OnEnter(GameOver) ─────────────────────────────────────────────────────────

/// Remove every fruit body from the world. The container walls and the
/// sensor line stay behind under the overlay.
pub fn clear_fruit_bodies_system(mut commands: Commands, query: Query<Entity, With<Fruit>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Spawn the game-over overlay centred over the frozen container: final
/// score banner plus the five-row ranking panel. Empty slots render as 0.
pub fn setup_game_over(
    mut commands: Commands,
    score: Res<SessionScore>,
    leaderboard: Res<Leaderboard>,
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.82)),
            ZIndex(300),
            GameOverRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(40.0)),
                        row_gap: Val::Px(12.0),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(320.0),
                        ..default()
                    },
                    BackgroundColor(panel_bg()),
                    BorderColor::all(panel_border()),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new("GAME OVER"),
                        TextFont {
                            font_size: 46.0,
                            ..default()
                        },
                        TextColor(banner_color()),
                    ));

                    card.spawn((
                        Text::new(format!("Final Score: {}", score.points)),
                        TextFont {
                            font_size: 24.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));

                    overlay_spacer(card, 6.0);

                    for index in 0..LEADERBOARD_CAPACITY {
                        card.spawn((
                            Text::new(format!(
                                "{}   {}",
                                position_label(index),
                                leaderboard.slot(index)
                            )),
                            TextFont {
                                font_size: 18.0,
                                ..default()
                            },
                            TextColor(standings_color()),
                        ));
                    }

                    overlay_spacer(card, 10.0);

                    card.spawn((
                        Button,
                        Node {
                            width: Val::Px(220.0),
                            height: Val::Px(50.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(quit_bg()),
                        BorderColor::all(quit_border()),
                        GameOverQuitButton,
                    ))
                    .with_children(|btn| {
                        btn.spawn((
                            Text::new("QUIT"),
                            TextFont {
                                font_size: 18.0,
                                ..default()
                            },
                            TextColor(quit_text()),
                        ));
                    });

                    card.spawn((
                        Text::new("Press Esc to quit"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(hint_color()),
                    ));
                });
        });
}

/// Spawn a fixed-height invisible spacer node.
fn overlay_spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

// ── Update (GameOver only) ────────────────────────────────────────────────────

/// Handle the Quit button (or Esc) on the game-over overlay.
#[allow(clippy::type_complexity)]
pub fn game_over_button_system(
    quit_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<GameOverQuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    keys: Res<ButtonInput<KeyCode>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(bevy::app::AppExit::Success);
        return;
    }

    for (interaction, children) in quit_query.iter() {
        match interaction {
            Interaction::Pressed => {
                exit.write(bevy::app::AppExit::Success);
            }
            Interaction::Hovered => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(Color::WHITE);
                    }
                }
            }
            Interaction::None => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(quit_text());
                    }
                }
            }
        }
    }
}
