//! Camera, fruit visuals, and the live score HUD.
//!
//! Fruits are drawn as filled `Mesh2d` circles. One mesh and one colour
//! material per catalog rank are created once at startup and shared by every
//! fruit of that rank; a small system attaches them to freshly spawned fruit
//! entities so the physics modules never touch render assets.

use crate::fruit::{rank_color, Fruit, FRUITS};
use crate::score::SessionScore;
use bevy::prelude::*;

// ── Resources ─────────────────────────────────────────────────────────────────

/// Shared circle mesh handles, indexed by fruit rank.
#[derive(Resource)]
pub struct FruitMeshes(pub Vec<Handle<Mesh>>);

/// Shared colour materials, indexed by fruit rank.
#[derive(Resource)]
pub struct FruitMaterials(pub Vec<Handle<ColorMaterial>>);

// ── Component markers ─────────────────────────────────────────────────────────

/// Marker for the permanent score HUD node.
#[derive(Component)]
pub struct HudScoreDisplay;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_camera, setup_fruit_assets, setup_hud_score))
            .add_systems(Update, (attach_fruit_mesh_system, hud_score_display_system));
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Setup camera for 2D rendering. Default scale shows the full container,
/// which exactly matches the window resolution.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Build one circle mesh and one material per catalog rank.
pub fn setup_fruit_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let mesh_handles = FRUITS
        .iter()
        .map(|kind| meshes.add(Circle::new(kind.radius)))
        .collect();
    let material_handles = FRUITS
        .iter()
        .map(|kind| materials.add(ColorMaterial::from_color(rank_color(kind.rank))))
        .collect();

    commands.insert_resource(FruitMeshes(mesh_handles));
    commands.insert_resource(FruitMaterials(material_handles));
}

/// Spawn the permanent score HUD node in the top-left corner.
pub fn setup_hud_score(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            HudScoreDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Score: 0"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.18, 0.30, 0.18)),
            ));
        });
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Attach the shared rank mesh and material to every freshly-spawned fruit.
pub fn attach_fruit_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &Fruit), Added<Fruit>>,
    fruit_meshes: Res<FruitMeshes>,
    fruit_materials: Res<FruitMaterials>,
) {
    for (entity, fruit) in query.iter() {
        commands.entity(entity).insert((
            Mesh2d(fruit_meshes.0[fruit.rank].clone()),
            MeshMaterial2d(fruit_materials.0[fruit.rank].clone()),
        ));
    }
}

/// Refresh the score HUD text whenever the session score changes.
pub fn hud_score_display_system(
    score: Res<SessionScore>,
    parent_query: Query<&Children, With<HudScoreDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    if !score.is_changed() {
        return;
    }
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!("Score: {}", score.points));
            }
        }
    }
}
