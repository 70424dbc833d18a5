//! Fruit catalog, body components, and the shared spawn helper.
//!
//! Every body in the container is either a fruit (this module) or part of the
//! static arena ([`crate::arena`]). A fruit's identity is its catalog rank;
//! the catalog is a fixed ordered sequence where merging two rank-`r` fruits
//! produces one rank-`r + 1` fruit. The final rank is absorbing — two
//! watermelons sit next to each other forever.

use crate::config::GameConfig;
use crate::constants::MERGE_REWARD_FACTOR;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// One entry in the fruit catalog. Rank equals the index in [`FRUITS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FruitKind {
    pub rank: usize,
    pub name: &'static str,
    pub radius: f32,
}

/// The ordered fruit catalog, smallest to largest. Radius strictly increases
/// with rank so a merged fruit always needs more room than its parents.
pub const FRUITS: &[FruitKind] = &[
    FruitKind { rank: 0, name: "cherry", radius: 16.5 },
    FruitKind { rank: 1, name: "strawberry", radius: 24.0 },
    FruitKind { rank: 2, name: "grape", radius: 30.5 },
    FruitKind { rank: 3, name: "dekopon", radius: 34.5 },
    FruitKind { rank: 4, name: "orange", radius: 44.5 },
    FruitKind { rank: 5, name: "apple", radius: 57.0 },
    FruitKind { rank: 6, name: "pear", radius: 64.5 },
    FruitKind { rank: 7, name: "peach", radius: 78.0 },
    FruitKind { rank: 8, name: "pineapple", radius: 88.5 },
    FruitKind { rank: 9, name: "melon", radius: 110.0 },
    FruitKind { rank: 10, name: "watermelon", radius: 129.5 },
];

/// Index of the absorbing top rank.
pub fn max_rank() -> usize {
    FRUITS.len() - 1
}

/// Points awarded for merging two fruits of the given rank.
pub fn merge_reward(rank: usize) -> u32 {
    (rank as u32 + 1) * MERGE_REWARD_FACTOR
}

/// Fill colour for a fruit of the given rank (dark red → pale green ramp).
pub fn rank_color(rank: usize) -> Color {
    let t = rank as f32 / max_rank() as f32;
    Color::srgb(0.9 - 0.5 * t, 0.15 + 0.7 * t, 0.2 + 0.2 * t)
}

// ── Components ────────────────────────────────────────────────────────────────

/// Component attached to every fruit body; carries the catalog rank.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fruit {
    pub rank: usize,
}

impl Fruit {
    /// Catalog entry for this fruit's rank.
    pub fn kind(&self) -> &'static FruitKind {
        &FRUITS[self.rank]
    }
}

/// Marker for the single player-controlled fruit awaiting its drop.
///
/// A pending fruit is `RigidBody::Fixed` (physics-inactive); the drop
/// controller swaps it to `RigidBody::Dynamic` and removes this marker.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingFruit;

/// Whether a freshly spawned fruit participates in physics immediately or
/// hangs at the drop point under player control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruitActivation {
    /// `RigidBody::Dynamic` from the first frame (merge products).
    Active,
    /// `RigidBody::Fixed` + [`PendingFruit`] (player-held spawn).
    Pending,
}

/// Spawn a fruit body of `rank` at `position` and register it with the
/// physics world.
///
/// Merge products are born dynamic; player-held spawns are born fixed and
/// tagged [`PendingFruit`] until dropped.
pub fn spawn_fruit(
    commands: &mut Commands,
    config: &GameConfig,
    rank: usize,
    position: Vec2,
    activation: FruitActivation,
) -> Entity {
    let kind = &FRUITS[rank];

    let mut entity = commands.spawn((
        Fruit { rank },
        Transform::from_translation(position.extend(0.1)),
        Visibility::default(),
        Collider::ball(kind.radius),
        Restitution::coefficient(config.fruit_restitution),
        Velocity::zero(),
        ActiveEvents::COLLISION_EVENTS,
    ));

    match activation {
        FruitActivation::Active => {
            entity.insert(RigidBody::Dynamic);
        }
        FruitActivation::Pending => {
            entity.insert((RigidBody::Fixed, PendingFruit));
        }
    }

    entity.id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ranks_are_contiguous_from_zero() {
        for (i, kind) in FRUITS.iter().enumerate() {
            assert_eq!(kind.rank, i, "{} has rank {} at index {i}", kind.name, kind.rank);
        }
    }

    #[test]
    fn catalog_radii_strictly_increase() {
        for pair in FRUITS.windows(2) {
            assert!(
                pair[1].radius > pair[0].radius,
                "{} ({}) should be larger than {} ({})",
                pair[1].name,
                pair[1].radius,
                pair[0].name,
                pair[0].radius
            );
        }
    }

    #[test]
    fn merge_reward_scales_linearly_with_rank() {
        assert_eq!(merge_reward(0), 10);
        assert_eq!(merge_reward(4), 50);
        assert_eq!(merge_reward(max_rank() - 1), max_rank() as u32 * 10);
    }

    #[test]
    fn every_rank_has_a_distinct_color() {
        for rank in 1..FRUITS.len() {
            assert_ne!(
                rank_color(rank),
                rank_color(rank - 1),
                "ranks {rank} and {} share a colour",
                rank - 1
            );
        }
    }
}
