//! Collision-batch consumers: the merge engine and the overflow detector.
//!
//! Both systems read the same `CollisionEvent::Started` batch each physics
//! step, independently and in delivery order, mirroring the two halves of the
//! game's collision rule:
//!
//! 1. `fruit_merge_system` — two settled fruits of equal rank become one fruit
//!    of the next rank at their contact point, and score the merge.
//! 2. `overflow_detection_system` — a settled fruit touching the top sensor
//!    line ends the game, unless input is disabled (a just-dropped fruit
//!    always falls through the line during the cooldown window).
//!
//! They run in `PostUpdate`, after Rapier has written back the step's events.

use crate::arena::TopSensor;
use crate::config::GameConfig;
use crate::dropper::DropCooldown;
use crate::fruit::{self, Fruit, FruitActivation, PendingFruit};
use crate::menu::GameState;
use crate::score::SessionScore;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashSet;

pub struct MergePlugin;

impl Plugin for MergePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (fruit_merge_system, overflow_detection_system)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Merge equal-rank fruit pairs from this step's collision batch.
///
/// The top rank is absorbing: two max-rank fruits in contact are left
/// untouched. Pending fruits and non-fruit bodies (walls, sensor) never
/// match. A consumed-set guards against double-merging a body that appears
/// in two pairs of the same batch.
pub fn fruit_merge_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    mut score: ResMut<SessionScore>,
    config: Res<GameConfig>,
    q_fruit: Query<(&Fruit, &Transform), Without<PendingFruit>>,
) {
    let mut consumed: HashSet<Entity> = HashSet::new();

    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };
        if consumed.contains(&e1) || consumed.contains(&e2) {
            continue;
        }

        let (Ok((f1, t1)), Ok((f2, t2))) = (q_fruit.get(e1), q_fruit.get(e2)) else {
            continue;
        };
        if f1.rank != f2.rank || f1.rank == fruit::max_rank() {
            continue;
        }

        consumed.insert(e1);
        consumed.insert(e2);

        score.points += fruit::merge_reward(f1.rank);

        commands.entity(e1).despawn();
        commands.entity(e2).despawn();

        // Two touching equal circles contact exactly halfway between their
        // centres, so the midpoint is the manifold's support point.
        let contact = (t1.translation.truncate() + t2.translation.truncate()) * 0.5;
        fruit::spawn_fruit(
            &mut commands,
            &config,
            f1.rank + 1,
            contact,
            FruitActivation::Active,
        );
    }
}

/// End the game when a settled fruit reaches the top sensor line.
///
/// The input-disabled guard skips the window in which a freshly dropped
/// fruit legitimately crosses the line on its way down. The transition is
/// idempotent: once `GameOver` is entered, this system (and every other
/// gameplay system) stops running.
pub fn overflow_detection_system(
    mut collision_events: MessageReader<CollisionEvent>,
    cooldown: Res<DropCooldown>,
    q_sensor: Query<(), With<TopSensor>>,
    q_fruit: Query<(), (With<Fruit>, Without<PendingFruit>)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };
        if cooldown.input_disabled() {
            continue;
        }

        let overflow = (q_sensor.contains(e1) && q_fruit.contains(e2))
            || (q_sensor.contains(e2) && q_fruit.contains(e1));
        if overflow {
            info!("Overflow line crossed; game over");
            next_state.set(GameState::GameOver);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    fn collision_test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.init_state::<GameState>();
        app.add_message::<CollisionEvent>();
        app.insert_resource(GameConfig::default());
        app.insert_resource(SessionScore::default());
        app.init_resource::<DropCooldown>();
        app.add_systems(
            PostUpdate,
            (fruit_merge_system, overflow_detection_system)
                .run_if(in_state(GameState::Playing)),
        );
        app
    }

    fn spawn_settled_fruit(app: &mut App, rank: usize, x: f32, y: f32) -> Entity {
        app.world_mut()
            .spawn((Fruit { rank }, Transform::from_xyz(x, y, 0.1)))
            .id()
    }

    fn send_started(app: &mut App, e1: Entity, e2: Entity) {
        app.world_mut().write_message(CollisionEvent::Started(
            e1,
            e2,
            CollisionEventFlags::empty(),
        ));
    }

    fn fruits(app: &mut App) -> Vec<(usize, Vec2)> {
        let mut query = app.world_mut().query::<(&Fruit, &Transform)>();
        query
            .iter(app.world())
            .map(|(f, t)| (f.rank, t.translation.truncate()))
            .collect()
    }

    fn score(app: &App) -> u32 {
        app.world().resource::<SessionScore>().points
    }

    fn state(app: &App) -> GameState {
        app.world().resource::<State<GameState>>().get().clone()
    }

    // ── Merge engine ──────────────────────────────────────────────────────────

    #[test]
    fn merging_equal_ranks_spawns_next_rank_and_scores() {
        let mut app = collision_test_app();
        let a = spawn_settled_fruit(&mut app, 0, -10.0, -300.0);
        let b = spawn_settled_fruit(&mut app, 0, 23.0, -300.0);

        send_started(&mut app, a, b);
        app.update();

        let remaining = fruits(&mut app);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].0, 1, "merge must produce the next rank");
        assert_eq!(score(&app), 10);
        assert!(app.world().get_entity(a).is_err());
        assert!(app.world().get_entity(b).is_err());
    }

    #[test]
    fn merged_fruit_appears_at_the_contact_midpoint() {
        let mut app = collision_test_app();
        let a = spawn_settled_fruit(&mut app, 3, -40.0, -200.0);
        let b = spawn_settled_fruit(&mut app, 3, 28.0, -120.0);

        send_started(&mut app, a, b);
        app.update();

        let remaining = fruits(&mut app);
        assert_eq!(remaining.len(), 1);
        let pos = remaining[0].1;
        assert!((pos - Vec2::new(-6.0, -160.0)).length() < 1e-4, "pos = {pos}");
    }

    #[test]
    fn reward_follows_the_rank_formula() {
        for rank in 0..fruit::max_rank() {
            let mut app = collision_test_app();
            let a = spawn_settled_fruit(&mut app, rank, 0.0, 0.0);
            let b = spawn_settled_fruit(&mut app, rank, 10.0, 0.0);
            send_started(&mut app, a, b);
            app.update();
            assert_eq!(score(&app), (rank as u32 + 1) * 10, "rank {rank}");
        }
    }

    #[test]
    fn top_rank_pair_never_merges() {
        let mut app = collision_test_app();
        let top = fruit::max_rank();
        let a = spawn_settled_fruit(&mut app, top, -50.0, -300.0);
        let b = spawn_settled_fruit(&mut app, top, 50.0, -300.0);

        send_started(&mut app, a, b);
        app.update();

        assert_eq!(fruits(&mut app).len(), 2, "both watermelons must survive");
        assert_eq!(score(&app), 0);
    }

    #[test]
    fn different_ranks_do_not_merge() {
        let mut app = collision_test_app();
        let a = spawn_settled_fruit(&mut app, 1, 0.0, 0.0);
        let b = spawn_settled_fruit(&mut app, 2, 30.0, 0.0);

        send_started(&mut app, a, b);
        app.update();

        assert_eq!(fruits(&mut app).len(), 2);
        assert_eq!(score(&app), 0);
    }

    #[test]
    fn bodies_without_a_rank_are_ignored() {
        let mut app = collision_test_app();
        let fruit_entity = spawn_settled_fruit(&mut app, 0, 0.0, 0.0);
        let wall = app
            .world_mut()
            .spawn((crate::arena::Wall, Transform::default()))
            .id();

        send_started(&mut app, fruit_entity, wall);
        app.update();

        assert_eq!(fruits(&mut app).len(), 1);
        assert_eq!(score(&app), 0);
    }

    #[test]
    fn pending_fruit_never_merges() {
        let mut app = collision_test_app();
        let settled = spawn_settled_fruit(&mut app, 0, 0.0, 0.0);
        let pending = app
            .world_mut()
            .spawn((Fruit { rank: 0 }, PendingFruit, Transform::default()))
            .id();

        send_started(&mut app, settled, pending);
        app.update();

        assert_eq!(fruits(&mut app).len(), 2);
        assert_eq!(score(&app), 0);
    }

    #[test]
    fn each_body_merges_at_most_once_per_batch() {
        // Three cherries, two overlapping pairs in one batch: only one merge
        // may happen, and the shared body must not be consumed twice.
        let mut app = collision_test_app();
        let a = spawn_settled_fruit(&mut app, 0, -30.0, 0.0);
        let b = spawn_settled_fruit(&mut app, 0, 0.0, 0.0);
        let c = spawn_settled_fruit(&mut app, 0, 30.0, 0.0);

        send_started(&mut app, a, b);
        send_started(&mut app, b, c);
        app.update();

        let remaining = fruits(&mut app);
        let rank1 = remaining.iter().filter(|(r, _)| *r == 1).count();
        let rank0 = remaining.iter().filter(|(r, _)| *r == 0).count();
        assert_eq!(rank1, 1, "exactly one merge product");
        assert_eq!(rank0, 1, "the spectator cherry survives");
        assert_eq!(score(&app), 10, "only one reward paid");
    }

    // ── Overflow detector ─────────────────────────────────────────────────────

    fn spawn_sensor(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((TopSensor, Transform::default()))
            .id()
    }

    #[test]
    fn sensor_contact_ends_the_game() {
        let mut app = collision_test_app();
        app.update();
        let sensor = spawn_sensor(&mut app);
        let overflowing = spawn_settled_fruit(&mut app, 2, 0.0, 280.0);

        send_started(&mut app, sensor, overflowing);
        app.update();
        app.update(); // StateTransition applies the queued state change

        assert_eq!(state(&app), GameState::GameOver);
    }

    #[test]
    fn sensor_contact_is_ignored_while_input_is_disabled() {
        let mut app = collision_test_app();
        app.update();
        app.world_mut().resource_mut::<DropCooldown>().0 =
            Some(Timer::from_seconds(0.8, TimerMode::Once));
        let sensor = spawn_sensor(&mut app);
        let falling = spawn_settled_fruit(&mut app, 0, 0.0, 280.0);

        send_started(&mut app, sensor, falling);
        app.update();
        app.update();

        assert_eq!(
            state(&app),
            GameState::Playing,
            "a just-dropped fruit crossing the line is not an overflow"
        );
    }

    #[test]
    fn pending_fruit_touching_the_sensor_is_not_an_overflow() {
        let mut app = collision_test_app();
        app.update();
        let sensor = spawn_sensor(&mut app);
        let pending = app
            .world_mut()
            .spawn((Fruit { rank: 0 }, PendingFruit, Transform::default()))
            .id();

        send_started(&mut app, sensor, pending);
        app.update();
        app.update();

        assert_eq!(state(&app), GameState::Playing);
    }

    #[test]
    fn game_over_is_terminal() {
        let mut app = collision_test_app();
        app.update();
        let sensor = spawn_sensor(&mut app);
        let a = spawn_settled_fruit(&mut app, 0, 0.0, 280.0);
        send_started(&mut app, sensor, a);
        app.update();
        app.update();
        assert_eq!(state(&app), GameState::GameOver);

        // Further collision batches are dead: the merge engine is off too.
        let b = spawn_settled_fruit(&mut app, 0, -10.0, 0.0);
        let c = spawn_settled_fruit(&mut app, 0, 10.0, 0.0);
        send_started(&mut app, b, c);
        app.update();
        app.update();

        assert_eq!(state(&app), GameState::GameOver);
        assert_eq!(score(&app), 0, "no merges after game over");
        assert!(app.world().get_entity(b).is_ok());
        assert!(app.world().get_entity(c).is_ok());
    }
}
