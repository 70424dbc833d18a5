//! Headless unit tests for the [`GameState`] state machine.
//!
//! These tests use [`MinimalPlugins`] — no window, no rendering, no physics —
//! so they run fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. Default initial state is `Playing` (the game starts immediately).
//! 2. A `NextState` request transitions from `Playing` → `GameOver`.
//! 3. `GameOver` persists across frames with no new transition request.
//! 4. Repeated `GameOver` requests while already ended are harmless.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use fruitfall::menu::GameState;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a minimal headless app with just the state registered via `init_state`.
///
/// `MinimalPlugins` provides the required scheduling infrastructure.
/// `StatesPlugin` adds the `StateTransition` schedule needed by `init_state`.
/// No window or rendering is created.
fn app_with_default_state() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// The default variant of `GameState` is `Playing` — there is no splash
/// screen; the container is live from the first frame.
#[test]
fn default_state_is_playing() {
    let mut app = app_with_default_state();
    app.update(); // run one frame so StateTransition fires
    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        *state.get(),
        GameState::Playing,
        "initial state must be Playing"
    );
}

/// Requesting `GameOver` via `NextState` transitions the state on the next
/// `StateTransition` pass (which Bevy runs before each `Update`).
#[test]
fn transition_playing_to_game_over() {
    let mut app = app_with_default_state();
    app.update(); // settle into Playing

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::GameOver);

    app.update(); // StateTransition fires; state becomes GameOver

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        *state.get(),
        GameState::GameOver,
        "state must be GameOver after explicit transition"
    );
}

/// `GameOver` is terminal — it persists across additional frames with no
/// further transition requests.
#[test]
fn game_over_persists_across_frames() {
    let mut app = app_with_default_state();
    app.update();

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::GameOver);
    app.update();

    // Run several more frames without another transition request.
    for _ in 0..5 {
        app.update();
    }

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        *state.get(),
        GameState::GameOver,
        "GameOver must remain stable without a new transition"
    );
}

/// Setting `GameOver` again while already ended is a no-op, mirroring the
/// overflow detector firing on several collision pairs in one batch.
#[test]
fn repeated_game_over_requests_are_idempotent() {
    let mut app = app_with_default_state();
    app.update();

    for _ in 0..3 {
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::GameOver);
        app.update();
    }

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(*state.get(), GameState::GameOver);
}
