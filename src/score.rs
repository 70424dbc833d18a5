//! Session score and the persisted top-5 ranking store.
//!
//! The session score is a monotonically non-decreasing counter owned by the
//! merge engine; it resets only on process restart. On game over the final
//! score is folded into a ranking list persisted as a JSON array of at most
//! five integers, descending, under a fixed path (`saves/rankings.json`) —
//! loaded lazily on each record, rewritten atomically (temp file + rename).
//!
//! A missing or corrupt ranking file degrades silently to an empty list;
//! write failures are logged and never fatal.

use crate::constants::LEADERBOARD_CAPACITY;
use crate::error::StoreResult;
use crate::menu::GameState;
use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the persisted ranking list inside the store directory.
const RANKING_FILE: &str = "rankings.json";

// ── Resources ─────────────────────────────────────────────────────────────────

/// Running score for the current session.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct SessionScore {
    pub points: u32,
}

/// In-memory copy of the persisted standings, refreshed on game over and
/// rendered by the game-over panel.
#[derive(Resource, Default, Debug, Clone)]
pub struct Leaderboard {
    /// Descending, at most [`LEADERBOARD_CAPACITY`] entries.
    pub standings: Vec<u32>,
}

impl Leaderboard {
    /// Score shown at `index` (0-based); absent slots read as 0.
    pub fn slot(&self, index: usize) -> u32 {
        self.standings.get(index).copied().unwrap_or(0)
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct ScorePlugin;

impl Plugin for ScorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionScore>()
            .init_resource::<Leaderboard>()
            .add_systems(OnEnter(GameState::GameOver), record_final_score_system);
    }
}

// ── Persistence ───────────────────────────────────────────────────────────────

fn store_dir() -> PathBuf {
    PathBuf::from("saves")
}

/// Fixed location of the persisted ranking list.
pub fn ranking_path() -> PathBuf {
    store_dir().join(RANKING_FILE)
}

/// Sort descending and cap at the leaderboard capacity.
fn sanitize(scores: &mut Vec<u32>) {
    scores.sort_unstable_by(|a, b| b.cmp(a));
    scores.truncate(LEADERBOARD_CAPACITY);
}

/// Load the persisted standings. A missing or unreadable file, or JSON that
/// does not decode as an integer array, yields an empty list.
pub fn load_rankings(path: &Path) -> Vec<u32> {
    let Ok(contents) = fs::read_to_string(path) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<u32>>(&contents) {
        Ok(mut scores) => {
            sanitize(&mut scores);
            scores
        }
        Err(err) => {
            warn!(
                "Ignoring malformed ranking file {}: {err}",
                path.display()
            );
            Vec::new()
        }
    }
}

/// Persist the standings as a JSON array, replacing the previous file.
///
/// Written to a sibling temp file first, then renamed over the target, so a
/// crash mid-write never leaves a truncated ranking file behind.
pub fn store_rankings(path: &Path, scores: &[u32]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let serialized = serde_json::to_string(scores)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serialized)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Fold a final score into the persisted standings: load, append, sort
/// descending, truncate to capacity, persist. Returns the new standings.
pub fn record_score(path: &Path, final_score: u32) -> StoreResult<Vec<u32>> {
    let mut standings = load_rankings(path);
    standings.push(final_score);
    sanitize(&mut standings);
    store_rankings(path, &standings)?;
    Ok(standings)
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// `OnEnter(GameOver)`: persist the session's final score and refresh the
/// in-memory standings for the game-over panel.
pub fn record_final_score_system(score: Res<SessionScore>, mut leaderboard: ResMut<Leaderboard>) {
    let path = ranking_path();
    match record_score(&path, score.points) {
        Ok(standings) => {
            info!(
                "Recorded final score {} to {}",
                score.points,
                path.display()
            );
            leaderboard.standings = standings;
        }
        Err(err) => {
            error!("Failed to persist rankings to {}: {err}", path.display());
        }
    }
}
