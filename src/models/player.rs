//! Player, RankedPlayer and the request payloads that create or edit players.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (stable for the lifetime of the roster).
pub type PlayerId = Uuid;

/// A cricketer on the roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub matches: u32,
    pub runs: u32,
    pub wickets: u32,
    /// Placeholder image URL. Not used for scoring.
    pub avatar: String,
}

impl Player {
    /// Create a player with a fresh id.
    pub fn new(name: impl Into<String>, matches: u32, runs: u32, wickets: u32, avatar: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            matches,
            runs,
            wickets,
            avatar: avatar.into(),
        }
    }

    /// Replace runs and wickets (the only editable stats).
    pub fn apply_stats(&mut self, update: StatsUpdate) {
        self.runs = update.runs;
        self.wickets = update.wickets;
    }
}

/// Fields supplied by the "Add player" form; id and avatar are generated.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    #[serde(default)]
    pub matches: u32,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub wickets: u32,
}

/// Fields supplied by the "Edit player" form.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatsUpdate {
    pub runs: u32,
    pub wickets: u32,
}

/// Read-only ranking view: player plus derived score and 1-based rank.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RankedPlayer {
    #[serde(flatten)]
    pub player: Player,
    pub score: u64,
    pub rank: usize,
}
