//! Roster: the ordered, in-memory list of players behind the dashboard.

use crate::logic::{rank_players, top_players, TOP_PERFORMERS};
use crate::models::player::{NewPlayer, Player, PlayerId, RankedPlayer, StatsUpdate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shortest accepted player name (after trimming).
pub const MIN_NAME_LEN: usize = 2;

/// Errors that can occur while editing the roster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RosterError {
    /// Name is shorter than [`MIN_NAME_LEN`] characters.
    NameTooShort,
    /// No player with this id on the roster.
    PlayerNotFound(PlayerId),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::NameTooShort => {
                write!(f, "Name must be at least {} characters", MIN_NAME_LEN)
            }
            RosterError::PlayerNotFound(_) => write!(f, "Player not found"),
        }
    }
}

impl std::error::Error for RosterError {}

/// Unique identifier for a roster.
pub type RosterId = Uuid;

/// Ordered player list. Players are appended and edited in place, never removed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Roster {
    pub id: RosterId,
    pub players: Vec<Player>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            players: Vec::new(),
        }
    }

    /// Create a roster seeded with the two sample players the dashboard starts with.
    pub fn with_sample_players() -> Self {
        let mut roster = Self::new();
        roster.players = vec![
            Player::new("Virat Kohli", 237, 13027, 4, avatar_url(1)),
            Player::new("Rohit Sharma", 243, 9825, 8, avatar_url(2)),
        ];
        roster
    }

    /// Append a player. The id is generated and the avatar is a numbered placeholder.
    pub fn add_player(&mut self, new_player: NewPlayer) -> Result<&Player, RosterError> {
        let name = new_player.name.trim();
        if name.chars().count() < MIN_NAME_LEN {
            return Err(RosterError::NameTooShort);
        }
        let avatar = avatar_url(self.players.len() + 1);
        self.players.push(Player::new(
            name,
            new_player.matches,
            new_player.runs,
            new_player.wickets,
            avatar,
        ));
        let idx = self.players.len() - 1;
        Ok(&self.players[idx])
    }

    /// Replace runs/wickets of an existing player.
    pub fn edit_stats(&mut self, id: PlayerId, update: StatsUpdate) -> Result<&Player, RosterError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RosterError::PlayerNotFound(id))?;
        player.apply_stats(update);
        Ok(player)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Current rankings (recomputed on every call).
    pub fn ranked(&self) -> Vec<RankedPlayer> {
        rank_players(&self.players)
    }

    /// Top performers shown in the chart.
    pub fn top_performers(&self) -> Vec<RankedPlayer> {
        top_players(&self.ranked(), TOP_PERFORMERS)
    }
}

/// Placeholder avatar for the n-th player (1-based).
fn avatar_url(n: usize) -> String {
    format!("https://picsum.photos/seed/p{}/100/100", n)
}
