//! MatchState: two innings, team names, overs limit, target and result.

use crate::models::innings::{InningsState, Team};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overs per innings when none is given.
pub const DEFAULT_OVERS_LIMIT: u32 = 20;

/// Errors that can occur when configuring a match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchError {
    /// Overs limit must be at least one.
    InvalidOversLimit,
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::InvalidOversLimit => write!(f, "Overs limit must be at least 1"),
        }
    }
}

impl std::error::Error for MatchError {}

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Current phase of the match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Team one batting.
    #[default]
    FirstInnings,
    /// Team two chasing the target.
    SecondInnings,
    /// Both innings complete; see `result`.
    Completed,
}

/// Emitted when the first innings ends.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct InningsSummary {
    pub batting_team: Team,
    pub runs: u32,
    pub wickets: u32,
    pub overs: String,
    pub target: u32,
    pub message: String,
}

/// Emitted when the second innings ends.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Team,
    pub winner_name: String,
    pub first_innings_runs: u32,
    pub second_innings_runs: u32,
    pub target: u32,
    pub message: String,
}

/// Full scorer state for one match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchState {
    pub id: MatchId,
    pub team_1_name: String,
    pub team_2_name: String,
    /// Fixed for the match.
    pub overs_limit: u32,
    pub status: MatchStatus,
    /// Team one's innings.
    pub first_innings: InningsState,
    /// Team two's innings. Untouched until the first innings completes.
    pub second_innings: InningsState,
    /// First innings total + 1, once the first innings is over.
    pub target: Option<u32>,
    pub result: Option<MatchResult>,
    /// Latest innings-end message for display.
    pub notice: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::fresh(DEFAULT_OVERS_LIMIT)
    }
}

impl MatchState {
    /// Create a match with the given overs per innings.
    pub fn new(overs_limit: u32) -> Result<Self, MatchError> {
        if overs_limit == 0 {
            return Err(MatchError::InvalidOversLimit);
        }
        Ok(Self::fresh(overs_limit))
    }

    fn fresh(overs_limit: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_1_name: "Team A".to_string(),
            team_2_name: "Team B".to_string(),
            overs_limit,
            status: MatchStatus::FirstInnings,
            first_innings: InningsState::new(Team::One),
            second_innings: InningsState::new(Team::Two),
            target: None,
            result: None,
            notice: None,
            started_at: Utc::now(),
        }
    }

    /// Rename the teams. Names are free text and do not affect scoring.
    pub fn set_team_names(&mut self, team_1: impl Into<String>, team_2: impl Into<String>) {
        self.team_1_name = team_1.into().trim().to_string();
        self.team_2_name = team_2.into().trim().to_string();
    }

    pub fn team_name(&self, team: Team) -> &str {
        match team {
            Team::One => &self.team_1_name,
            Team::Two => &self.team_2_name,
        }
    }

    /// The innings currently batting (the second innings once the match is over).
    pub fn current_innings(&self) -> &InningsState {
        match self.status {
            MatchStatus::FirstInnings => &self.first_innings,
            MatchStatus::SecondInnings | MatchStatus::Completed => &self.second_innings,
        }
    }

    pub fn current_innings_mut(&mut self) -> &mut InningsState {
        match self.status {
            MatchStatus::FirstInnings => &mut self.first_innings,
            MatchStatus::SecondInnings | MatchStatus::Completed => &mut self.second_innings,
        }
    }

    pub fn batting_team(&self) -> Team {
        self.current_innings().batting_team
    }

    pub fn overs_display(&self) -> String {
        self.current_innings().overs_display()
    }

    /// Runs the chasing side needs, once the first innings is over.
    pub fn target(&self) -> Option<u32> {
        self.target
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Runs still needed by the chasing side, while the chase is on.
    pub fn runs_required(&self) -> Option<u32> {
        if self.status != MatchStatus::SecondInnings {
            return None;
        }
        self.target()
            .map(|t| t.saturating_sub(self.second_innings.runs_scored))
    }
}
