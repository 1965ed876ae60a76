//! Cricket dashboard web app: library with models and business logic.

pub mod api;
pub mod compare;
pub mod config;
pub mod logic;
pub mod models;
pub mod sessions;

pub use compare::{ComparePlayersInput, ComparePlayersOutput, ComparisonClient, ComparisonError};
pub use config::ServerConfig;
pub use logic::{
    player_score, rank_players, rankings_csv, record_no_ball, record_runs, record_wicket,
    record_wide, reset, sort_rankings, top_players, undo, SortDirection, SortKey, Transition,
    TOP_PERFORMERS,
};
pub use models::{
    BallEvent, InningsState, InningsSummary, MatchError, MatchId, MatchResult, MatchState,
    MatchStatus, NewPlayer, Player, PlayerId, RankedPlayer, Roster, RosterError, RosterId,
    StatsUpdate, Team,
};
pub use sessions::{SessionError, SessionStore};
