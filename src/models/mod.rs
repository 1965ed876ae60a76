//! Data structures: players and roster, innings and match state.

mod innings;
mod match_state;
mod player;
mod roster;

pub use innings::{
    BallEvent, InningsState, Team, BALLS_PER_OVER, MAX_EXTRAS_PER_INNINGS, MAX_WICKETS, RUN_VALUES,
};
pub use match_state::{
    InningsSummary, MatchError, MatchId, MatchResult, MatchState, MatchStatus, DEFAULT_OVERS_LIMIT,
};
pub use player::{NewPlayer, Player, PlayerId, RankedPlayer, StatsUpdate};
pub use roster::{Roster, RosterError, RosterId, MIN_NAME_LEN};
