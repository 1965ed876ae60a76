//! Business logic: player rankings and ball-by-ball match scoring.

mod ranking;
mod scoring;

pub use ranking::{
    player_score, rank_players, rankings_csv, sort_rankings, top_players, SortDirection, SortKey,
    TOP_PERFORMERS, WICKET_WEIGHT,
};
pub use scoring::{
    record_no_ball, record_runs, record_wicket, record_wide, reset, undo, Transition,
};
