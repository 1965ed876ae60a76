//! Ball-by-ball scoring: record deliveries, end innings, undo and reset.
//!
//! Every operation is total. Calls that make no sense in the current state
//! (scoring after the match is over, an 11th wicket, 5 runs off a ball) return
//! [`Transition::Ignored`] and leave the state untouched.

use crate::models::{
    BallEvent, InningsState, InningsSummary, MatchResult, MatchState, MatchStatus, Team,
    MAX_EXTRAS_PER_INNINGS, MAX_WICKETS, RUN_VALUES,
};
use serde::Serialize;

/// What an operation did to the match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// No-op: the state is unchanged.
    Ignored,
    /// Ball recorded, innings continues.
    Recorded,
    /// Ball recorded and it ended the first innings; the chase begins.
    InningsComplete(InningsSummary),
    /// Ball recorded and it ended the match.
    MatchComplete(MatchResult),
    /// The most recent ball was removed.
    Undone { event: BallEvent },
    /// Back to the first ball of the first innings.
    Reset,
}

/// Legal delivery scoring `runs` (one of 0, 1, 2, 3, 4, 6).
pub fn record_runs(state: &mut MatchState, runs: u32) -> Transition {
    if !RUN_VALUES.contains(&runs) {
        log::debug!("ignoring invalid run value {}", runs);
        return Transition::Ignored;
    }
    record(state, BallEvent::Runs(runs))
}

pub fn record_wide(state: &mut MatchState) -> Transition {
    record_extra(state, BallEvent::Wide)
}

pub fn record_no_ball(state: &mut MatchState) -> Transition {
    record_extra(state, BallEvent::NoBall)
}

/// Extras never use up a ball, so they are capped per innings to keep the
/// ball log bounded.
fn record_extra(state: &mut MatchState, event: BallEvent) -> Transition {
    if state.current_innings().extras() >= MAX_EXTRAS_PER_INNINGS {
        log::debug!("match {}: extras limit reached, ignoring {:?}", state.id, event);
        return Transition::Ignored;
    }
    record(state, event)
}

pub fn record_wicket(state: &mut MatchState) -> Transition {
    if state.current_innings().wickets_lost >= MAX_WICKETS {
        return Transition::Ignored;
    }
    record(state, BallEvent::Wicket)
}

fn record(state: &mut MatchState, event: BallEvent) -> Transition {
    if state.status == MatchStatus::Completed {
        log::debug!("match {} is over, ignoring {:?}", state.id, event);
        return Transition::Ignored;
    }
    let overs_limit = state.overs_limit;
    let innings_over = state.current_innings_mut().apply(event, overs_limit);
    if !innings_over {
        return Transition::Recorded;
    }
    match state.status {
        MatchStatus::FirstInnings => Transition::InningsComplete(finish_first_innings(state)),
        MatchStatus::SecondInnings => Transition::MatchComplete(finish_match(state)),
        MatchStatus::Completed => Transition::Recorded,
    }
}

fn finish_first_innings(state: &mut MatchState) -> InningsSummary {
    let innings = &state.first_innings;
    let target = innings.runs_scored + 1;
    let message = target_message(state, target);
    let summary = InningsSummary {
        batting_team: innings.batting_team,
        runs: innings.runs_scored,
        wickets: innings.wickets_lost,
        overs: innings.overs_display(),
        target,
        message: message.clone(),
    };
    state.target = Some(target);
    state.status = MatchStatus::SecondInnings;
    state.notice = Some(message);
    log::info!("match {}: {}", state.id, summary.message);
    summary
}

fn target_message(state: &MatchState, target: u32) -> String {
    format!(
        "{} has finished their innings. Target for {} is {}.",
        state.team_1_name, state.team_2_name, target
    )
}

/// Decide the winner once the second innings is over. Level scores go to the
/// side that batted first.
fn finish_match(state: &mut MatchState) -> MatchResult {
    let first_runs = state.first_innings.runs_scored;
    let target = state.target().unwrap_or(first_runs + 1);
    let second_runs = state.second_innings.runs_scored;
    let winner = if second_runs > target - 1 {
        state.second_innings.batting_team
    } else {
        state.first_innings.batting_team
    };
    let winner_name = state.team_name(winner).to_string();
    let result = MatchResult {
        winner,
        winner_name: winner_name.clone(),
        first_innings_runs: first_runs,
        second_innings_runs: second_runs,
        target,
        message: format!("Match over! {} wins.", winner_name),
    };
    state.status = MatchStatus::Completed;
    state.notice = Some(result.message.clone());
    state.result = Some(result.clone());
    log::info!("match {}: {}", state.id, result.message);
    result
}

/// Remove the most recent ball and reverse it.
///
/// When the chase has not started yet, the ball that ended the first innings
/// is undone and the first innings re-opens. Undoing the last ball of the match
/// clears the result.
pub fn undo(state: &mut MatchState) -> Transition {
    let popped = match state.status {
        MatchStatus::FirstInnings => state.first_innings.pop_event(),
        MatchStatus::SecondInnings if state.second_innings.events.is_empty() => {
            let popped = state.first_innings.pop_event();
            if popped.is_some() {
                state.status = MatchStatus::FirstInnings;
                state.target = None;
                state.notice = None;
            }
            popped
        }
        MatchStatus::SecondInnings => state.second_innings.pop_event(),
        MatchStatus::Completed => {
            let popped = state.second_innings.pop_event();
            if popped.is_some() {
                state.status = MatchStatus::SecondInnings;
                state.result = None;
                state.notice = state.target().map(|t| target_message(state, t));
            }
            popped
        }
    };
    match popped {
        Some(event) => Transition::Undone { event },
        None => Transition::Ignored,
    }
}

/// Clear both innings. Team names and overs limit are kept.
pub fn reset(state: &mut MatchState) -> Transition {
    state.first_innings = InningsState::new(Team::One);
    state.second_innings = InningsState::new(Team::Two);
    state.status = MatchStatus::FirstInnings;
    state.target = None;
    state.result = None;
    state.notice = None;
    state.started_at = chrono::Utc::now();
    Transition::Reset
}
