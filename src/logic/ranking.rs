//! Rankings: weighted score, stable ordering, table sorting and CSV export.

use crate::models::{Player, RankedPlayer};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Run-equivalents credited per wicket.
pub const WICKET_WEIGHT: u64 = 20;
/// Size of the top-performers projection.
pub const TOP_PERFORMERS: usize = 5;

/// 1 point per run, 20 per wicket.
pub fn player_score(player: &Player) -> u64 {
    u64::from(player.runs) + WICKET_WEIGHT * u64::from(player.wickets)
}

/// Score and rank players, highest score first.
///
/// The sort is stable, so equal scores keep their roster order and still get
/// consecutive ranks (1, 2, ...), never a shared one.
pub fn rank_players(players: &[Player]) -> Vec<RankedPlayer> {
    let mut scored: Vec<(Player, u64)> = players
        .iter()
        .map(|p| (p.clone(), player_score(p)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .enumerate()
        .map(|(i, (player, score))| RankedPlayer {
            player,
            score,
            rank: i + 1,
        })
        .collect()
}

/// The first `n` of an already ranked list.
pub fn top_players(ranked: &[RankedPlayer], n: usize) -> Vec<RankedPlayer> {
    ranked.iter().take(n).cloned().collect()
}

/// Column the rankings table is sorted by.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Rank,
    Score,
    Runs,
    Wickets,
    Matches,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Clicking the same column header flips ascending to descending; anything else starts ascending.
    pub fn toggle(current: Option<(SortKey, SortDirection)>, key: SortKey) -> SortDirection {
        match current {
            Some((k, SortDirection::Ascending)) if k == key => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

/// Re-order a ranked list for display. Ranks are not recomputed.
pub fn sort_rankings(ranked: &mut [RankedPlayer], key: SortKey, direction: SortDirection) {
    ranked.sort_by(|a, b| {
        let ord = compare_by(a, b, key);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

fn compare_by(a: &RankedPlayer, b: &RankedPlayer, key: SortKey) -> Ordering {
    match key {
        SortKey::Rank => a.rank.cmp(&b.rank),
        SortKey::Score => a.score.cmp(&b.score),
        SortKey::Runs => a.player.runs.cmp(&b.player.runs),
        SortKey::Wickets => a.player.wickets.cmp(&b.player.wickets),
        SortKey::Matches => a.player.matches.cmp(&b.player.matches),
    }
}

/// Rankings as CSV (header + one row per player), used by the share/export action.
pub fn rankings_csv(ranked: &[RankedPlayer]) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["rank", "name", "matches", "runs", "wickets", "score"])?;
    for r in ranked {
        wtr.write_record([
            r.rank.to_string(),
            r.player.name.clone(),
            r.player.matches.to_string(),
            r.player.runs.to_string(),
            r.player.wickets.to_string(),
            r.score.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
