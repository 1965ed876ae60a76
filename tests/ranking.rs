//! Integration tests for rankings: score formula, stable ordering, sorting and CSV export.

use cricket_dashboard_web::{
    player_score, rank_players, rankings_csv, sort_rankings, top_players, Player, SortDirection,
    SortKey, TOP_PERFORMERS,
};

fn player(name: &str, runs: u32, wickets: u32) -> Player {
    Player::new(name, 10, runs, wickets, "")
}

#[test]
fn score_is_runs_plus_twenty_per_wicket() {
    assert_eq!(player_score(&player("A", 0, 0)), 0);
    assert_eq!(player_score(&player("B", 50, 2)), 90);
    assert_eq!(player_score(&player("C", 13027, 4)), 13107);
    assert_eq!(player_score(&player("D", u32::MAX, u32::MAX)), 21 * u64::from(u32::MAX));
}

#[test]
fn empty_roster_ranks_to_empty() {
    assert!(rank_players(&[]).is_empty());
}

#[test]
fn equal_scores_keep_roster_order_with_consecutive_ranks() {
    let players = vec![player("Bowler", 50, 2), player("Batter", 90, 0)];
    let ranked = rank_players(&players);
    let scores: Vec<u64> = ranked.iter().map(|r| r.score).collect();
    let names: Vec<&str> = ranked.iter().map(|r| r.player.name.as_str()).collect();
    let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
    assert_eq!(scores, vec![90, 90]);
    assert_eq!(names, vec!["Bowler", "Batter"]);
    assert_eq!(ranks, vec![1, 2]);
}

#[test]
fn ranks_are_a_permutation_sorted_by_score() {
    let players = vec![
        player("A", 10, 0),
        player("B", 300, 1),
        player("C", 0, 5),
        player("D", 100, 0),
        player("E", 10, 0),
        player("F", 45, 3),
    ];
    let ranked = rank_players(&players);
    let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, (1..=players.len()).collect::<Vec<_>>());
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    let names: Vec<&str> = ranked.iter().map(|r| r.player.name.as_str()).collect();
    // B=320, F=105, C=100, D=100, A=10, E=10
    assert_eq!(names, vec!["B", "F", "C", "D", "A", "E"]);
}

#[test]
fn top_players_is_a_prefix() {
    let players: Vec<Player> = (0..8).map(|i| player(&format!("P{i}"), i * 10, 0)).collect();
    let ranked = rank_players(&players);
    let top = top_players(&ranked, TOP_PERFORMERS);
    assert_eq!(top.len(), 5);
    assert_eq!(top[..], ranked[..5]);
    assert_eq!(top_players(&ranked[..2], TOP_PERFORMERS).len(), 2);
}

#[test]
fn sort_rankings_by_column_and_direction() {
    let players = vec![player("A", 10, 3), player("B", 200, 0), player("C", 50, 1)];
    let mut ranked = rank_players(&players);

    sort_rankings(&mut ranked, SortKey::Wickets, SortDirection::Descending);
    let names: Vec<&str> = ranked.iter().map(|r| r.player.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C", "B"]);

    sort_rankings(&mut ranked, SortKey::Runs, SortDirection::Ascending);
    let names: Vec<&str> = ranked.iter().map(|r| r.player.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C", "B"]);

    sort_rankings(&mut ranked, SortKey::Rank, SortDirection::Ascending);
    let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn header_click_toggles_direction() {
    assert_eq!(SortDirection::toggle(None, SortKey::Runs), SortDirection::Ascending);
    assert_eq!(
        SortDirection::toggle(Some((SortKey::Runs, SortDirection::Ascending)), SortKey::Runs),
        SortDirection::Descending
    );
    assert_eq!(
        SortDirection::toggle(Some((SortKey::Runs, SortDirection::Descending)), SortKey::Runs),
        SortDirection::Ascending
    );
    assert_eq!(
        SortDirection::toggle(Some((SortKey::Runs, SortDirection::Ascending)), SortKey::Score),
        SortDirection::Ascending
    );
}

#[test]
fn csv_export_has_header_and_rows_in_rank_order() {
    let players = vec![player("Low", 5, 0), player("High, Jr.", 100, 1)];
    let csv = rankings_csv(&rank_players(&players)).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "rank,name,matches,runs,wickets,score");
    assert_eq!(lines[1], "1,\"High, Jr.\",10,100,1,120");
    assert_eq!(lines[2], "2,Low,10,5,0,5");
    assert_eq!(lines.len(), 3);
}
