//! Integration tests for the player comparison collaborator: validation, prompt and parsing.

use cricket_dashboard_web::compare::{
    build_prompt, extract_first_json_object, parse_comparison, DEFAULT_METRIC, GENERIC_FAILURE,
};
use cricket_dashboard_web::{ComparePlayersInput, ComparisonClient, ComparisonError};
use std::time::Duration;

fn input(p1: &str, p2: &str, metric: &str) -> ComparePlayersInput {
    ComparePlayersInput {
        player1_characteristics: p1.to_string(),
        player2_characteristics: p2.to_string(),
        comparison_metric: metric.to_string(),
    }
}

fn valid_input() -> ComparePlayersInput {
    input(
        "Aggressive opener, strike rate 140, weak against spin",
        "Anchor batter, average 55, rotates strike well",
        "Strike rate",
    )
}

#[test]
fn input_uses_camel_case_and_default_metric() {
    let parsed: ComparePlayersInput = serde_json::from_str(
        r#"{"player1Characteristics":"left-arm quick bowler","player2Characteristics":"right-arm leg spinner"}"#,
    )
    .unwrap();
    assert_eq!(parsed.comparison_metric, DEFAULT_METRIC);
    assert_eq!(parsed.player1_characteristics, "left-arm quick bowler");
}

#[test]
fn validation_follows_form_rules() {
    assert!(valid_input().validate().is_ok());

    let err = input("short", "Anchor batter, average 55", "Strike rate").validate().unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(err.user_message(), "Please provide more details for player 1.");

    let err = input("Anchor batter, average 55", "   tiny    ", "Strike rate").validate().unwrap_err();
    assert_eq!(err.user_message(), "Please provide more details for player 2.");

    let err = input("Anchor batter, average 55", "Anchor batter, average 55", "ab").validate().unwrap_err();
    assert_eq!(err.user_message(), "Please specify a comparison metric.");
}

#[test]
fn prompt_contains_fields_and_schema() {
    let prompt = build_prompt(&valid_input());
    assert!(prompt.starts_with("You are an expert cricket analyst."));
    assert!(prompt.contains("Player 1 Characteristics: Aggressive opener, strike rate 140, weak against spin\n"));
    assert!(prompt.contains("Player 2 Characteristics: Anchor batter, average 55, rotates strike well\n"));
    assert!(prompt.contains("Comparison Metric: Strike rate\n"));
    assert!(prompt.contains("\"winningPlayer\": string"));
}

#[test]
fn extracts_json_from_chatter() {
    assert_eq!(extract_first_json_object("Sure! {\"a\":1} hope it helps"), Some("{\"a\":1}"));
    assert_eq!(extract_first_json_object("no json here"), None);
    assert_eq!(extract_first_json_object("} backwards {"), None);
}

#[test]
fn extraction_stops_at_the_matching_brace() {
    assert_eq!(
        extract_first_json_object("{\"a\":{\"b\":1}} and a stray } after"),
        Some("{\"a\":{\"b\":1}}")
    );
    assert_eq!(
        extract_first_json_object(r#"{"s":"close } and \" quote {"} trailing {x}"#),
        Some(r#"{"s":"close } and \" quote {"}"#)
    );
    assert_eq!(extract_first_json_object("{\"a\":1"), None);
}

#[test]
fn parses_answer_followed_by_chatter_with_braces() {
    let text = r#"{"comparisonSummary":"Even.","player1Score":5,"player2Score":5,"winningPlayer":"Player 2"}
Note: scores use the {0-10} scale."#;
    let out = parse_comparison(text).unwrap();
    assert_eq!(out.winning_player, "Player 2");
}

#[test]
fn parses_model_answer() {
    let text = r#"Here you go:
{"comparisonSummary":"Player 1 scores faster.","player1Score":8.5,"player2Score":7,"winningPlayer":"Player 1"}"#;
    let out = parse_comparison(text).unwrap();
    assert_eq!(out.comparison_summary, "Player 1 scores faster.");
    assert_eq!(out.player1_score, 8.5);
    assert_eq!(out.player2_score, 7.0);
    assert_eq!(out.winning_player, "Player 1");
}

#[test]
fn incomplete_answer_is_malformed_with_generic_message() {
    let err = parse_comparison(r#"{"comparisonSummary":"meh"}"#).unwrap_err();
    assert!(matches!(err, ComparisonError::MalformedResponse(_)));
    assert!(!err.is_invalid_input());
    assert_eq!(err.user_message(), GENERIC_FAILURE);

    let err = parse_comparison("I cannot compare these players.").unwrap_err();
    assert!(matches!(err, ComparisonError::MalformedResponse(_)));
}

#[tokio::test]
async fn invalid_input_never_reaches_the_network() {
    let client = ComparisonClient::new("http://127.0.0.1:1", "test-model", Duration::from_secs(2)).unwrap();
    let err = client.compare(&input("short", "short", "x")).await.unwrap_err();
    assert!(err.is_invalid_input());
}

#[tokio::test]
async fn unreachable_service_is_a_request_failure() {
    let client = ComparisonClient::new("127.0.0.1:1", "test-model", Duration::from_secs(2)).unwrap();
    let err = client.compare(&valid_input()).await.unwrap_err();
    assert!(matches!(err, ComparisonError::Request(_)));
    assert_eq!(err.user_message(), GENERIC_FAILURE);
}
