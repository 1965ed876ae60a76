//! AI player comparison: request/response types, prompt template and response parsing.
//!
//! The model is an external collaborator. We send it a fixed instruction
//! template and expect a single JSON object back; anything else is a failed
//! comparison. No retries.

mod client;

pub use client::ComparisonClient;

use serde::{Deserialize, Serialize};

/// Metric pre-filled in the comparison form.
pub const DEFAULT_METRIC: &str = "Overall performance in T20 format";
/// Message shown to the user for any failure that is not bad input.
pub const GENERIC_FAILURE: &str = "An error occurred while comparing players. Please try again.";

const MIN_CHARACTERISTICS_LEN: usize = 10;
const MIN_METRIC_LEN: usize = 3;

/// Free-text description of two players and what to compare them on.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparePlayersInput {
    pub player1_characteristics: String,
    pub player2_characteristics: String,
    #[serde(default = "default_metric")]
    pub comparison_metric: String,
}

fn default_metric() -> String {
    DEFAULT_METRIC.to_string()
}

/// Structured verdict returned by the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparePlayersOutput {
    pub comparison_summary: String,
    pub player1_score: f64,
    pub player2_score: f64,
    pub winning_player: String,
}

/// Errors from a comparison request.
#[derive(Debug)]
pub enum ComparisonError {
    /// Form input failed validation; message is user-facing.
    InvalidInput(String),
    /// Could not reach the model or the request timed out.
    Request(reqwest::Error),
    /// Model endpoint answered with a non-success status.
    Status(u16),
    /// Model answer did not contain the expected JSON object.
    MalformedResponse(String),
}

impl std::fmt::Display for ComparisonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonError::InvalidInput(msg) => write!(f, "{}", msg),
            ComparisonError::Request(e) => write!(f, "comparison request failed: {}", e),
            ComparisonError::Status(code) => write!(f, "comparison service returned HTTP {}", code),
            ComparisonError::MalformedResponse(why) => {
                write!(f, "comparison service returned an unusable answer: {}", why)
            }
        }
    }
}

impl std::error::Error for ComparisonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComparisonError::Request(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ComparisonError {
    fn from(e: reqwest::Error) -> Self {
        ComparisonError::Request(e)
    }
}

impl ComparisonError {
    /// Whether the caller sent bad input (as opposed to the service failing).
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ComparisonError::InvalidInput(_))
    }

    /// What the user gets to see.
    pub fn user_message(&self) -> String {
        match self {
            ComparisonError::InvalidInput(msg) => msg.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

impl ComparePlayersInput {
    /// Same rules as the comparison form.
    pub fn validate(&self) -> Result<(), ComparisonError> {
        if self.player1_characteristics.trim().chars().count() < MIN_CHARACTERISTICS_LEN {
            return Err(ComparisonError::InvalidInput(
                "Please provide more details for player 1.".to_string(),
            ));
        }
        if self.player2_characteristics.trim().chars().count() < MIN_CHARACTERISTICS_LEN {
            return Err(ComparisonError::InvalidInput(
                "Please provide more details for player 2.".to_string(),
            ));
        }
        if self.comparison_metric.trim().chars().count() < MIN_METRIC_LEN {
            return Err(ComparisonError::InvalidInput(
                "Please specify a comparison metric.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fill the analyst instruction template.
pub fn build_prompt(input: &ComparePlayersInput) -> String {
    format!(
        "You are an expert cricket analyst. Compare two players based on their characteristics and a given metric.\n\
         \n\
         Player 1 Characteristics: {}\n\
         Player 2 Characteristics: {}\n\
         Comparison Metric: {}\n\
         \n\
         Provide a detailed comparison summary highlighting the strengths and weaknesses of each player, \
         and tell me which player is better based on the comparison metric.\n\
         Also compute a numeric score for each player based on the metric provided, then specify which player is better.\n\
         \n\
         Respond with a single JSON object and nothing else, with exactly these fields: \
         {{\"comparisonSummary\": string, \"player1Score\": number, \"player2Score\": number, \"winningPlayer\": string}}",
        input.player1_characteristics.trim(),
        input.player2_characteristics.trim(),
        input.comparison_metric.trim(),
    )
}

/// Extract the first balanced `{...}` object from text that may have chatter
/// around it. Braces inside JSON strings are not counted.
pub fn extract_first_json_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in s[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..=start + i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse the model's answer into a comparison result.
pub fn parse_comparison(text: &str) -> Result<ComparePlayersOutput, ComparisonError> {
    let json = extract_first_json_object(text)
        .ok_or_else(|| ComparisonError::MalformedResponse("no JSON object found".to_string()))?;
    serde_json::from_str(json).map_err(|e| ComparisonError::MalformedResponse(e.to_string()))
}
