//! Ball events, teams, and the per-innings counters.

use serde::{Deserialize, Serialize};

/// Balls in an over (legal deliveries only).
pub const BALLS_PER_OVER: u32 = 6;
/// Wickets that end an innings.
pub const MAX_WICKETS: u32 = 10;
/// Runs that can be scored off a single legal delivery.
pub const RUN_VALUES: [u32; 6] = [0, 1, 2, 3, 4, 6];
/// Wides plus no-balls accepted in one innings. Legal deliveries are already
/// bounded by the overs limit.
pub const MAX_EXTRAS_PER_INNINGS: usize = 300;

/// One of the two sides in a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    One,
    Two,
}

/// A single delivery as recorded by the scorer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "runs", rename_all = "snake_case")]
pub enum BallEvent {
    /// Legal delivery scoring the given runs.
    Runs(u32),
    /// One run, no legal ball.
    Wide,
    /// One run, no legal ball.
    NoBall,
    /// Legal delivery, one wicket down.
    Wicket,
}

impl BallEvent {
    /// Runs added to the total by this event.
    pub fn runs(self) -> u32 {
        match self {
            BallEvent::Runs(n) => n,
            BallEvent::Wide | BallEvent::NoBall => 1,
            BallEvent::Wicket => 0,
        }
    }

    /// Whether the event counts towards the six balls of an over.
    pub fn is_legal(self) -> bool {
        matches!(self, BallEvent::Runs(_) | BallEvent::Wicket)
    }

    /// Short label used in the ball-by-ball strip ("4", "Wd", "Nb", "W").
    pub fn label(self) -> String {
        match self {
            BallEvent::Runs(n) => n.to_string(),
            BallEvent::Wide => "Wd".to_string(),
            BallEvent::NoBall => "Nb".to_string(),
            BallEvent::Wicket => "W".to_string(),
        }
    }
}

/// Counters and ball log of one innings.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct InningsState {
    pub batting_team: Team,
    pub runs_scored: u32,
    /// 0..=10.
    pub wickets_lost: u32,
    /// 0..=5; the sixth legal ball rolls over into `completed_overs`.
    pub legal_balls_in_over: u32,
    pub completed_overs: u32,
    /// Append-only except for undo popping the tail.
    pub events: Vec<BallEvent>,
    pub is_complete: bool,
}

impl InningsState {
    pub fn new(batting_team: Team) -> Self {
        Self {
            batting_team,
            ..Self::default()
        }
    }

    /// Apply an event to the counters and log it. Returns true if this event
    /// completed the innings. Callers check `is_complete` beforehand.
    pub fn apply(&mut self, event: BallEvent, overs_limit: u32) -> bool {
        self.runs_scored += event.runs();
        if event == BallEvent::Wicket {
            self.wickets_lost += 1;
        }
        if event.is_legal() {
            self.consume_ball();
        }
        self.events.push(event);
        if self.wickets_lost >= MAX_WICKETS || self.completed_overs >= overs_limit {
            self.is_complete = true;
        }
        self.is_complete
    }

    /// Wides and no-balls bowled so far.
    pub fn extras(&self) -> usize {
        self.events.iter().filter(|e| !e.is_legal()).count()
    }

    /// Pop the most recent event and reverse its effect. Re-opens the innings.
    pub fn pop_event(&mut self) -> Option<BallEvent> {
        let event = self.events.pop()?;
        self.runs_scored -= event.runs();
        if event == BallEvent::Wicket {
            self.wickets_lost -= 1;
        }
        if event.is_legal() {
            self.unconsume_ball();
        }
        self.is_complete = false;
        Some(event)
    }

    fn consume_ball(&mut self) {
        self.legal_balls_in_over += 1;
        if self.legal_balls_in_over == BALLS_PER_OVER {
            self.legal_balls_in_over = 0;
            self.completed_overs += 1;
        }
    }

    fn unconsume_ball(&mut self) {
        if self.legal_balls_in_over == 0 {
            if self.completed_overs > 0 {
                self.completed_overs -= 1;
                self.legal_balls_in_over = BALLS_PER_OVER - 1;
            }
        } else {
            self.legal_balls_in_over -= 1;
        }
    }

    /// Overs bowled in cricket notation, e.g. "3.4".
    pub fn overs_display(&self) -> String {
        format!("{}.{}", self.completed_overs, self.legal_balls_in_over)
    }

    /// Score in cricket notation, e.g. "142/6".
    pub fn score_display(&self) -> String {
        format!("{}/{}", self.runs_scored, self.wickets_lost)
    }
}
