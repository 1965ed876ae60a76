//! JSON REST API and the embedded page, registered on an actix `App` by [`configure`].
//!
//! Rosters and matches live in [`SessionStore`]s inside [`AppState`]; every
//! handler answers JSON, with `{ "error": ... }` bodies on failure.

use crate::{
    record_no_ball, record_runs, record_wicket, record_wide, rankings_csv, reset, sort_rankings,
    undo, ComparePlayersInput, ComparisonClient, MatchId, MatchState, NewPlayer, Player, PlayerId,
    RankedPlayer, Roster, RosterId, SessionError, SessionStore, SortDirection, SortKey,
    StatsUpdate, Transition,
};
use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path, Query},
    HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};

/// Shared server state: isolated rosters and matches by id, plus the comparison client.
pub struct AppState {
    pub rosters: SessionStore<Roster>,
    pub matches: SessionStore<MatchState>,
    pub comparer: ComparisonClient,
}

impl AppState {
    pub fn new(comparer: ComparisonClient) -> Self {
        Self {
            rosters: SessionStore::new(),
            matches: SessionStore::new(),
            comparer,
        }
    }
}

type State = Data<AppState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateRosterBody {
    #[serde(default = "default_sample")]
    sample: bool,
}

fn default_sample() -> bool {
    true
}

#[derive(Deserialize)]
struct CreateMatchBody {
    #[serde(default = "default_overs_limit")]
    overs_limit: u32,
    team_1_name: Option<String>,
    team_2_name: Option<String>,
}

fn default_overs_limit() -> u32 {
    crate::models::DEFAULT_OVERS_LIMIT
}

#[derive(Deserialize)]
struct TeamNamesBody {
    team_1_name: String,
    team_2_name: String,
}

#[derive(Deserialize)]
struct RunsBody {
    runs: u32,
}

/// `sort` is the clicked column. Without an explicit `dir`, the direction
/// toggles against the ordering currently shown (`prev_sort`, `prev_dir`).
#[derive(Deserialize)]
struct RankingsQuery {
    sort: Option<SortKey>,
    dir: Option<SortDirection>,
    prev_sort: Option<SortKey>,
    prev_dir: Option<SortDirection>,
}

impl RankingsQuery {
    fn ordering(&self) -> (SortKey, SortDirection) {
        let key = self.sort.unwrap_or_default();
        let dir = self
            .dir
            .unwrap_or_else(|| SortDirection::toggle(self.prev_sort.zip(self.prev_dir), key));
        (key, dir)
    }
}

/// Re-sorted rankings plus the ordering applied, so the page can send it back.
#[derive(Serialize)]
struct RankingsView {
    sort: SortKey,
    dir: SortDirection,
    rankings: Vec<RankedPlayer>,
}

/// Path segment: roster id (e.g. /api/rosters/{id})
#[derive(Deserialize)]
struct RosterPath {
    id: RosterId,
}

/// Path segments: roster id and player id (e.g. /api/rosters/{id}/players/{player_id})
#[derive(Deserialize)]
struct RosterPlayerPath {
    id: RosterId,
    player_id: PlayerId,
}

/// Path segment: match id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Roster plus its derived rankings, as the dashboard renders it.
#[derive(Serialize)]
struct RosterView<'a> {
    id: RosterId,
    players: &'a [Player],
    rankings: Vec<RankedPlayer>,
    top_performers: Vec<RankedPlayer>,
}

impl<'a> RosterView<'a> {
    fn of(roster: &'a Roster) -> Self {
        Self {
            id: roster.id,
            players: &roster.players,
            rankings: roster.ranked(),
            top_performers: roster.top_performers(),
        }
    }
}

/// Match plus the readouts the scorer page shows.
#[derive(Serialize)]
struct MatchView<'a> {
    #[serde(flatten)]
    state: &'a MatchState,
    batting_team_name: &'a str,
    score: String,
    overs: String,
    runs_required: Option<u32>,
    balls: Vec<String>,
}

impl<'a> MatchView<'a> {
    fn of(m: &'a MatchState) -> Self {
        let innings = m.current_innings();
        Self {
            state: m,
            batting_team_name: m.team_name(innings.batting_team),
            score: innings.score_display(),
            overs: innings.overs_display(),
            runs_required: m.runs_required(),
            balls: innings.events.iter().map(|e| e.label()).collect(),
        }
    }
}

#[derive(Serialize)]
struct MatchResponse<'a> {
    #[serde(rename = "match")]
    state: MatchView<'a>,
    transition: Transition,
}

fn session_error(e: SessionError, what: &str) -> HttpResponse {
    match e {
        SessionError::NotFound => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": format!("No {}", what) }))
        }
        SessionError::LockPoisoned => HttpResponse::InternalServerError().body("lock error"),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "cricket-dashboard-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a roster (seeded with the sample players unless `sample` is false).
#[post("/api/rosters")]
async fn api_create_roster(state: State, body: Option<Json<CreateRosterBody>>) -> HttpResponse {
    let sample = body.as_ref().map(|b| b.sample).unwrap_or_else(default_sample);
    let roster = if sample {
        Roster::with_sample_players()
    } else {
        Roster::new()
    };
    let id = roster.id;
    if let Err(e) = state.rosters.insert(id, roster) {
        return session_error(e, "roster");
    }
    match state.rosters.with_mut(id, |r| HttpResponse::Ok().json(RosterView::of(r))) {
        Ok(resp) => resp,
        Err(e) => session_error(e, "roster"),
    }
}

/// Get a roster with rankings and top performers.
#[get("/api/rosters/{id}")]
async fn api_get_roster(state: State, path: Path<RosterPath>) -> HttpResponse {
    match state.rosters.with_mut(path.id, |r| HttpResponse::Ok().json(RosterView::of(r))) {
        Ok(resp) => resp,
        Err(e) => session_error(e, "roster"),
    }
}

/// Add a player; rankings are recomputed in the response.
#[post("/api/rosters/{id}/players")]
async fn api_add_player(state: State, path: Path<RosterPath>, body: Json<NewPlayer>) -> HttpResponse {
    let result = state.rosters.with_mut(path.id, |r| {
        match r.add_player(body.into_inner()).map(|_| ()) {
            Ok(()) => HttpResponse::Ok().json(RosterView::of(r)),
            Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
        }
    });
    result.unwrap_or_else(|e| session_error(e, "roster"))
}

/// Replace a player's runs and wickets.
#[put("/api/rosters/{id}/players/{player_id}/stats")]
async fn api_edit_player_stats(
    state: State,
    path: Path<RosterPlayerPath>,
    body: Json<StatsUpdate>,
) -> HttpResponse {
    let update = body.into_inner();
    let player_id = path.player_id;
    let result = state.rosters.with_mut(path.id, |r| {
        match r.edit_stats(player_id, update).map(|_| ()) {
            Ok(()) => HttpResponse::Ok().json(RosterView::of(r)),
            Err(e) => HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() })),
        }
    });
    result.unwrap_or_else(|e| session_error(e, "roster"))
}

/// Rankings table, optionally re-sorted by a column.
#[get("/api/rosters/{id}/rankings")]
async fn api_rankings(state: State, path: Path<RosterPath>, query: Query<RankingsQuery>) -> HttpResponse {
    let (sort, dir) = query.ordering();
    let result = state.rosters.with_mut(path.id, |r| {
        let mut rankings = r.ranked();
        sort_rankings(&mut rankings, sort, dir);
        HttpResponse::Ok().json(RankingsView { sort, dir, rankings })
    });
    result.unwrap_or_else(|e| session_error(e, "roster"))
}

/// Share: rankings as a CSV download.
#[get("/api/rosters/{id}/rankings.csv")]
async fn api_rankings_csv(state: State, path: Path<RosterPath>) -> HttpResponse {
    let result = state.rosters.with_mut(path.id, |r| rankings_csv(&r.ranked()));
    match result {
        Ok(Ok(csv)) => {
            let filename = format!("rankings-{}.csv", chrono::Utc::now().format("%Y%m%d-%H%M%S"));
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", filename),
                ))
                .body(csv)
        }
        Ok(Err(e)) => {
            log::error!("failed to write rankings csv: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": "export failed" }))
        }
        Err(e) => session_error(e, "roster"),
    }
}

/// Create a match (overs limit defaults to 20).
#[post("/api/matches")]
async fn api_create_match(state: State, body: Option<Json<CreateMatchBody>>) -> HttpResponse {
    let overs_limit = body
        .as_ref()
        .map(|b| b.overs_limit)
        .unwrap_or_else(default_overs_limit);
    let mut m = match MatchState::new(overs_limit) {
        Ok(m) => m,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    if let Some(b) = body.as_ref() {
        let team_1 = b.team_1_name.clone().unwrap_or_else(|| m.team_1_name.clone());
        let team_2 = b.team_2_name.clone().unwrap_or_else(|| m.team_2_name.clone());
        m.set_team_names(team_1, team_2);
    }
    let id = m.id;
    log::info!("Created match {} ({} overs)", id, m.overs_limit);
    if let Err(e) = state.matches.insert(id, m) {
        return session_error(e, "match");
    }
    apply_to_match(&state, id, |_| Transition::Ignored)
}

/// Get a match; the transition is always `ignored`.
#[get("/api/matches/{id}")]
async fn api_get_match(state: State, path: Path<MatchPath>) -> HttpResponse {
    apply_to_match(&state, path.id, |_| Transition::Ignored)
}

/// Rename teams at any point of the match.
#[put("/api/matches/{id}/teams")]
async fn api_set_team_names(state: State, path: Path<MatchPath>, body: Json<TeamNamesBody>) -> HttpResponse {
    let body = body.into_inner();
    apply_to_match(&state, path.id, move |m| {
        m.set_team_names(body.team_1_name, body.team_2_name);
        Transition::Ignored
    })
}

#[post("/api/matches/{id}/runs")]
async fn api_record_runs(state: State, path: Path<MatchPath>, body: Json<RunsBody>) -> HttpResponse {
    let runs = body.runs;
    apply_to_match(&state, path.id, |m| record_runs(m, runs))
}

#[post("/api/matches/{id}/wide")]
async fn api_record_wide(state: State, path: Path<MatchPath>) -> HttpResponse {
    apply_to_match(&state, path.id, record_wide)
}

#[post("/api/matches/{id}/no-ball")]
async fn api_record_no_ball(state: State, path: Path<MatchPath>) -> HttpResponse {
    apply_to_match(&state, path.id, record_no_ball)
}

#[post("/api/matches/{id}/wicket")]
async fn api_record_wicket(state: State, path: Path<MatchPath>) -> HttpResponse {
    apply_to_match(&state, path.id, record_wicket)
}

#[post("/api/matches/{id}/undo")]
async fn api_undo(state: State, path: Path<MatchPath>) -> HttpResponse {
    apply_to_match(&state, path.id, undo)
}

#[post("/api/matches/{id}/reset")]
async fn api_reset(state: State, path: Path<MatchPath>) -> HttpResponse {
    apply_to_match(&state, path.id, reset)
}

/// Run one scorer operation under the store lock and render the match.
fn apply_to_match(state: &State, id: MatchId, op: impl FnOnce(&mut MatchState) -> Transition) -> HttpResponse {
    let result = state.matches.with_mut(id, |m| {
        let transition = op(m);
        HttpResponse::Ok().json(MatchResponse {
            state: MatchView::of(m),
            transition,
        })
    });
    result.unwrap_or_else(|e| session_error(e, "match"))
}

/// Ask the model to compare two players. Failures leave rosters and matches untouched.
#[post("/api/compare")]
async fn api_compare(state: State, body: Json<ComparePlayersInput>) -> HttpResponse {
    match state.comparer.compare(&body).await {
        Ok(output) => HttpResponse::Ok().json(output),
        Err(e) if e.is_invalid_input() => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.user_message() }))
        }
        Err(e) => {
            log::warn!("player comparison failed: {}", e);
            HttpResponse::BadGateway().json(serde_json::json!({ "error": e.user_message() }))
        }
    }
}

/// Register the page and every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_index))
        .service(api_health)
        .service(favicon)
        .service(api_create_roster)
        .service(api_rankings_csv)
        .service(api_rankings)
        .service(api_get_roster)
        .service(api_add_player)
        .service(api_edit_player_stats)
        .service(api_create_match)
        .service(api_get_match)
        .service(api_set_team_names)
        .service(api_record_runs)
        .service(api_record_wide)
        .service(api_record_no_ball)
        .service(api_record_wicket)
        .service(api_undo)
        .service(api_reset)
        .service(api_compare);
}

async fn serve_index() -> HttpResponse {
    let html = include_str!("../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
