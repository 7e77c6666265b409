//! Single binary web server: JSON API over in-memory tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, INACTIVITY_HOURS.
//!
//! This is the collaborator side of the engine: it owns storage, serializes mutations per
//! tournament through the lock, and enforces lifecycle rules the engine leaves to callers
//! (no fixture regeneration once a tournament is completed).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{NaiveDate, NaiveTime};
use lounge_tournament::{EngineError, Format, MatchId, PlayerId, Tournament, TournamentId, TournamentStatus};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Server settings read from the environment.
#[derive(Debug)]
struct ServerConfig {
    host: String,
    port: u16,
    inactivity_timeout: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let hours: u64 = std::env::var("INACTIVITY_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(12);
        Self {
            host,
            port,
            inactivity_timeout: Duration::from_secs(hours * 3600),
        }
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    format: Format,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    external_ref: Option<String>,
}

#[derive(Deserialize)]
struct RenamePlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct SetFormatBody {
    format: Format,
}

#[derive(Deserialize)]
struct RecordResultBody {
    winner_id: PlayerId,
}

#[derive(Deserialize)]
struct ReassignBody {
    player1_id: PlayerId,
    player2_id: PlayerId,
}

#[derive(Deserialize)]
struct ScheduleBody {
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    time: Option<NaiveTime>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and player id.
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: PlayerId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: &EngineError) -> HttpResponse {
    if let EngineError::StructuralInconsistency { .. } = e {
        log::error!("Engine fault: {e}");
    }
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Look up a tournament, refresh its activity time and apply `op` to it.
/// Responds with the updated tournament, 404 if unknown, 400 on engine errors.
fn with_tournament<F>(state: &AppState, id: TournamentId, op: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), EngineError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match op(t) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "lounge-tournament",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Option<Json<CreateTournamentBody>>) -> HttpResponse {
    let (name, format) = body
        .map(|b| {
            let b = b.into_inner();
            (b.name, b.format)
        })
        .unwrap_or_default();
    let tournament = Tournament::new(name, format);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created {:?} tournament {}", tournament.format, tournament.id);
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        tournament.id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_| Ok(()))
}

/// Switch format (only before fixtures exist).
#[put("/api/tournaments/{id}/format")]
async fn api_set_format(state: AppState, path: Path<TournamentPath>, body: Json<SetFormatBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.set_format(body.format))
}

/// Add a player (only before fixtures exist).
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(state: AppState, path: Path<TournamentPath>, body: Json<AddPlayerBody>) -> HttpResponse {
    let body = body.into_inner();
    with_tournament(&state, path.id, |t| {
        t.add_player(body.name, body.external_ref).map(|_| ())
    })
}

/// Remove a player by id (only before fixtures exist).
#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.remove_player(path.player_id))
}

/// Rename a player (any time).
#[put("/api/tournaments/{id}/players/{player_id}/name")]
async fn api_rename_player(
    state: AppState,
    path: Path<TournamentPlayerPath>,
    body: Json<RenamePlayerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.rename_player(path.player_id, &body.name))
}

/// Generate fixtures from the current roster. Refused once the tournament is completed.
#[post("/api/tournaments/{id}/fixtures")]
async fn api_generate_fixtures(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut blocked = false;
    let response = with_tournament(&state, path.id, |t| {
        if t.status == TournamentStatus::Completed {
            blocked = true;
            return Ok(());
        }
        t.generate_fixtures()
    });
    if blocked {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Cannot regenerate a completed tournament" }));
    }
    response
}

/// Record the winner of a match and advance them.
#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.record_result(path.match_id, body.winner_id))
}

/// Replace both competitors of a match (may regenerate the bracket).
#[put("/api/tournaments/{id}/matches/{match_id}/players")]
async fn api_reassign_match(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ReassignBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.reassign_match_players(path.match_id, body.player1_id, body.player2_id)
    })
}

/// Set the advisory date/time of a match.
#[put("/api/tournaments/{id}/matches/{match_id}/schedule")]
async fn api_reschedule_match(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScheduleBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.reschedule_match(path.match_id, body.date, body.time))
}

/// Cancel a match that has not been played.
#[post("/api/tournaments/{id}/matches/{match_id}/cancel")]
async fn api_cancel_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.cancel_match(path.match_id))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state: AppState = Data::new(RwLock::new(HashMap::new()));

    // Background task: every 30 minutes, remove tournaments idle past the timeout
    let state_cleanup = state.clone();
    let timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_set_format)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_rename_player)
            .service(api_generate_fixtures)
            .service(api_record_result)
            .service(api_reassign_match)
            .service(api_reschedule_match)
            .service(api_cancel_match)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
