//! In-memory stand-in for the Riot API endpoints the client wraps.
//!
//! Riot routes require the API key, sent either in the `X-Riot-Token` header
//! or as the `api_key` query parameter. Errors use Riot's
//! `{"status":{"message":..,"status_code":..}}` envelope. Accounts are seeded
//! through the unauthenticated `POST /mock/accounts` route.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const API_TOKEN_HEADER: &str = "X-Riot-Token";
pub const API_KEY_PARAM: &str = "api_key";

const SHARD_GAMES: [&str; 3] = ["val", "lor", "2xko"];
const REGION_GAMES: [&str; 2] = ["lol", "tft"];
const DEFAULT_TOP_COUNT: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mastery {
    pub puuid: String,
    pub champion_id: i64,
    pub champion_level: i32,
    pub champion_points: i64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedMastery {
    pub champion_id: i64,
    pub champion_level: i32,
    pub champion_points: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccount {
    pub game_name: String,
    pub tag_line: String,
    #[serde(default = "default_shard")]
    pub active_shard: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub masteries: Vec<SeedMastery>,
}

fn default_shard() -> String {
    "na".to_string()
}

fn default_region() -> String {
    "na1".to_string()
}

#[derive(Debug)]
struct Player {
    account: Account,
    active_shard: String,
    region: String,
    masteries: Vec<Mastery>,
}

#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    players: Arc<RwLock<HashMap<String, Player>>>,
}

#[derive(Deserialize)]
struct TopQuery {
    count: Option<usize>,
}

pub fn app(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
        players: Arc::new(RwLock::new(HashMap::new())),
    };

    Router::new()
        .route(
            "/riot/account/v1/accounts/by-riot-id/{game_name}/{tag_line}",
            get(account_by_riot_id),
        )
        .route("/riot/account/v1/accounts/by-puuid/{puuid}", get(account_by_puuid))
        .route(
            "/riot/account/v1/active-shards/by-game/{game}/by-puuid/{puuid}",
            get(active_shard),
        )
        .route(
            "/riot/account/v1/region/by-game/{game}/by-puuid/{puuid}",
            get(active_region),
        )
        .route("/lol/platform/v3/champion-rotations", get(champion_rotation))
        .route(
            "/lol/champion-mastery/v4/champion-masteries/by-puuid/{puuid}",
            get(masteries),
        )
        .route(
            "/lol/champion-mastery/v4/champion-masteries/by-puuid/{puuid}/top",
            get(top_masteries),
        )
        .route(
            "/lol/champion-mastery/v4/champion-masteries/by-puuid/{puuid}/by-champion/{champion_id}",
            get(mastery_by_champion),
        )
        .route("/lol/champion-mastery/v4/scores/by-puuid/{puuid}", get(mastery_score))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .route("/mock/accounts", post(create_account))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

/// Riot's error envelope.
pub fn riot_error(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "status": {
            "message": message,
            "status_code": status.as_u16(),
        }
    });
    (status, Json(body)).into_response()
}

fn not_found() -> Response {
    riot_error(StatusCode::NOT_FOUND, "Data not found")
}

async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let header_ok = request
        .headers()
        .get(API_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|key| key == &*state.api_key);
    let query_ok = Query::<HashMap<String, String>>::try_from_uri(request.uri())
        .map(|Query(params)| params.get(API_KEY_PARAM).is_some_and(|key| key == &*state.api_key))
        .unwrap_or(false);

    if header_ok || query_ok {
        next.run(request).await
    } else {
        riot_error(StatusCode::UNAUTHORIZED, "Unknown apikey")
    }
}

async fn create_account(
    State(state): State<AppState>,
    Json(input): Json<CreateAccount>,
) -> (StatusCode, Json<Account>) {
    let puuid = Uuid::new_v4().to_string();
    let account = Account {
        puuid: puuid.clone(),
        game_name: input.game_name,
        tag_line: input.tag_line,
    };
    let masteries = input
        .masteries
        .into_iter()
        .map(|seed| Mastery {
            puuid: puuid.clone(),
            champion_id: seed.champion_id,
            champion_level: seed.champion_level,
            champion_points: seed.champion_points,
        })
        .collect();
    let player = Player {
        account: account.clone(),
        active_shard: input.active_shard,
        region: input.region,
        masteries,
    };
    state.players.write().await.insert(puuid, player);
    (StatusCode::CREATED, Json(account))
}

async fn account_by_riot_id(
    State(state): State<AppState>,
    Path((game_name, tag_line)): Path<(String, String)>,
) -> Response {
    let players = state.players.read().await;
    players
        .values()
        .map(|player| &player.account)
        .find(|account| {
            account.game_name.eq_ignore_ascii_case(&game_name)
                && account.tag_line.eq_ignore_ascii_case(&tag_line)
        })
        .map(|account| Json(account.clone()).into_response())
        .unwrap_or_else(not_found)
}

async fn account_by_puuid(State(state): State<AppState>, Path(puuid): Path<String>) -> Response {
    let players = state.players.read().await;
    players
        .get(&puuid)
        .map(|player| Json(player.account.clone()).into_response())
        .unwrap_or_else(not_found)
}

async fn active_shard(
    State(state): State<AppState>,
    Path((game, puuid)): Path<(String, String)>,
) -> Response {
    if !SHARD_GAMES.contains(&game.as_str()) {
        return riot_error(StatusCode::BAD_REQUEST, "Bad request - invalid game");
    }
    let players = state.players.read().await;
    match players.get(&puuid) {
        Some(player) => Json(json!({
            "puuid": puuid,
            "game": game,
            "activeShard": player.active_shard,
        }))
        .into_response(),
        None => not_found(),
    }
}

async fn active_region(
    State(state): State<AppState>,
    Path((game, puuid)): Path<(String, String)>,
) -> Response {
    if !REGION_GAMES.contains(&game.as_str()) {
        return riot_error(StatusCode::BAD_REQUEST, "Bad request - invalid game");
    }
    let players = state.players.read().await;
    match players.get(&puuid) {
        Some(player) => Json(json!({
            "puuid": puuid,
            "game": game,
            "region": player.region,
        }))
        .into_response(),
        None => not_found(),
    }
}

async fn champion_rotation() -> Json<serde_json::Value> {
    Json(json!({
        "maxNewPlayerLevel": 10,
        "freeChampionIdsForNewPlayers": [18, 81, 92, 141, 37, 238, 19, 45, 25, 64],
        "freeChampionIds": [3, 8, 22, 35, 41, 50, 57, 69, 79, 106, 113, 136, 154, 163, 223, 897],
    }))
}

/// Player masteries ordered by points, highest first.
async fn sorted_masteries(state: &AppState, puuid: &str) -> Option<Vec<Mastery>> {
    let players = state.players.read().await;
    let mut masteries = players.get(puuid)?.masteries.clone();
    masteries.sort_by(|a, b| b.champion_points.cmp(&a.champion_points));
    Some(masteries)
}

async fn masteries(State(state): State<AppState>, Path(puuid): Path<String>) -> Response {
    match sorted_masteries(&state, &puuid).await {
        Some(masteries) => Json(masteries).into_response(),
        None => not_found(),
    }
}

async fn top_masteries(
    State(state): State<AppState>,
    Path(puuid): Path<String>,
    Query(query): Query<TopQuery>,
) -> Response {
    match sorted_masteries(&state, &puuid).await {
        Some(mut masteries) => {
            masteries.truncate(query.count.unwrap_or(DEFAULT_TOP_COUNT));
            Json(masteries).into_response()
        }
        None => not_found(),
    }
}

async fn mastery_by_champion(
    State(state): State<AppState>,
    Path((puuid, champion_id)): Path<(String, i64)>,
) -> Response {
    sorted_masteries(&state, &puuid)
        .await
        .and_then(|masteries| masteries.into_iter().find(|m| m.champion_id == champion_id))
        .map(|mastery| Json(mastery).into_response())
        .unwrap_or_else(not_found)
}

async fn mastery_score(State(state): State<AppState>, Path(puuid): Path<String>) -> Response {
    match sorted_masteries(&state, &puuid).await {
        Some(masteries) => {
            let score: i64 = masteries.iter().map(|m| i64::from(m.champion_level)).sum();
            Json(score).into_response()
        }
        None => not_found(),
    }
}
