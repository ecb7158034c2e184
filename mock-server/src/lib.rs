use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session";
pub const REDIRECT_AFTER_LOGIN: &str = "/static/leagues.html";
pub const MAX_TEAM_MEMBERS: usize = 2;

pub type UserId = i64;
pub type LeagueId = i64;
pub type TeamId = i64;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeagueSummary {
    pub league_id: LeagueId,
    pub name: String,
    pub season_year: i32,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team_id: TeamId,
    pub team_name: String,
    pub owner_username: String,
    pub member_count: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeagueDetails {
    pub league_name: String,
    pub season_year: i32,
    pub status: String,
    pub user_role: String,
    pub user_team_id: Option<TeamId>,
    pub teams: Vec<TeamSummary>,
}

#[derive(Deserialize)]
pub struct Register {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateTeam {
    pub league_id: LeagueId,
    pub team_name: String,
}

#[derive(Deserialize)]
pub struct JoinTeam {
    pub league_id: LeagueId,
    pub team_id: TeamId,
}

#[derive(Clone, Debug)]
struct User {
    id: UserId,
    name: String,
    email: String,
    password: String,
}

#[derive(Clone, Debug)]
struct Team {
    id: TeamId,
    league_id: LeagueId,
    name: String,
    owner: UserId,
    members: Vec<UserId>,
}

/// In-memory backend state.
#[derive(Debug, Default)]
pub struct Store {
    users: Vec<User>,
    sessions: HashMap<String, UserId>,
    leagues: Vec<LeagueSummary>,
    teams: Vec<Team>,
    next_id: i64,
}

impl Store {
    /// A store with two leagues and no users.
    pub fn seeded() -> Self {
        let mut store = Store {
            next_id: 1,
            ..Store::default()
        };
        for (name, season_year, status) in [
            ("Spring Dice League", 2025, "active"),
            ("Winter Classic", 2024, "completed"),
        ] {
            let league_id = store.allocate_id();
            store.leagues.push(LeagueSummary {
                league_id,
                name: name.to_string(),
                season_year,
                status: status.to_string(),
            });
        }
        store
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn team_of(&self, league_id: LeagueId, user: UserId) -> Option<&Team> {
        self.teams
            .iter()
            .find(|t| t.league_id == league_id && t.members.contains(&user))
    }
}

pub type Db = Arc<RwLock<Store>>;

/// A JSON `{"error": ...}` response with the given status.
#[derive(Debug)]
pub struct ApiFailure(pub StatusCode, pub &'static str);

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/api/status", get(status))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/league", get(list_leagues))
        .route("/api/league/{league_id}/details", get(league_details))
        .route("/api/team", post(create_team))
        .route("/api/team/join", post(join_team))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock league backend listening");
    }
    axum::serve(listener, app()).await
}

fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

async fn current_user(db: &Db, headers: &HeaderMap) -> Result<UserId, ApiFailure> {
    let token = session_token(headers)
        .ok_or(ApiFailure(StatusCode::UNAUTHORIZED, "Authentication required"))?;
    db.read()
        .await
        .sessions
        .get(token)
        .copied()
        .ok_or(ApiFailure(StatusCode::UNAUTHORIZED, "Authentication required"))
}

async fn status() -> Json<serde_json::Value> {
    Json(json!({ "status": "API running", "db_status": "Connected" }))
}

async fn register(
    State(db): State<Db>,
    Json(input): Json<Register>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiFailure> {
    if [&input.name, &input.email, &input.password]
        .iter()
        .any(|f| f.trim().is_empty())
    {
        return Err(ApiFailure(StatusCode::BAD_REQUEST, "Name, email and password are required"));
    }
    let mut store = db.write().await;
    if store.users.iter().any(|u| u.email == input.email) {
        return Err(ApiFailure(StatusCode::CONFLICT, "Email already registered"));
    }
    let id = store.allocate_id();
    store.users.push(User {
        id,
        name: input.name,
        email: input.email,
        password: input.password,
    });
    tracing::info!(user_id = id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

async fn login(
    State(db): State<Db>,
    Json(input): Json<Login>,
) -> Result<impl IntoResponse, ApiFailure> {
    let mut store = db.write().await;
    let user = store
        .users
        .iter()
        .find(|u| u.email == input.email && u.password == input.password)
        .cloned()
        .ok_or(ApiFailure(StatusCode::UNAUTHORIZED, "Invalid email or password"))?;
    let token = Uuid::new_v4().to_string();
    store.sessions.insert(token.clone(), user.id);
    tracing::info!(user_id = user.id, "login");
    Ok((
        [(
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}={token}; HttpOnly; Path=/"),
        )],
        Json(json!({
            "message": "Login successful",
            "name": user.name,
            "redirect_url": REDIRECT_AFTER_LOGIN,
        })),
    ))
}

async fn logout(State(db): State<Db>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        db.write().await.sessions.remove(token);
    }
    (
        [(
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}=; HttpOnly; Path=/; Max-Age=0"),
        )],
        Json(json!({ "message": "Logged out" })),
    )
}

async fn list_leagues(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<LeagueSummary>>, ApiFailure> {
    current_user(&db, &headers).await?;
    let store = db.read().await;
    let mut leagues = store.leagues.clone();
    leagues.sort_by(|a, b| {
        b.season_year
            .cmp(&a.season_year)
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(Json(leagues))
}

async fn league_details(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(league_id): Path<LeagueId>,
) -> Result<Json<LeagueDetails>, ApiFailure> {
    let user_id = current_user(&db, &headers).await?;
    let store = db.read().await;
    let league = store
        .leagues
        .iter()
        .find(|l| l.league_id == league_id)
        .ok_or(ApiFailure(StatusCode::NOT_FOUND, "League not found"))?;

    let own_team = store.team_of(league_id, user_id);
    let user_role = match own_team {
        Some(team) if team.owner == user_id => "owner",
        Some(_) => "member",
        None => "viewer",
    };
    let teams = store
        .teams
        .iter()
        .filter(|t| t.league_id == league_id)
        .map(|t| TeamSummary {
            team_id: t.id,
            team_name: t.name.clone(),
            owner_username: store.user(t.owner).map(|u| u.name.clone()).unwrap_or_default(),
            member_count: t.members.len(),
        })
        .collect();

    Ok(Json(LeagueDetails {
        league_name: league.name.clone(),
        season_year: league.season_year,
        status: league.status.clone(),
        user_role: user_role.to_string(),
        user_team_id: own_team.map(|t| t.id),
        teams,
    }))
}

async fn create_team(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateTeam>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiFailure> {
    let user_id = current_user(&db, &headers).await?;
    let team_name = input.team_name.trim();
    if team_name.is_empty() {
        return Err(ApiFailure(StatusCode::BAD_REQUEST, "Team name is required"));
    }
    let mut store = db.write().await;
    if !store.leagues.iter().any(|l| l.league_id == input.league_id) {
        return Err(ApiFailure(StatusCode::NOT_FOUND, "League not found"));
    }
    if store.team_of(input.league_id, user_id).is_some() {
        return Err(ApiFailure(StatusCode::CONFLICT, "You already have a team in this league"));
    }
    if store
        .teams
        .iter()
        .any(|t| t.league_id == input.league_id && t.name.eq_ignore_ascii_case(team_name))
    {
        return Err(ApiFailure(StatusCode::CONFLICT, "Team name already taken"));
    }
    let id = store.allocate_id();
    store.teams.push(Team {
        id,
        league_id: input.league_id,
        name: team_name.to_string(),
        owner: user_id,
        members: vec![user_id],
    });
    tracing::info!(team_id = id, league_id = input.league_id, "team created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Team created successfully", "team_id": id })),
    ))
}

async fn join_team(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<JoinTeam>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let user_id = current_user(&db, &headers).await?;
    let mut store = db.write().await;
    if store.team_of(input.league_id, user_id).is_some() {
        return Err(ApiFailure(StatusCode::CONFLICT, "You already belong to a team in this league"));
    }
    let team = store
        .teams
        .iter_mut()
        .find(|t| t.id == input.team_id && t.league_id == input.league_id)
        .ok_or(ApiFailure(StatusCode::NOT_FOUND, "Team not found"))?;
    if team.members.len() >= MAX_TEAM_MEMBERS {
        return Err(ApiFailure(StatusCode::CONFLICT, "Team is full"));
    }
    team.members.push(user_id);
    tracing::info!(team_id = team.id, user_id, "team joined");
    Ok(Json(json!({ "message": format!("Joined {}", team.name) })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn seeded_store_has_two_leagues() {
        let store = Store::seeded();
        assert_eq!(store.leagues.len(), 2);
        assert_eq!(store.leagues[0].league_id, 1);
        assert_eq!(store.leagues[1].league_id, 2);
        assert_eq!(store.next_id, 3);
    }

    #[test]
    fn session_token_found_among_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc-123; lang=en"),
        );
        assert_eq!(session_token(&headers), Some("abc-123"));
    }

    #[test]
    fn session_token_missing() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);
        headers.insert(header::COOKIE, HeaderValue::from_static("sessionx=1"));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn team_summary_serializes_expected_fields() {
        let team = TeamSummary {
            team_id: 4,
            team_name: "Owls".to_string(),
            owner_username: "ana".to_string(),
            member_count: 1,
        };
        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["team_id"], 4);
        assert_eq!(json["team_name"], "Owls");
        assert_eq!(json["owner_username"], "ana");
        assert_eq!(json["member_count"], 1);
    }

    #[test]
    fn register_rejects_missing_password() {
        let result: Result<Register, _> =
            serde_json::from_str(r#"{"name":"Ana","email":"ana@example.com"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn team_of_matches_members_only_in_league() {
        let mut store = Store::seeded();
        store.teams.push(Team {
            id: 10,
            league_id: 1,
            name: "Owls".to_string(),
            owner: 7,
            members: vec![7, 8],
        });
        assert_eq!(store.team_of(1, 8).map(|t| t.id), Some(10));
        assert!(store.team_of(2, 8).is_none());
        assert!(store.team_of(1, 9).is_none());
    }
}
