//! Domain DTOs for the league API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates. Ids are
//! plain integers as issued by the backend.

use serde::{Deserialize, Serialize};

pub type LeagueId = i64;
pub type TeamId = i64;

/// Maximum number of members a team can hold.
pub const MAX_TEAM_MEMBERS: u32 = 2;

/// Payload for `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Register {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Payload for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

/// The `{message}` body most mutating endpoints answer with.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub name: String,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// One row of `GET /api/league`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueSummary {
    pub league_id: LeagueId,
    pub name: String,
    pub season_year: i32,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamSummary {
    pub team_id: TeamId,
    pub team_name: String,
    pub owner_username: String,
    pub member_count: u32,
}

impl TeamSummary {
    pub fn is_full(&self) -> bool {
        self.member_count >= MAX_TEAM_MEMBERS
    }
}

/// Body of `GET /api/league/{id}/details`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueDetails {
    pub league_name: String,
    pub season_year: i32,
    pub status: String,
    pub user_role: String,
    #[serde(default)]
    pub user_team_id: Option<TeamId>,
    #[serde(default)]
    pub teams: Vec<TeamSummary>,
}

/// Payload for `POST /api/team`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeam {
    pub league_id: LeagueId,
    pub team_name: String,
}

/// Payload for `POST /api/team/join`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinTeam {
    pub league_id: LeagueId,
    pub team_id: TeamId,
}

/// Body of `GET /api/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiStatus {
    pub status: String,
    pub db_status: String,
}
