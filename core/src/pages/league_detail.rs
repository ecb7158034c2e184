//! League dashboard: league info, team management, team creation and joining.
//!
//! # Design
//! `LeagueDetailPage` is the page session. It remembers the league being
//! viewed, the caller's team in it, and the team list from the last
//! successful fetch. The cache is replaced wholesale on every successful
//! fetch. A failed reload of the same league leaves it alone; loading a
//! different league drops it first. Join and create are checked against the
//! cache before anything is sent, so a full team is never requested.

use super::{error_text, Navigation, Notice};
use crate::client::LeagueApi;
use crate::error::ApiError;
use crate::gateway::Transport;
use crate::types::{
    CreateTeam, JoinTeam, LeagueDetails, LeagueId, MessageResponse, TeamId, TeamSummary,
};

pub const LOGIN_PAGE: &str = "index.html";
pub const LEAGUES_PAGE: &str = "leagues.html";

const MISSING_LEAGUE_ID: &str = "Error: League ID not found in URL.";
const SESSION_EXPIRED: &str = "Session expired. Redirecting to login.";
const LOAD_NETWORK_ERROR: &str = "Network error while fetching league data.";
const UNEXPECTED_RESPONSE: &str = "Unexpected server response.";

/// What the team-management panel offers the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamManagement {
    /// Owner or member of `team_id`.
    OnTeam { team_id: TeamId },
    NoTeam,
}

/// Everything the dashboard shows after a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueView {
    pub league_name: String,
    pub season_year: i32,
    pub status: String,
    pub user_role: String,
    pub management: TeamManagement,
    pub teams: Vec<TeamSummary>,
}

impl From<LeagueDetails> for LeagueView {
    fn from(details: LeagueDetails) -> Self {
        let management = match details.user_team_id {
            Some(team_id) => TeamManagement::OnTeam { team_id },
            None => TeamManagement::NoTeam,
        };
        Self {
            league_name: details.league_name,
            season_year: details.season_year,
            status: details.status,
            user_role: details.user_role,
            management,
            teams: details.teams,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(LeagueView),
    /// The session is gone; nothing from the league was rendered.
    RedirectToLogin { notice: Notice, navigate: Navigation },
    Failed(Notice),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Stopped client-side; no request was sent.
    Rejected(Notice),
    Failed(Notice),
    RedirectToLogin { notice: Notice, navigate: Navigation },
    /// The server accepted the change and the page was reloaded.
    Completed { notice: Notice, refreshed: LoadOutcome },
}

#[derive(Debug, Clone, Default)]
pub struct LeagueDetailPage {
    league_id: Option<LeagueId>,
    user_team_id: Option<TeamId>,
    teams: Vec<TeamSummary>,
}

fn redirect_to_login() -> (Notice, Navigation) {
    (Notice::error(SESSION_EXPIRED), Navigation::to(LOGIN_PAGE))
}

impl LeagueDetailPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn league_id(&self) -> Option<LeagueId> {
        self.league_id
    }

    pub fn user_team_id(&self) -> Option<TeamId> {
        self.user_team_id
    }

    pub fn teams(&self) -> &[TeamSummary] {
        &self.teams
    }

    /// Teams from the cache that still have a free slot.
    pub fn joinable_teams(&self) -> Vec<&TeamSummary> {
        self.teams.iter().filter(|t| !t.is_full()).collect()
    }

    pub fn back(&self) -> Navigation {
        Navigation::to(LEAGUES_PAGE)
    }

    /// Load the page for `league_id` as taken from the location's query.
    pub fn load<T: Transport>(&mut self, api: &LeagueApi<T>, league_id: Option<&str>) -> LoadOutcome {
        let parsed = league_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<LeagueId>().ok());
        if parsed != self.league_id {
            self.user_team_id = None;
            self.teams.clear();
        }
        self.league_id = parsed;
        self.reload(api)
    }

    /// Fetch the current league again and refresh the cache.
    pub fn reload<T: Transport>(&mut self, api: &LeagueApi<T>) -> LoadOutcome {
        let Some(league_id) = self.league_id else {
            return LoadOutcome::Failed(Notice::error(MISSING_LEAGUE_ID));
        };
        match api.league_details(league_id) {
            Ok(details) => {
                tracing::debug!(league_id, teams = details.teams.len(), "league loaded");
                self.user_team_id = details.user_team_id;
                self.teams = details.teams.clone();
                LoadOutcome::Loaded(details.into())
            }
            Err(e) if e.is_unauthorized() => {
                let (notice, navigate) = redirect_to_login();
                LoadOutcome::RedirectToLogin { notice, navigate }
            }
            Err(e @ ApiError::Network(_)) => {
                tracing::warn!(league_id, error = %e, "league fetch failed");
                LoadOutcome::Failed(Notice::error(LOAD_NETWORK_ERROR))
            }
            Err(e) => LoadOutcome::Failed(Notice::error(format!(
                "Failed to load league: {}",
                error_text(&e, UNEXPECTED_RESPONSE)
            ))),
        }
    }

    pub fn create_team<T: Transport>(&mut self, api: &LeagueApi<T>, team_name: &str) -> ActionOutcome {
        let Some(league_id) = self.league_id else {
            return ActionOutcome::Rejected(Notice::error(MISSING_LEAGUE_ID));
        };
        if self.user_team_id.is_some() {
            return ActionOutcome::Rejected(Notice::error(
                "You already have a team in this league.",
            ));
        }
        let team_name = team_name.trim();
        if team_name.is_empty() {
            return ActionOutcome::Rejected(Notice::error("Team name is required."));
        }

        let input = CreateTeam {
            league_id,
            team_name: team_name.to_string(),
        };
        let result = api.create_team(&input);
        self.finish(api, result, "Team created.")
    }

    pub fn join_team<T: Transport>(&mut self, api: &LeagueApi<T>, team_id: TeamId) -> ActionOutcome {
        let Some(league_id) = self.league_id else {
            return ActionOutcome::Rejected(Notice::error(MISSING_LEAGUE_ID));
        };
        if self.user_team_id.is_some() {
            return ActionOutcome::Rejected(Notice::error(
                "You already belong to a team in this league.",
            ));
        }
        match self.teams.iter().find(|t| t.team_id == team_id) {
            None => return ActionOutcome::Rejected(Notice::error("Select a team to join.")),
            Some(team) if team.is_full() => {
                return ActionOutcome::Rejected(Notice::error(format!(
                    "{} is full.",
                    team.team_name
                )))
            }
            Some(_) => {}
        }

        let result = api.join_team(&JoinTeam { league_id, team_id });
        self.finish(api, result, "Joined team.")
    }

    fn finish<T: Transport>(
        &mut self,
        api: &LeagueApi<T>,
        result: Result<MessageResponse, ApiError>,
        default_message: &str,
    ) -> ActionOutcome {
        match result {
            Ok(resp) => {
                let notice =
                    Notice::success(resp.message.unwrap_or_else(|| default_message.to_string()));
                ActionOutcome::Completed {
                    notice,
                    refreshed: self.reload(api),
                }
            }
            Err(e) if e.is_unauthorized() => {
                let (notice, navigate) = redirect_to_login();
                ActionOutcome::RedirectToLogin { notice, navigate }
            }
            Err(e) => ActionOutcome::Failed(Notice::error(error_text(&e, UNEXPECTED_RESPONSE))),
        }
    }
}
