//! Stateless HTTP request builder and response parser for the league API.
//!
//! # Design
//! `LeagueClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`; both
//! go through the gateway so every endpoint shares one set of JSON and error
//! rules. `LeagueApi` pairs the client with a `Gateway` for callers that want
//! a single blocking call per endpoint.

use crate::error::ApiError;
use crate::gateway::{self, Gateway, RequestOptions, Transport};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    ApiStatus, CreateTeam, JoinTeam, LeagueDetails, LeagueId, LeagueSummary, Login, LoginResponse,
    MessageResponse, Register,
};

/// Synchronous, stateless client for the league API.
#[derive(Debug, Clone)]
pub struct LeagueClient {
    base_url: String,
}

impl LeagueClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A body-less request.
    fn bare(&self, method: HttpMethod, path: &str) -> Result<HttpRequest, ApiError> {
        gateway::build_request(&self.url(path), &RequestOptions::new(method))
    }

    fn get(&self, path: &str) -> Result<HttpRequest, ApiError> {
        self.bare(HttpMethod::Get, path)
    }

    fn post<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        let options = RequestOptions::new(HttpMethod::Post).with_body(gateway::to_json(body)?);
        gateway::build_request(&self.url(path), &options)
    }

    pub fn build_register(&self, input: &Register) -> Result<HttpRequest, ApiError> {
        self.post("/api/auth/register", input)
    }

    pub fn build_login(&self, input: &Login) -> Result<HttpRequest, ApiError> {
        self.post("/api/auth/login", input)
    }

    pub fn build_logout(&self) -> Result<HttpRequest, ApiError> {
        self.bare(HttpMethod::Post, "/api/auth/logout")
    }

    pub fn build_list_leagues(&self) -> Result<HttpRequest, ApiError> {
        self.get("/api/league")
    }

    pub fn build_league_details(&self, league_id: LeagueId) -> Result<HttpRequest, ApiError> {
        self.get(&format!("/api/league/{league_id}/details"))
    }

    pub fn build_create_team(&self, input: &CreateTeam) -> Result<HttpRequest, ApiError> {
        self.post("/api/team", input)
    }

    pub fn build_join_team(&self, input: &JoinTeam) -> Result<HttpRequest, ApiError> {
        self.post("/api/team/join", input)
    }

    pub fn build_status(&self) -> Result<HttpRequest, ApiError> {
        self.get("/api/status")
    }

    pub fn parse_register(&self, response: HttpResponse) -> Result<MessageResponse, ApiError> {
        decode_message(&response)
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<LoginResponse, ApiError> {
        gateway::decode(gateway::parse_response(&response)?)
    }

    pub fn parse_logout(&self, response: HttpResponse) -> Result<(), ApiError> {
        gateway::parse_response(&response).map(|_| ())
    }

    pub fn parse_list_leagues(&self, response: HttpResponse) -> Result<Vec<LeagueSummary>, ApiError> {
        gateway::decode(gateway::parse_response(&response)?)
    }

    pub fn parse_league_details(&self, response: HttpResponse) -> Result<LeagueDetails, ApiError> {
        gateway::decode(gateway::parse_response(&response)?)
    }

    pub fn parse_create_team(&self, response: HttpResponse) -> Result<MessageResponse, ApiError> {
        decode_message(&response)
    }

    pub fn parse_join_team(&self, response: HttpResponse) -> Result<MessageResponse, ApiError> {
        decode_message(&response)
    }

    pub fn parse_status(&self, response: HttpResponse) -> Result<ApiStatus, ApiError> {
        gateway::decode(gateway::parse_response(&response)?)
    }
}

/// `{message}` bodies are optional; an empty 2xx body reads as no message.
fn decode_message(response: &HttpResponse) -> Result<MessageResponse, ApiError> {
    gateway::decode::<Option<MessageResponse>>(gateway::parse_response(response)?)
        .map(Option::unwrap_or_default)
}

/// A `LeagueClient` bound to a transport: one blocking call per endpoint.
#[derive(Debug, Clone)]
pub struct LeagueApi<T> {
    client: LeagueClient,
    gateway: Gateway<T>,
}

impl<T: Transport> LeagueApi<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: LeagueClient::new(base_url),
            gateway: Gateway::new(transport),
        }
    }

    pub fn client(&self) -> &LeagueClient {
        &self.client
    }

    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    pub fn register(&self, input: &Register) -> Result<MessageResponse, ApiError> {
        let req = self.client.build_register(input)?;
        self.client.parse_register(self.gateway.execute(&req)?)
    }

    pub fn login(&self, input: &Login) -> Result<LoginResponse, ApiError> {
        let req = self.client.build_login(input)?;
        self.client.parse_login(self.gateway.execute(&req)?)
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        let req = self.client.build_logout()?;
        self.client.parse_logout(self.gateway.execute(&req)?)
    }

    pub fn list_leagues(&self) -> Result<Vec<LeagueSummary>, ApiError> {
        let req = self.client.build_list_leagues()?;
        self.client.parse_list_leagues(self.gateway.execute(&req)?)
    }

    pub fn league_details(&self, league_id: LeagueId) -> Result<LeagueDetails, ApiError> {
        let req = self.client.build_league_details(league_id)?;
        self.client.parse_league_details(self.gateway.execute(&req)?)
    }

    pub fn create_team(&self, input: &CreateTeam) -> Result<MessageResponse, ApiError> {
        let req = self.client.build_create_team(input)?;
        self.client.parse_create_team(self.gateway.execute(&req)?)
    }

    pub fn join_team(&self, input: &JoinTeam) -> Result<MessageResponse, ApiError> {
        let req = self.client.build_join_team(input)?;
        self.client.parse_join_team(self.gateway.execute(&req)?)
    }

    pub fn status(&self) -> Result<ApiStatus, ApiError> {
        let req = self.client.build_status()?;
        self.client.parse_status(self.gateway.execute(&req)?)
    }
}
