//! Synchronous API client core for the league manager service.
//!
//! # Overview
//! Builds `HttpRequest` values and normalizes `HttpResponse` values without
//! touching the network itself (host-does-IO pattern). A `Transport` supplied
//! by the host executes the actual HTTP round-trip and owns the session
//! cookie.
//!
//! # Design
//! - `gateway` is the single place where JSON bodies are encoded, responses
//!   are parsed, and failures are folded into `ApiError`.
//! - `LeagueClient` is stateless; each endpoint is split into `build_*` and
//!   `parse_*` so the I/O boundary stays explicit.
//! - `pages` holds the controllers that consume the API and return outcomes
//!   (notices, navigations, view models) for a front end to present.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod gateway;
pub mod http;
pub mod pages;
pub mod types;

pub use client::{LeagueApi, LeagueClient};
pub use error::{ApiError, TransportError, NETWORK_ERROR_MESSAGE};
pub use gateway::{Gateway, RequestOptions, Transport};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    ApiStatus, CreateTeam, JoinTeam, LeagueDetails, LeagueId, LeagueSummary, Login, LoginResponse,
    MessageResponse, Register, TeamId, TeamSummary, MAX_TEAM_MEMBERS,
};
