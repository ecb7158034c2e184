//! Navigation bar: signed-in indicator and logout.

use super::Navigation;
use crate::client::LeagueApi;
use crate::gateway::Transport;

pub const HOME_PAGE: &str = "/static/index.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    SignedIn,
    Anonymous,
}

impl SessionState {
    pub fn label(self) -> &'static str {
        match self {
            SessionState::SignedIn => "Signed in",
            SessionState::Anonymous => "",
        }
    }
}

/// Signed-in indicator and logout button.
#[derive(Debug, Clone, Copy)]
pub struct NavBar {
    state: SessionState,
}

impl Default for NavBar {
    fn default() -> Self {
        Self::new()
    }
}

impl NavBar {
    pub fn new() -> Self {
        Self {
            state: SessionState::Anonymous,
        }
    }

    /// The state from the last `status` probe.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Probe the protected league list; any failure counts as signed out.
    pub fn status<T: Transport>(&mut self, api: &LeagueApi<T>) -> SessionState {
        self.state = match api.list_leagues() {
            Ok(_) => SessionState::SignedIn,
            Err(e) => {
                tracing::debug!(error = %e, "session probe failed");
                SessionState::Anonymous
            }
        };
        self.state
    }

    /// End the session and go home, even if the server call failed.
    pub fn logout<T: Transport>(&mut self, api: &LeagueApi<T>) -> Navigation {
        if let Err(e) = api.logout() {
            tracing::warn!(error = %e, "logout request failed");
        }
        self.state = SessionState::Anonymous;
        Navigation::to(HOME_PAGE)
    }
}
