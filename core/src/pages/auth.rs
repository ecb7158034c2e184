//! Login and registration forms.

use super::{error_text, Navigation, Notice};
use crate::client::LeagueApi;
use crate::gateway::Transport;
use crate::types::{Login, Register};

const LOGIN_FALLBACK: &str = "Invalid credentials or server error.";
const REGISTER_FALLBACK: &str = "Registration failed due to server error.";
const REGISTERED_DEFAULT: &str = "Registration successful! Please log in.";

/// Which form is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthView {
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub notice: Notice,
    /// Set when the server supplied a `redirect_url`.
    pub navigate: Option<Navigation>,
}

#[derive(Debug, Clone)]
pub struct AuthPage {
    view: AuthView,
    notice: Option<Notice>,
}

impl Default for AuthPage {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthPage {
    pub fn new() -> Self {
        Self {
            view: AuthView::Login,
            notice: None,
        }
    }

    pub fn view(&self) -> AuthView {
        self.view
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Show `view` and clear any notice.
    pub fn switch_view(&mut self, view: AuthView) {
        self.notice = None;
        self.view = view;
    }

    pub fn submit_login<T: Transport>(
        &mut self,
        api: &LeagueApi<T>,
        email: &str,
        password: &str,
    ) -> LoginOutcome {
        self.notice = None;
        let input = Login {
            email: email.to_string(),
            password: password.to_string(),
        };
        let outcome = match api.login(&input) {
            Ok(login) => {
                tracing::debug!(name = %login.name, "login accepted");
                LoginOutcome {
                    notice: Notice::success(format!(
                        "Login successful! Welcome, {}. Redirecting...",
                        login.name
                    )),
                    navigate: login.redirect_url.map(Navigation),
                }
            }
            Err(e) => LoginOutcome {
                notice: Notice::error(error_text(&e, LOGIN_FALLBACK)),
                navigate: None,
            },
        };
        self.notice = Some(outcome.notice.clone());
        outcome
    }

    /// On success the page switches back to the login form and the success
    /// notice stays visible.
    pub fn submit_registration<T: Transport>(
        &mut self,
        api: &LeagueApi<T>,
        name: &str,
        email: &str,
        password: &str,
    ) -> Notice {
        self.notice = None;
        let input = Register {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let notice = match api.register(&input) {
            Ok(resp) => {
                self.view = AuthView::Login;
                Notice::success(resp.message.unwrap_or_else(|| REGISTERED_DEFAULT.to_string()))
            }
            Err(e) => Notice::error(error_text(&e, REGISTER_FALLBACK)),
        };
        self.notice = Some(notice.clone());
        notice
    }
}
