//! Page controllers: the consumers of the gateway.
//!
//! # Design
//! A controller reads its inputs, calls `LeagueApi`, and returns an outcome
//! value (a `Notice` to show, a `Navigation` to follow, or a view model)
//! instead of touching any UI. Page-scoped state such as the current league or
//! the cached team list lives on the controller struct, and the `LeagueApi`
//! is passed into each handler explicitly.

pub mod auth;
pub mod league_detail;
pub mod nav;

pub use auth::{AuthPage, AuthView, LoginOutcome};
pub use league_detail::{ActionOutcome, LeagueDetailPage, LeagueView, LoadOutcome, TeamManagement};
pub use nav::{NavBar, SessionState};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// A location the client should move to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation(pub String);

impl Navigation {
    pub fn to(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn location(&self) -> &str {
        &self.0
    }
}

/// Message for a failed call: the server's text for HTTP and network
/// failures, `fallback` when the response itself was unusable.
pub(crate) fn error_text(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Http { .. } | ApiError::Network(_) => err.message(),
        ApiError::Serialization(_) | ApiError::Deserialization { .. } => {
            tracing::warn!(error = %err, "unusable response");
            fallback.to_string()
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use crate::error::TransportError;
    use crate::gateway::Transport;
    use crate::http::{HttpRequest, HttpResponse};

    /// Replays queued results in order and records every request it receives.
    #[derive(Default)]
    pub struct ScriptedTransport {
        replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
        pub seen: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub fn reply(self, status: u16, body: &str) -> Self {
            self.replies.borrow_mut().push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
            self
        }

        pub fn fail(self, detail: &str) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Err(TransportError::new(detail)));
            self
        }

        pub fn paths(&self) -> Vec<String> {
            self.seen.borrow().iter().map(|r| r.path.clone()).collect()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.borrow_mut().push(request.clone());
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::new("no scripted reply")))
        }
    }
}
