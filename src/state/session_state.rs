// ============================================================================
// SESSION STATE - token + current user, plus its reducer
// ============================================================================

use crate::models::{LoginResponse, User};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<User>,
    pub error: Option<String>,
    in_flight: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Token read back from durable storage at boot
    Restored(Option<String>),
    Started,
    Settled(SessionOutcome),
    LoggedOut,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionOutcome {
    LoggedIn(LoginResponse),
    /// `token` is the one the request was sent with
    UserLoaded { token: String, user: User },
    /// Backend rejected `token`
    Unauthorized { token: String },
    Failed(String),
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Restored(token) => self.token = non_empty(token),
            SessionEvent::Started => self.in_flight += 1,
            SessionEvent::LoggedOut => self.clear(),
            SessionEvent::Settled(outcome) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                match outcome {
                    SessionOutcome::LoggedIn(response) => {
                        self.token = non_empty(Some(response.token));
                        self.user = Some(response.user);
                        self.error = None;
                    }
                    // Answers for a token that is no longer held are stale
                    SessionOutcome::UserLoaded { token, user } => {
                        if self.holds(&token) {
                            self.user = Some(user);
                            self.error = None;
                        }
                    }
                    SessionOutcome::Unauthorized { token } => {
                        if self.holds(&token) {
                            self.clear();
                        }
                    }
                    SessionOutcome::Failed(message) => self.error = Some(message),
                }
            }
        }
    }

    /// Whether `token` is the session currently held
    pub fn holds(&self, token: &str) -> bool {
        self.token.as_deref() == Some(token)
    }

    fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

fn non_empty(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            username: "admin".to_string(),
            is_admin: true,
        }
    }

    #[test]
    fn empty_restored_token_is_not_a_session() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Restored(Some(String::new())));
        assert!(!state.is_authenticated());

        state.apply(SessionEvent::Restored(Some("t".to_string())));
        assert!(state.is_authenticated());
    }

    #[test]
    fn failed_login_keeps_previous_session() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Restored(Some("old".to_string())));
        state.apply(SessionEvent::Started);
        assert!(state.loading());
        state.apply(SessionEvent::Settled(SessionOutcome::Failed("nope".into())));

        assert!(!state.loading());
        assert_eq!(state.token.as_deref(), Some("old"));
        assert_eq!(state.error.as_deref(), Some("nope"));
    }

    #[test]
    fn unauthorized_clears_token_and_user() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Started);
        state.apply(SessionEvent::Settled(SessionOutcome::LoggedIn(LoginResponse {
            token: "t".to_string(),
            user: user(),
        })));
        assert_eq!(state.user, Some(user()));

        state.apply(SessionEvent::Started);
        state.apply(SessionEvent::Settled(SessionOutcome::Unauthorized {
            token: "t".to_string(),
        }));
        assert_eq!(state.token, None);
        assert_eq!(state.user, None);
        assert!(!state.loading());
    }

    #[test]
    fn user_loaded_for_a_dropped_token_is_ignored() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Restored(Some("t".to_string())));
        state.apply(SessionEvent::Started);
        state.apply(SessionEvent::LoggedOut);
        state.apply(SessionEvent::Settled(SessionOutcome::UserLoaded {
            token: "t".to_string(),
            user: user(),
        }));

        assert_eq!(state.token, None);
        assert_eq!(state.user, None);
        assert!(!state.loading());
    }

    #[test]
    fn late_rejection_of_old_token_keeps_new_session() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Restored(Some("old".to_string())));
        state.apply(SessionEvent::Started);
        state.apply(SessionEvent::Started);
        state.apply(SessionEvent::Settled(SessionOutcome::LoggedIn(LoginResponse {
            token: "new".to_string(),
            user: user(),
        })));
        state.apply(SessionEvent::Settled(SessionOutcome::Unauthorized {
            token: "old".to_string(),
        }));

        assert_eq!(state.token.as_deref(), Some("new"));
        assert_eq!(state.user, Some(user()));
    }
}
