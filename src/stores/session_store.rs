// ============================================================================
// SESSION STORE - admin login, logout and current user
// ============================================================================
// Sole owner of the persisted token: nothing else reads or writes that slot
// ============================================================================

use std::rc::Rc;

use crate::models::{Credentials, User};
use crate::services::ApiClient;
use crate::state::{ReactiveState, SessionEvent, SessionOutcome, SessionState};
use crate::utils::KeyValueStorage;

#[derive(Clone)]
pub struct SessionStore {
    api: ApiClient,
    storage: Rc<dyn KeyValueStorage>,
    token_key: String,
    state: ReactiveState<SessionState>,
}

impl SessionStore {
    /// Creates the store and restores any token left by a previous visit
    pub fn new(api: ApiClient, storage: Rc<dyn KeyValueStorage>, token_key: &str) -> Self {
        let store = Self {
            api,
            storage,
            token_key: token_key.to_string(),
            state: ReactiveState::new(SessionState::new()),
        };
        store.restore();
        store
    }

    /// Re-reads the token slot
    pub fn restore(&self) {
        let token = self.storage.get(&self.token_key);
        if token.as_deref().map(|t| !t.is_empty()).unwrap_or(false) {
            log::info!("🔑 Restored admin session from storage");
        }
        self.state.update(|s| s.apply(SessionEvent::Restored(token)));
    }

    pub fn state(&self) -> &ReactiveState<SessionState> {
        &self.state
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) {
        self.state.subscribe(callback);
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    pub fn token(&self) -> Option<String> {
        self.state.with(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.with(SessionState::loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    /// Returns whether the login succeeded; failures end up in `error()`
    pub async fn login(&self, credentials: &Credentials) -> bool {
        self.state.update(|s| s.apply(SessionEvent::Started));

        match self.api.login(credentials).await {
            Ok(response) if response.token.is_empty() => {
                log::error!("❌ Login failed: backend returned an empty token");
                let message = "Login failed: backend returned an empty token".to_string();
                self.state
                    .update(|s| s.apply(SessionEvent::Settled(SessionOutcome::Failed(message))));
                false
            }
            Ok(response) => {
                if let Err(e) = self.storage.set(&self.token_key, &response.token) {
                    log::warn!("⚠️ Token kept in memory only: {}", e);
                }
                log::info!("✅ Logged in as {}", response.user.username);
                self.state
                    .update(|s| s.apply(SessionEvent::Settled(SessionOutcome::LoggedIn(response))));
                true
            }
            Err(e) => {
                log::error!("❌ Login failed: {}", e);
                let message = format!("Login failed: {}", e);
                self.state
                    .update(|s| s.apply(SessionEvent::Settled(SessionOutcome::Failed(message))));
                false
            }
        }
    }

    pub fn logout(&self) {
        if let Err(e) = self.storage.remove(&self.token_key) {
            log::warn!("⚠️ Could not clear stored token: {}", e);
        }
        self.state.update(|s| s.apply(SessionEvent::LoggedOut));
        log::info!("👋 Logged out");
    }

    /// `None` without a network call when no token is held
    pub async fn fetch_current_user(&self) -> Option<User> {
        let token = self.token()?;
        self.state.update(|s| s.apply(SessionEvent::Started));

        match self.api.me(&token).await {
            Ok(user) => {
                let loaded = SessionOutcome::UserLoaded {
                    token: token.clone(),
                    user: user.clone(),
                };
                self.state.update(|s| s.apply(SessionEvent::Settled(loaded)));
                if self.state.with(|s| s.holds(&token)) {
                    Some(user)
                } else {
                    log::warn!("⚠️ Session changed while loading current user, dropping it");
                    None
                }
            }
            Err(e) if e.is_unauthorized() => {
                if self.state.with(|s| s.holds(&token)) {
                    log::warn!("⚠️ Session rejected by backend ({}), logging out", e);
                    self.logout();
                }
                self.state.update(|s| {
                    s.apply(SessionEvent::Settled(SessionOutcome::Unauthorized { token }))
                });
                None
            }
            Err(e) => {
                log::error!("❌ Failed to load current user: {}", e);
                let message = format!("Failed to load current user: {}", e);
                self.state
                    .update(|s| s.apply(SessionEvent::Settled(SessionOutcome::Failed(message))));
                None
            }
        }
    }
}
