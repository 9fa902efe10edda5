// ============================================================================
// NAVIGATION GUARD - runs before every navigation
// ============================================================================

use crate::router::matcher::RouteMatch;
use crate::router::routes::LOGIN;
use crate::stores::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Navigate to the named route instead
    Redirect(&'static str),
}

/// Guarded routes need a session token; everything else passes
pub fn before_each(target: &RouteMatch, session: &SessionStore) -> GuardDecision {
    if target.requires_auth() && !session.is_authenticated() {
        log::info!("🔒 {} requires login, redirecting", target.path);
        return GuardDecision::Redirect(LOGIN);
    }
    GuardDecision::Allow
}
