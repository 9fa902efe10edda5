// ============================================================================
// ROUTER - path -> page resolution with title and auth guard
// ============================================================================

pub mod guard;
pub mod matcher;
pub mod routes;

use std::rc::Rc;

use thiserror::Error;

use crate::dom::DocumentTitle;
use crate::stores::SessionStore;

pub use guard::{before_each, GuardDecision};
pub use matcher::{RouteMatch, RouteMatcher};
pub use routes::{catalog_routes, Page, RouteDef, RouteMeta};

/// Redirect hops allowed before giving up
const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouterError {
    #[error("no route matches '{0}'")]
    NotFound(String),

    #[error("redirect target '{0}' is not a registered route")]
    UnknownRoute(String),

    #[error("too many redirects while navigating to '{0}'")]
    RedirectLoop(String),
}

/// Outcome of a completed navigation
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub route: RouteMatch,
    /// Originally requested path when the guard redirected
    pub redirected_from: Option<String>,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        self.redirected_from.is_some()
    }

    /// Address bar change for this navigation. `push` is set for in-app
    /// link clicks; the browser already moved for loads and back/forward.
    pub fn history_update(&self, push: bool) -> Option<HistoryUpdate> {
        let path = self.route.path.clone();
        if push {
            Some(HistoryUpdate::Push(path))
        } else if self.redirected() {
            Some(HistoryUpdate::Replace(path))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryUpdate {
    Push(String),
    Replace(String),
}

pub struct Router {
    matcher: RouteMatcher,
    session: SessionStore,
    document: Rc<dyn DocumentTitle>,
    current: Option<RouteMatch>,
}

impl Router {
    pub fn new(routes: &[RouteDef], session: SessionStore, document: Rc<dyn DocumentTitle>) -> Self {
        Self {
            matcher: RouteMatcher::new(routes),
            session,
            document,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&RouteMatch> {
        self.current.as_ref()
    }

    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        self.matcher.resolve(path)
    }

    pub fn path_for(&self, name: &str) -> Option<&str> {
        self.matcher.path_for(name)
    }

    /// Resolves `path`, sets the title of every route visited and follows
    /// guard redirects
    pub fn navigate(&mut self, path: &str) -> Result<Navigation, RouterError> {
        let mut target = self
            .matcher
            .resolve(path)
            .ok_or_else(|| RouterError::NotFound(path.to_string()))?;
        let mut redirected_from = None;

        for _ in 0..=MAX_REDIRECTS {
            if let Some(title) = target.title() {
                self.document.set_title(title);
            }

            match before_each(&target, &self.session) {
                GuardDecision::Allow => {
                    log::info!("🧭 Navigated to {} ({})", target.path, target.name);
                    self.current = Some(target.clone());
                    return Ok(Navigation {
                        route: target,
                        redirected_from,
                    });
                }
                GuardDecision::Redirect(name) => {
                    let next = self
                        .matcher
                        .path_for(name)
                        .and_then(|p| self.matcher.resolve(p))
                        .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?;
                    redirected_from.get_or_insert_with(|| target.path.clone());
                    target = next;
                }
            }
        }

        Err(RouterError::RedirectLoop(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::testing::RecordingDocument;
    use crate::router::routes::{ADMIN, HOME, LOGIN};
    use crate::services::mock_transport::{MockTransport, TEST_BASE_URL};
    use crate::services::ApiClient;
    use crate::utils::MemoryStorage;

    fn session(token: Option<&str>) -> SessionStore {
        let api = ApiClient::with_transport(TEST_BASE_URL, Rc::new(MockTransport::new()));
        let storage = match token {
            Some(token) => MemoryStorage::with_item("admin_token", token),
            None => MemoryStorage::new(),
        };
        SessionStore::new(api, Rc::new(storage), "admin_token")
    }

    fn router(token: Option<&str>) -> (Router, Rc<RecordingDocument>) {
        let document = Rc::new(RecordingDocument::default());
        let router = Router::new(&catalog_routes(), session(token), document.clone());
        (router, document)
    }

    #[test]
    fn admin_without_token_redirects_to_login() {
        let (mut router, document) = router(None);
        let nav = router.navigate("/admin").unwrap();

        assert_eq!(nav.route.name, LOGIN);
        assert_eq!(nav.redirected_from.as_deref(), Some("/admin"));
        assert_eq!(document.titles(), vec!["后台管理", "管理员登录"]);
        assert_eq!(router.current().map(|r| r.name), Some(LOGIN));
    }

    #[test]
    fn nested_admin_route_is_guarded_too() {
        let (mut router, _) = router(None);
        let nav = router.navigate("/admin/curtains").unwrap();
        assert!(nav.redirected());
        assert_eq!(nav.route.name, LOGIN);
    }

    #[test]
    fn admin_with_any_token_proceeds() {
        let (mut router, document) = router(Some("x"));
        let nav = router.navigate("/admin").unwrap();

        assert_eq!(nav.route.name, ADMIN);
        assert!(!nav.redirected());
        assert_eq!(document.title().as_deref(), Some("后台管理"));
    }

    #[test]
    fn empty_stored_token_counts_as_logged_out() {
        let (mut router, _) = router(Some(""));
        assert!(router.navigate("/admin").unwrap().redirected());
    }

    #[test]
    fn home_always_proceeds() {
        for token in [None, Some("t")] {
            let (mut router, document) = router(token);
            let nav = router.navigate("/").unwrap();
            assert_eq!(nav.route.name, HOME);
            assert_eq!(document.title().as_deref(), Some("首页 - 窗帘样本展示"));
        }
    }

    #[test]
    fn logout_closes_admin_routes() {
        let (mut router, _) = router(Some("t"));
        assert!(!router.navigate("/admin").unwrap().redirected());

        router.session.logout();
        assert!(router.navigate("/admin").unwrap().redirected());
    }

    #[test]
    fn unknown_path_sets_no_title() {
        let (mut router, document) = router(None);
        assert_eq!(
            router.navigate("/missing"),
            Err(RouterError::NotFound("/missing".to_string()))
        );
        assert!(document.titles().is_empty());
        assert!(router.current().is_none());
    }

    #[test]
    fn untitled_routes_leave_title_alone() {
        let routes = vec![RouteDef::new("Bare", "/bare", Page::Home)];
        let document = Rc::new(RecordingDocument::default());
        let mut router = Router::new(&routes, session(None), document.clone());

        router.navigate("/bare").unwrap();
        assert!(document.titles().is_empty());
    }

    #[test]
    fn untitled_child_inherits_parent_title() {
        let routes = vec![RouteDef::new("Parent", "/parent", Page::Home)
            .title("Parent page")
            .child(RouteDef::new("Child", "child", Page::CurtainDetail))];
        let document = Rc::new(RecordingDocument::default());
        let mut router = Router::new(&routes, session(None), document.clone());

        router.navigate("/parent/child").unwrap();
        assert_eq!(document.titles(), vec!["Parent page".to_string()]);
    }

    #[test]
    fn guarded_login_route_is_a_redirect_loop() {
        let routes = vec![RouteDef::new(LOGIN, "/admin/login", Page::Login).requires_auth()];
        let document = Rc::new(RecordingDocument::default());
        let mut router = Router::new(&routes, session(None), document);

        assert_eq!(
            router.navigate("/admin/login"),
            Err(RouterError::RedirectLoop("/admin/login".to_string()))
        );
    }

    #[test]
    fn missing_login_route_is_reported() {
        let routes = vec![RouteDef::new(ADMIN, "/admin", Page::Admin).requires_auth()];
        let document = Rc::new(RecordingDocument::default());
        let mut router = Router::new(&routes, session(None), document);

        assert_eq!(
            router.navigate("/admin"),
            Err(RouterError::UnknownRoute(LOGIN.to_string()))
        );
    }

    #[test]
    fn history_follows_the_route_that_loaded() {
        let document = Rc::new(RecordingDocument::default());
        let mut router = Router::new(&catalog_routes(), session(None), document);

        let home = router.navigate("/?tab=new").unwrap();
        assert_eq!(home.history_update(true), Some(HistoryUpdate::Push("/".to_string())));
        assert_eq!(home.history_update(false), None);

        let redirected = router.navigate("/admin/curtains").unwrap();
        assert_eq!(
            redirected.history_update(true),
            Some(HistoryUpdate::Push("/admin/login".to_string()))
        );
        assert_eq!(
            redirected.history_update(false),
            Some(HistoryUpdate::Replace("/admin/login".to_string()))
        );

        assert!(router.navigate("/no/such/page").is_err());
    }
}
