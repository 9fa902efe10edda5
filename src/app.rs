// ============================================================================
// APP - wires stores, router and page data loading
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::dom::{BrowserDocument, DocumentTitle};
use crate::models::Credentials;
use crate::router::routes::LOGIN;
use crate::router::{catalog_routes, Navigation, Page, RouteMatch, Router, RouterError};
use crate::services::ApiClient;
use crate::stores::{CatalogStore, SessionStore};
use crate::utils::{KeyValueStorage, LocalStorage};

/// Where a successful login lands
const ADMIN_HOME: &str = "/admin";

#[derive(Clone)]
pub struct App {
    session: SessionStore,
    catalog: CatalogStore,
    router: Rc<RefCell<Router>>,
}

impl App {
    /// Browser wiring: fetch, localStorage and the page document
    pub fn new(config: &AppConfig) -> Self {
        Self::with_services(
            ApiClient::new(&config.backend_url),
            Rc::new(LocalStorage),
            Rc::new(BrowserDocument),
            &config.token_storage_key,
        )
    }

    pub fn with_services(
        api: ApiClient,
        storage: Rc<dyn KeyValueStorage>,
        document: Rc<dyn DocumentTitle>,
        token_key: &str,
    ) -> Self {
        let session = SessionStore::new(api.clone(), storage, token_key);
        let catalog = CatalogStore::new(api, session.clone());
        let router = Router::new(&catalog_routes(), session.clone(), document);
        Self {
            session,
            catalog,
            router: Rc::new(RefCell::new(router)),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn current_route(&self) -> Option<RouteMatch> {
        self.router.borrow().current().cloned()
    }

    /// Runs the router only; no data is loaded
    pub fn navigate(&self, path: &str) -> Result<Navigation, RouterError> {
        self.router.borrow_mut().navigate(path)
    }

    /// Navigates and loads the page's data. If the backend rejects the
    /// session while a guarded page loads, the guard runs again.
    pub async fn open(&self, path: &str) -> Result<Navigation, RouterError> {
        let navigation = self.navigate(path)?;
        self.load(&navigation.route).await;

        if navigation.route.requires_auth() && !self.session.is_authenticated() {
            log::warn!("⚠️ Session ended while loading {}", navigation.route.path);
            return self.navigate(&navigation.route.path);
        }
        Ok(navigation)
    }

    /// Store actions each page needs on entry
    pub async fn load(&self, route: &RouteMatch) {
        match route.page {
            Page::Home => {
                self.catalog.fetch_categories().await;
                self.catalog.fetch_all().await;
            }
            Page::CategoryList => match route.id() {
                Some(id) => {
                    self.catalog.fetch_categories().await;
                    self.catalog.fetch_by_category(id).await;
                }
                None => log::warn!("⚠️ Invalid category id in {}", route.path),
            },
            Page::CurtainDetail => match route.id() {
                Some(id) => self.catalog.fetch_by_id(id).await,
                None => log::warn!("⚠️ Invalid sample id in {}", route.path),
            },
            Page::Admin => {
                self.session.fetch_current_user().await;
            }
            Page::CurtainManage => {
                if self.session.fetch_current_user().await.is_none()
                    && !self.session.is_authenticated()
                {
                    return;
                }
                self.catalog.fetch_categories().await;
                self.catalog.fetch_all().await;
            }
            Page::Login => {}
        }
    }

    /// Logs in and opens the admin area; `None` when the login failed
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Option<Navigation>, RouterError> {
        if !self.session.login(credentials).await {
            return Ok(None);
        }
        self.open(ADMIN_HOME).await.map(Some)
    }

    pub fn sign_out(&self) -> Result<Navigation, RouterError> {
        self.session.logout();
        let login = self
            .router
            .borrow()
            .path_for(LOGIN)
            .map(str::to_string)
            .ok_or_else(|| RouterError::UnknownRoute(LOGIN.to_string()))?;
        self.navigate(&login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::testing::RecordingDocument;
    use crate::router::routes::{ADMIN, CURTAIN_MANAGE, HOME};
    use crate::services::mock_transport::{MockTransport, TEST_BASE_URL};
    use crate::services::Method;
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;
    use serde_json::json;

    struct Harness {
        app: App,
        mock: Rc<MockTransport>,
        storage: Rc<MemoryStorage>,
        document: Rc<RecordingDocument>,
    }

    fn harness(token: Option<&str>) -> Harness {
        let mock = Rc::new(MockTransport::new());
        let storage = Rc::new(match token {
            Some(token) => MemoryStorage::with_item("admin_token", token),
            None => MemoryStorage::new(),
        });
        let document = Rc::new(RecordingDocument::default());
        let app = App::with_services(
            ApiClient::with_transport(TEST_BASE_URL, mock.clone()),
            storage.clone(),
            document.clone(),
            "admin_token",
        );
        Harness {
            app,
            mock,
            storage,
            document,
        }
    }

    fn script_catalog(mock: &MockTransport) {
        mock.respond(
            Method::Get,
            "/categories",
            200,
            json!([{"id": 1, "name": "Sheers"}, {"id": 2, "name": "Blackout"}]),
        );
        mock.respond(
            Method::Get,
            "/curtains",
            200,
            json!([{"id": 10, "name": "Voile", "category_id": 1}]),
        );
    }

    fn paths(mock: &MockTransport) -> Vec<String> {
        mock.requests()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.url.trim_start_matches(TEST_BASE_URL)))
            .collect()
    }

    #[test]
    fn home_loads_categories_and_samples() {
        let h = harness(None);
        script_catalog(&h.mock);

        let nav = block_on(h.app.open("/")).unwrap();
        assert_eq!(nav.route.name, HOME);
        assert_eq!(paths(&h.mock), vec!["GET /categories", "GET /curtains"]);
        assert_eq!(h.app.catalog().curtains().len(), 1);
        assert_eq!(h.app.catalog().categories().len(), 2);
        assert_eq!(h.document.title().as_deref(), Some("首页 - 窗帘样本展示"));
    }

    #[test]
    fn detail_page_fetches_by_id() {
        let h = harness(None);
        h.mock.respond(
            Method::Get,
            "/curtains/10",
            200,
            json!({"id": 10, "name": "Voile", "category_id": 1}),
        );

        block_on(h.app.open("/curtain/10")).unwrap();
        assert_eq!(h.app.catalog().current().map(|c| c.id), Some(10));
    }

    #[test]
    fn invalid_id_skips_loading() {
        let h = harness(None);
        block_on(h.app.open("/category/not-a-number")).unwrap();
        assert_eq!(h.mock.request_count(), 0);
    }

    #[test]
    fn guarded_page_without_session_loads_nothing() {
        let h = harness(None);
        let nav = block_on(h.app.open("/admin/curtains")).unwrap();
        assert_eq!(nav.route.name, LOGIN);
        assert_eq!(h.mock.request_count(), 0);
    }

    #[test]
    fn manage_page_loads_user_then_catalog() {
        let h = harness(Some("tok"));
        h.mock.respond(
            Method::Get,
            "/auth/me",
            200,
            json!({"id": 1, "username": "admin", "is_admin": true}),
        );
        script_catalog(&h.mock);

        let nav = block_on(h.app.open("/admin/curtains")).unwrap();
        assert_eq!(nav.route.name, CURTAIN_MANAGE);
        assert_eq!(
            paths(&h.mock),
            vec!["GET /auth/me", "GET /categories", "GET /curtains"]
        );
    }

    #[test]
    fn rejected_token_on_admin_page_sends_user_to_login() {
        let h = harness(Some("expired"));
        h.mock.respond(Method::Get, "/auth/me", 401, json!({"msg": "Token has expired"}));

        let nav = block_on(h.app.open("/admin/curtains")).unwrap();
        assert_eq!(nav.route.name, LOGIN);
        assert_eq!(nav.redirected_from.as_deref(), Some("/admin/curtains"));
        assert_eq!(h.storage.get("admin_token"), None);
        assert_eq!(paths(&h.mock), vec!["GET /auth/me"]);
    }

    #[test]
    fn sign_in_opens_admin_and_sign_out_returns_to_login() {
        let h = harness(None);
        h.mock.respond(
            Method::Post,
            "/auth/login",
            200,
            json!({"token": "jwt", "user": {"id": 1, "username": "admin", "is_admin": true}}),
        );
        h.mock.respond(
            Method::Get,
            "/auth/me",
            200,
            json!({"id": 1, "username": "admin", "is_admin": true}),
        );

        let nav = block_on(h.app.sign_in(&Credentials::new("admin", "admin123")))
            .unwrap()
            .unwrap();
        assert_eq!(nav.route.name, ADMIN);
        assert_eq!(h.app.current_route().map(|r| r.name), Some(ADMIN));

        let nav = h.app.sign_out().unwrap();
        assert_eq!(nav.route.name, LOGIN);
        assert!(!h.app.session().is_authenticated());
        assert_eq!(h.storage.get("admin_token"), None);
    }

    #[test]
    fn failed_sign_in_stays_put() {
        let h = harness(None);
        h.mock.respond(Method::Post, "/auth/login", 401, json!({"error": "bad credentials"}));

        let nav = block_on(h.app.sign_in(&Credentials::new("admin", "nope"))).unwrap();
        assert!(nav.is_none());
        assert!(h.app.current_route().is_none());
        assert!(h.app.session().error().is_some());
    }
}
