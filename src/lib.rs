// ============================================================================
// CURTAIN CATALOG - browser client
// ============================================================================
// - Models: shapes shared with the backend
// - Services: HTTP only, no state
// - State: observable containers + reducers
// - Stores: actions (session, catalog)
// - Router: route table, matcher, guard
// ============================================================================

mod app;
pub mod config;
pub mod dom;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub use crate::app::App;
use crate::config::CONFIG;
use crate::models::Credentials;
use crate::router::HistoryUpdate;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if CONFIG.enable_logging {
        wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    }
    log::info!("🚀 Curtain catalog starting ({}, {})", CONFIG.environment, CONFIG.backend_url);

    dom::get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;

    let app = App::new(&CONFIG);
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    open(dom::current_path(), false);
    Ok(())
}

fn current_app() -> Option<App> {
    let app = APP.with(|cell| cell.borrow().clone());
    if app.is_none() {
        log::warn!("⚠️ App is not initialised");
    }
    app
}

/// Runs the router and the page load; the address bar only changes once a
/// route has loaded
fn open(path: String, push: bool) {
    let Some(app) = current_app() else { return };

    wasm_bindgen_futures::spawn_local(async move {
        match app.open(&path).await {
            Ok(navigation) => apply_history(navigation.history_update(push)),
            Err(e) => log::warn!("⚠️ {}", e),
        }
    });
}

fn apply_history(update: Option<HistoryUpdate>) {
    let result = match &update {
        Some(HistoryUpdate::Push(path)) => dom::push_path(path),
        Some(HistoryUpdate::Replace(path)) => dom::replace_path(path),
        None => return,
    };
    if let Err(e) = result {
        log::error!("❌ Could not update history: {:?}", e);
    }
}

/// Client-side navigation, callable from JavaScript (link clicks)
#[wasm_bindgen]
pub fn navigate(path: &str) {
    open(path.to_string(), true);
}

/// Back/forward buttons: the browser already moved, only re-route
#[wasm_bindgen]
pub fn on_popstate() {
    open(dom::current_path(), false);
}

#[wasm_bindgen]
pub fn sign_in(username: String, password: String) {
    let Some(app) = current_app() else { return };

    wasm_bindgen_futures::spawn_local(async move {
        let credentials = Credentials::new(username, password);
        match app.sign_in(&credentials).await {
            Ok(Some(navigation)) => apply_history(navigation.history_update(true)),
            Ok(None) => {}
            Err(e) => log::warn!("⚠️ {}", e),
        }
    });
}

#[wasm_bindgen]
pub fn sign_out() {
    let Some(app) = current_app() else { return };

    match app.sign_out() {
        Ok(navigation) => apply_history(navigation.history_update(true)),
        Err(e) => log::warn!("⚠️ {}", e),
    }
}
