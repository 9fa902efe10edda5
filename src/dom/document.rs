// ============================================================================
// DOCUMENT HELPERS - window, document, location and history access
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

/// Where the router writes page titles
pub trait DocumentTitle {
    fn set_title(&self, title: &str);
}

/// The real browser document
#[derive(Clone, Default)]
pub struct BrowserDocument;

impl DocumentTitle for BrowserDocument {
    fn set_title(&self, title: &str) {
        match document() {
            Some(doc) => doc.set_title(title),
            None => log::warn!("⚠️ No document available to set title '{}'", title),
        }
    }
}

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Path of the current location, `/` when unavailable
pub fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| "/".to_string())
}

/// Rewrites the address bar without adding a history entry
pub fn replace_path(path: &str) -> Result<(), JsValue> {
    let history = window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .history()?;
    history.replace_state_with_url(&JsValue::NULL, "", Some(path))
}

/// Adds a history entry for `path`
pub fn push_path(path: &str) -> Result<(), JsValue> {
    let history = window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .history()?;
    history.push_state_with_url(&JsValue::NULL, "", Some(path))
}
