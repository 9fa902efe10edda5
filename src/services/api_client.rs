// ============================================================================
// API CLIENT - typed calls to the catalog backend (stateless)
// ============================================================================
// No business logic here: builds requests, decodes responses
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::models::{
    Category, CategoryId, Credentials, Curtain, CurtainForm, CurtainId, ErrorBody, LoginResponse,
    User,
};
use crate::services::error::ApiError;
use crate::services::http::{GlooTransport, HttpRequest, HttpResponse, HttpTransport, Method};

/// Catalog API client
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
}

impl ApiClient {
    /// Client talking to the browser's fetch
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, Rc::new(GlooTransport::new()))
    }

    pub fn with_transport(base_url: &str, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// All samples
    pub async fn get_curtains(&self) -> Result<Vec<Curtain>, ApiError> {
        let request = HttpRequest::new(Method::Get, self.url("/curtains"));
        self.fetch_json(request).await
    }

    /// One sample
    pub async fn get_curtain(&self, id: CurtainId) -> Result<Curtain, ApiError> {
        let request = HttpRequest::new(Method::Get, self.url(&format!("/curtains/{}", id)));
        self.fetch_json(request).await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        let request = HttpRequest::new(Method::Get, self.url("/categories"));
        self.fetch_json(request).await
    }

    pub async fn get_category_curtains(&self, id: CategoryId) -> Result<Vec<Curtain>, ApiError> {
        let request = HttpRequest::new(
            Method::Get,
            self.url(&format!("/categories/{}/curtains", id)),
        );
        self.fetch_json(request).await
    }

    pub async fn create_curtain(&self, token: &str, form: &CurtainForm) -> Result<Curtain, ApiError> {
        let request = HttpRequest::new(Method::Post, self.url("/curtains"))
            .bearer(token)
            .multipart(form.to_parts());
        self.fetch_json(request).await
    }

    pub async fn update_curtain(
        &self,
        token: &str,
        id: CurtainId,
        form: &CurtainForm,
    ) -> Result<Curtain, ApiError> {
        let request = HttpRequest::new(Method::Put, self.url(&format!("/curtains/{}", id)))
            .bearer(token)
            .multipart(form.to_parts());
        self.fetch_json(request).await
    }

    /// The response body is a confirmation message and is not decoded
    pub async fn delete_curtain(&self, token: &str, id: CurtainId) -> Result<(), ApiError> {
        let request =
            HttpRequest::new(Method::Delete, self.url(&format!("/curtains/{}", id))).bearer(token);
        self.send(request).await.map(|_| ())
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        log::info!("🔐 Logging in as {}", credentials.username);
        let body = serde_json::to_value(credentials)?;
        let request = HttpRequest::new(Method::Post, self.url("/auth/login")).json(body);
        self.fetch_json(request).await
    }

    pub async fn me(&self, token: &str) -> Result<User, ApiError> {
        let request = HttpRequest::new(Method::Get, self.url("/auth/me")).bearer(token);
        self.fetch_json(request).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        serde_json::from_str(&response.body).map_err(ApiError::from)
    }

    /// Sends and turns non-2xx statuses into errors
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request).await?;
        if response.ok() {
            return Ok(response);
        }

        let message = error_message(&response);
        log::warn!("⚠️ {} {} failed: HTTP {} {}", method, url, response.status, message);
        Err(ApiError::from_status(response.status, message))
    }
}

/// Best human-readable message for a failed response
fn error_message(response: &HttpResponse) -> String {
    if let Some(message) = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(ErrorBody::message)
    {
        return message;
    }
    let body = response.body.trim();
    if !body.is_empty() && !body.starts_with('<') && !body.starts_with('{') {
        return body.to_string();
    }
    if response.status_text.is_empty() {
        "Unknown error".to_string()
    } else {
        response.status_text.clone()
    }
}
