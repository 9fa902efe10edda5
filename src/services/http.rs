// ============================================================================
// HTTP TRANSPORT - single seam between the API client and the network
// ============================================================================

use std::fmt;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use wasm_bindgen::JsValue;

use crate::models::FormPart;
use crate::services::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, url: String) -> Self {
        Self {
            method,
            url,
            bearer: None,
            body: RequestBody::Empty,
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request; a received response of any status is `Ok`
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Browser transport backed by `fetch` through gloo-net
#[derive(Clone, Default)]
pub struct GlooTransport;

impl GlooTransport {
    pub fn new() -> Self {
        Self
    }

    fn builder(method: Method, url: &str) -> RequestBuilder {
        match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Delete => Request::delete(url),
        }
    }

    fn form_data(parts: &[FormPart]) -> Result<web_sys::FormData, JsValue> {
        let form = web_sys::FormData::new()?;
        for part in parts {
            match part {
                FormPart::Text { name, value } => form.append_with_str(name, value)?,
                FormPart::File { name, upload } => {
                    let chunks = js_sys::Array::new();
                    chunks.push(&js_sys::Uint8Array::from(upload.bytes.as_slice()));
                    let options = web_sys::BlobPropertyBag::new();
                    options.set_type(&upload.content_type);
                    let blob =
                        web_sys::Blob::new_with_u8_array_sequence_and_options(&chunks, &options)?;
                    form.append_with_blob_and_filename(name, &blob, &upload.filename)?;
                }
            }
        }
        Ok(form)
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = Self::builder(request.method, &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        // fetch sets the multipart boundary itself, so no Content-Type here
        let prepared = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => {
                let form = Self::form_data(parts)
                    .map_err(|e| ApiError::Network(format!("form data error: {:?}", e)))?;
                builder.body(form)
            }
        }
        .map_err(|e| ApiError::Network(format!("request build error: {}", e)))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let status_text = response.status_text();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("body read error: {}", e)))?;

        log::debug!("🌐 {} {} -> {}", request.method, request.url, status);
        Ok(HttpResponse {
            status,
            status_text,
            body,
        })
    }
}
