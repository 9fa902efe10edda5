//! Scripted transport for unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;

use crate::services::error::ApiError;
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport, Method};

pub const TEST_BASE_URL: &str = "http://catalog.test/api";

type Scripted = Result<HttpResponse, ApiError>;

struct Entry {
    response: Scripted,
    served: bool,
}

/// Replays scripted responses per `(method, path)` in order. The last one
/// repeats until a new response is scripted for the same route.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<HashMap<(Method, String), VecDeque<Entry>>>,
    requests: RefCell<Vec<HttpRequest>>,
    on_send: RefCell<Option<Box<dyn Fn(&HttpRequest)>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.respond_raw(method, path, status, "", &body.to_string());
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: u16, status_text: &str, body: &str) {
        self.push(
            method,
            path,
            Ok(HttpResponse {
                status,
                status_text: status_text.to_string(),
                body: body.to_string(),
            }),
        );
    }

    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.push(method, path, Err(ApiError::Network(message.to_string())));
    }

    /// Runs `hook` at the moment each request is sent
    pub fn on_send(&self, hook: impl Fn(&HttpRequest) + 'static) {
        *self.on_send.borrow_mut() = Some(Box::new(hook));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn push(&self, method: Method, path: &str, response: Scripted) {
        let mut routes = self.routes.borrow_mut();
        let queue = routes
            .entry((method, format!("{}{}", TEST_BASE_URL, path)))
            .or_default();
        queue.retain(|entry| !entry.served);
        queue.push_back(Entry {
            response,
            served: false,
        });
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(hook) = self.on_send.borrow().as_ref() {
            hook(&request);
        }
        self.requests.borrow_mut().push(request.clone());

        let mut routes = self.routes.borrow_mut();
        let queue = routes
            .get_mut(&(request.method, request.url.clone()))
            .filter(|queue| !queue.is_empty());
        match queue {
            Some(queue) if queue.len() > 1 => queue.pop_front().expect("queue has entries").response,
            Some(queue) => {
                queue[0].served = true;
                queue[0].response.clone()
            }
            None => Err(ApiError::Network(format!(
                "no scripted response for {} {}",
                request.method, request.url
            ))),
        }
    }
}
