pub mod api_client;
pub mod error;
pub mod http;

#[cfg(test)]
pub mod mock_transport;

pub use api_client::ApiClient;
pub use error::ApiError;
pub use http::{GlooTransport, HttpRequest, HttpResponse, HttpTransport, Method, RequestBody};
