//! HTTP access to the storefront API.
//!
//! [`FetchClient`] builds requests against a base URL and hands them to a
//! [`Transport`]. [`ApiClient`] wraps it with one typed method per endpoint,
//! and the [`workflow`] module runs checkout and resource creation so that a
//! failed call never leaves the session half-changed.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_data::{workflow, ApiClient};
//!
//! let api = ApiClient::connect("http://127.0.0.1:3000", "storefront/0.1")?;
//! let catalog = workflow::load_catalog(&api).await?;
//!
//! session.add_to_cart(catalog.products[0].clone());
//! let order = workflow::checkout(&api, &mut session).await?;
//! println!("order {} total {}", order.id, order.total);
//! ```

mod api;
mod error;
mod request;
mod response;
mod transport;
pub mod workflow;

pub use api::ApiClient;
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

use std::sync::Arc;

/// HTTP client bound to one API base URL.
#[derive(Clone)]
pub struct FetchClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl FetchClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, path)
    }

    pub fn post(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, path)
    }

    /// Create a request with a custom method.
    ///
    /// Absolute URLs are used as-is; anything else is appended to the base URL.
    pub fn request(&self, method: Method, path: impl Into<String>) -> ClientRequestBuilder {
        let path = path.into();
        let full_url = if path.starts_with("http://") || path.starts_with("https://") {
            path
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };

        ClientRequestBuilder {
            builder: RequestBuilder::new(method, full_url).accept("application/json"),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send the request and return the buffered response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.transport.send(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::workflow::{checkout, load_catalog, Catalog, WorkflowError};
    pub use crate::{ApiClient, FetchClient, FetchError, Method, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::transport::mock::MockTransport;
    use super::*;

    #[tokio::test]
    async fn test_request_joins_base_url() {
        let transport = Arc::new(MockTransport::new().route(Method::Get, "/products", 200, "[]"));
        let client = FetchClient::new("http://127.0.0.1:3000/", transport.clone());

        let response = client.get("products").send().await.unwrap();
        assert_eq!(response.status, 200);

        let sent = transport.sent();
        assert_eq!(sent[0].url(), "http://127.0.0.1:3000/products");
        assert_eq!(
            sent[0].headers().get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_relative_base_url_is_invalid() {
        let client = FetchClient::new("localhost:3000", Arc::new(MockTransport::new()));
        let err = client.get("/users").send().await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}
