//! The seam between request building and the network.

use crate::{FetchError, RequestBuilder, Response};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Sends a fully built request and buffers the response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// [`Transport`] backed by a `reqwest` client.
///
/// No timeout and no retry are configured; a failed call surfaces once.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        request.check_url()?;
        debug!(method = %request.method(), url = request.url(), "sending request");

        let mut builder = self
            .client
            .request(request.method().into(), request.url());
        for (key, value) in request.headers() {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body_bytes() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(status, bytes = body.len(), "response received");
        Ok(Response::new(status, headers, body))
    }
}
