//! HTTP request builder.

use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Patch => http::Method::PATCH,
            Method::Delete => http::Method::DELETE,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// Fail with [`FetchError::InvalidUrl`] unless the URL is absolute http(s).
    pub fn check_url(&self) -> Result<(), FetchError> {
        let rest = self
            .url
            .strip_prefix("http://")
            .or_else(|| self.url.strip_prefix("https://"))
            .ok_or_else(|| FetchError::InvalidUrl(self.url.clone()))?;
        if rest.is_empty() || rest.starts_with('/') {
            return Err(FetchError::InvalidUrl(self.url.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_sets_content_type() {
        let req = RequestBuilder::new(Method::Post, "http://api/users")
            .json(&serde_json::json!({"name": "x"}))
            .unwrap();
        assert_eq!(
            req.headers().get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(req.body_bytes(), Some(br#"{"name":"x"}"#.as_slice()));
    }

    #[test]
    fn test_check_url() {
        assert!(RequestBuilder::new(Method::Get, "http://127.0.0.1:3000/products")
            .check_url()
            .is_ok());
        assert!(RequestBuilder::new(Method::Get, "https://shop.example.com/users")
            .check_url()
            .is_ok());
        assert!(matches!(
            RequestBuilder::new(Method::Get, "/products").check_url(),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(RequestBuilder::new(Method::Get, "ftp://host/x")
            .check_url()
            .is_err());
        assert!(RequestBuilder::new(Method::Get, "http:///x").check_url().is_err());
    }

    #[test]
    fn test_method_into_http() {
        assert_eq!(http::Method::from(Method::Post), http::Method::POST);
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
