//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Longest slice of an error body carried into [`FetchError::HttpError`].
const MAX_ERROR_BODY: usize = 512;

/// An HTTP response, fully buffered.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get a header value, ignoring case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.into_http_error())
        }
    }

    /// Require exactly `expected`. Creation endpoints answer 201; any other
    /// status, even another 2xx, is a failure.
    pub fn expect_status(self, expected: http::StatusCode) -> Result<Self, FetchError> {
        if self.status == expected.as_u16() {
            Ok(self)
        } else {
            Err(self.into_http_error())
        }
    }

    fn into_http_error(self) -> FetchError {
        let mut message = String::from_utf8_lossy(&self.body).trim().to_string();
        if message.is_empty() {
            message = http::StatusCode::from_u16(self.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown error")
                .to_string();
        }
        if message.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !message.is_char_boundary(cut) {
                cut -= 1;
            }
            message.truncate(cut);
        }
        FetchError::HttpError {
            status: self.status,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_status_classes() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(201, b"").is_success());
        assert!(!make_response(300, b"").is_success());
        assert!(make_response(503, b"").is_server_error());
        assert!(!make_response(499, b"").is_server_error());
    }

    #[test]
    fn test_response_json() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug, PartialEq)]
        struct Data {
            value: i32,
        }

        let resp = make_response(200, br#"{"value": 42}"#);
        let data: Data = resp.json().unwrap();
        assert_eq!(data, Data { value: 42 });

        let resp = make_response(200, b"not json");
        assert!(matches!(resp.json::<Data>(), Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_response_header_case_insensitive() {
        let headers = HashMap::from([("Content-Type".to_string(), "text/html".to_string())]);
        let resp = Response::new(200, headers, Vec::new());
        assert_eq!(resp.header("content-type"), Some("text/html"));
        assert_eq!(resp.content_type(), Some("text/html"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    #[test]
    fn test_error_for_status() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());
        let err = make_response(404, b"Not Found").error_for_status().unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_expect_status_requires_exact_code() {
        assert!(make_response(201, b"{}")
            .expect_status(StatusCode::CREATED)
            .is_ok());

        let err = make_response(200, b"{}")
            .expect_status(StatusCode::CREATED)
            .unwrap_err();
        assert!(matches!(err, FetchError::HttpError { status: 200, .. }));
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        let err = make_response(500, b"").error_for_status().unwrap_err();
        match err {
            FetchError::HttpError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
