// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request representation

use reqwest::header::HeaderMap;
use reqwest::Method;

use super::header_map::{outgoing_headers, RequestHeaders};
use crate::uri::Uri;

/// One request on the wire
///
/// Built per hop: a redirect produces a fresh `Request` for the new target.
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Canonical target
    pub uri: Uri,
    /// Fully merged outgoing headers
    pub headers: HeaderMap,
}

impl Request {
    /// Create a request with the default headers only
    pub fn new(method: Method, uri: Uri, user_agent: Option<&str>) -> Self {
        Self::with_headers(method, uri, user_agent, RequestHeaders::new())
    }

    /// Create a request, merging caller headers over the defaults
    pub fn with_headers(
        method: Method,
        uri: Uri,
        user_agent: Option<&str>,
        caller: RequestHeaders,
    ) -> Self {
        Self {
            method,
            uri,
            headers: outgoing_headers(user_agent, caller),
        }
    }

    /// Create a GET request
    pub fn get(uri: Uri, user_agent: Option<&str>, caller: RequestHeaders) -> Self {
        Self::with_headers(Method::GET, uri, user_agent, caller)
    }

    /// Create a HEAD request
    pub fn head(uri: Uri, user_agent: Option<&str>, caller: RequestHeaders) -> Self {
        Self::with_headers(Method::HEAD, uri, user_agent, caller)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Path and query as they appear on the request line
    pub fn target(&self) -> String {
        self.uri.request_target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uri::clean;

    #[test]
    fn test_request_creation() {
        let req = Request::new(Method::GET, clean("example.com/path?q=1").unwrap(), None);
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.uri.host(), "example.com");
        assert_eq!(req.target(), "/path?q=1");
        assert!(req.header("accept-encoding").is_some());
    }

    #[test]
    fn test_request_headers() {
        let req = Request::head(
            clean("http://example.com").unwrap(),
            Some("agent"),
            RequestHeaders::from([("X-Custom", "value")]),
        );
        assert_eq!(req.method, Method::HEAD);
        assert_eq!(req.header("x-custom"), Some("value"));
        assert_eq!(req.header("user-agent"), Some("agent"));
    }
}
