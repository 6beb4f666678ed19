// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;

use super::decode::uncompress;
use super::headers::{CONTENT_ENCODING, CONTENT_TYPE, LOCATION};
use crate::error::{Error, Result};
use crate::uri::Uri;

/// How the fetcher treats a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// 2xx
    Success,
    /// 304
    NotModified,
    /// Any other 3xx
    Redirect,
    /// Everything else
    Other,
}

impl StatusKind {
    pub fn of(status: StatusCode) -> Self {
        if status.is_success() {
            StatusKind::Success
        } else if status == StatusCode::NOT_MODIFIED {
            StatusKind::NotModified
        } else if status.is_redirection() {
            StatusKind::Redirect
        } else {
            StatusKind::Other
        }
    }

    /// Success and not-modified end a fetch with a decoded body
    pub fn is_terminal(&self) -> bool {
        matches!(self, StatusKind::Success | StatusKind::NotModified)
    }
}

/// HTTP response representation
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Body exactly as received
    pub body: Bytes,
    /// Body after Content-Encoding decoding, for terminal responses
    pub decoded: Option<Bytes>,
    /// URI that produced this response
    pub location: Uri,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        location: Uri,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            decoded: None,
            location,
            response_time_ms,
        }
    }

    /// Classify the status
    pub fn kind(&self) -> StatusKind {
        StatusKind::of(self.status)
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.kind() == StatusKind::Success
    }

    /// Check if status is 304
    pub fn is_not_modified(&self) -> bool {
        self.kind() == StatusKind::NotModified
    }

    /// Check if status is a redirect the fetcher would follow
    pub fn is_redirect(&self) -> bool {
        self.kind() == StatusKind::Redirect
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Record the effective location in the `location` header
    pub(crate) fn stamp_location(&mut self) {
        if let Ok(value) = HeaderValue::from_str(self.location.as_str()) {
            self.headers.insert(LOCATION, value);
        }
    }

    /// Decode the body according to its Content-Encoding
    pub(crate) fn decode(&mut self) {
        self.decoded = Some(uncompress(&mut self.headers, &self.body));
    }

    /// The URI that actually produced this response
    pub fn effective_location(&self) -> &Uri {
        &self.location
    }

    /// Decoded body when available, raw body otherwise
    pub fn content(&self) -> &Bytes {
        self.decoded.as_ref().unwrap_or(&self.body)
    }

    /// Get content as text
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.content().to_vec()).map_err(|e| Error::Other(e.to_string()))
    }

    /// Get content as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(self.content()).into_owned()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    /// Get content encoding, if still present
    pub fn content_encoding(&self) -> Option<&str> {
        self.header(CONTENT_ENCODING)
    }

    /// Check if content type is HTML
    pub fn is_html(&self) -> bool {
        self.content_type()
            .map(|ct| ct.contains("text/html") || ct.contains("application/xhtml"))
            .unwrap_or(false)
    }
}
