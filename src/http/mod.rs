// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP retrieval layer for bookmarker
//!
//! A blocking client that follows redirects itself, re-resolving each
//! `Location` against the URI that produced it, and decodes compressed
//! bodies with a forgiving fallback.

mod client;
mod decode;
mod header_map;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig, DEFAULT_REDIRECT_LIMIT};
pub use decode::uncompress;
pub use header_map::{
    outgoing_headers, RequestHeaders, DEFAULT_ACCEPT_CHARSET, DEFAULT_ACCEPT_ENCODING,
    DEFAULT_ACCEPT_LANGUAGE,
};
pub use request::Request;
pub use response::{Response, StatusKind};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Header names used by the fetcher
pub mod headers {
    pub const ACCEPT_CHARSET: &str = "accept-charset";
    pub const ACCEPT_ENCODING: &str = "accept-encoding";
    pub const ACCEPT_LANGUAGE: &str = "accept-language";
    pub const CONTENT_ENCODING: &str = "content-encoding";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const ETAG: &str = "etag";
    pub const IF_MODIFIED_SINCE: &str = "if-modified-since";
    pub const LAST_MODIFIED: &str = "last-modified";
    pub const LOCATION: &str = "location";
    pub const USER_AGENT: &str = "user-agent";
}
