// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Case-insensitive caller headers and the outgoing header merge

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::headers;

/// Header names and values supplied by a caller
///
/// Names are lowercased on the way in, so `ETag`, `etag` and `Etag` are the
/// same key. A later insert under the same name replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: BTreeMap<String, String>,
}

impl RequestHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, returning the previous value for that name
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.entries
            .insert(name.as_ref().to_ascii_lowercase(), value.into())
    }

    /// Chaining form of [`insert`](Self::insert)
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(&name.to_ascii_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(lowercased name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RequestHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl<K: AsRef<str>, V: Into<String>, const N: usize> From<[(K, V); N]> for RequestHeaders {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Defaults sent with every request
pub const DEFAULT_ACCEPT_ENCODING: &str = "gzip;q=1.0,deflate;q=0.6,identity;q=0.3";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-us,en;q=0.5";
pub const DEFAULT_ACCEPT_CHARSET: &str = "ISO-8859-1,utf-8;q=0.7,*;q=0.7";

/// Build the headers for one outgoing request
///
/// Defaults first, then the user agent, then the conditional headers
/// derived from the caller's `last-modified` and `etag`, then everything
/// else the caller supplied. Caller headers override defaults.
pub fn outgoing_headers(user_agent: Option<&str>, mut caller: RequestHeaders) -> HeaderMap {
    let mut map = HeaderMap::new();
    map.insert(
        headers::ACCEPT_ENCODING,
        HeaderValue::from_static(DEFAULT_ACCEPT_ENCODING),
    );
    map.insert(
        headers::ACCEPT_LANGUAGE,
        HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
    );
    map.insert(
        headers::ACCEPT_CHARSET,
        HeaderValue::from_static(DEFAULT_ACCEPT_CHARSET),
    );

    if let Some(agent) = user_agent {
        set(&mut map, headers::USER_AGENT, agent);
    }

    if let Some(last_modified) = caller.remove(headers::LAST_MODIFIED) {
        set(&mut map, headers::IF_MODIFIED_SINCE, &last_modified);
    }
    if let Some(etag) = caller.remove(headers::ETAG) {
        set(&mut map, headers::ETAG, &etag);
    }

    for (name, value) in caller.iter() {
        set(&mut map, name, value);
    }

    map
}

fn set(map: &mut HeaderMap, name: &str, value: &str) {
    match (
        HeaderName::from_bytes(name.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(name), Ok(value)) => {
            map.insert(name, value);
        }
        _ => tracing::warn!(header = name, "Dropping invalid request header"),
    }
}
