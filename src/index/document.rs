// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Documents handed to an index

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::http::Response;

lazy_static! {
    static ref TITLE: Regex = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// A fetched page ready for indexing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub title: String,
    pub body: String,
}

impl Document {
    pub fn new(url: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Build a document from a terminal response
    ///
    /// The URL is the effective location, not the one originally asked for.
    /// Pages without a `<title>` get an empty one.
    pub fn from_response(response: &Response) -> Self {
        let body = response.text_lossy();
        let title = extract_title(&body).unwrap_or_default();
        Self {
            url: response.effective_location().to_string(),
            title,
            body,
        }
    }
}

/// Text of the first `<title>` element, whitespace collapsed
pub fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE.captures(html)?.get(1)?.as_str();
    let title = WHITESPACE.replace_all(raw.trim(), " ").into_owned();
    (!title.is_empty()).then_some(title)
}
