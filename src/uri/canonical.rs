// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Canonical URI type and the strict/heuristic parsers behind it

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::error::{Error, Result};

lazy_static! {
    /// `http://`, `https://`, `feed://`, ...
    static ref SCHEME_PREFIX: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*://").unwrap();
    /// `mailto:x`, `javascript:x` but not `localhost:8080`
    static ref OPAQUE_SCHEME: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*:[^/0-9]").unwrap();
}

/// A parsed, normalized URI with a host and a non-empty path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uri(Url);

impl Uri {
    /// Wrap a parsed URL, rejecting anything without a host
    pub fn from_url(mut url: Url) -> Option<Self> {
        match url.host_str() {
            Some(host) if !host.is_empty() => {}
            _ => return None,
        }
        if url.path().is_empty() {
            url.set_path("/");
        }
        Some(Self(url))
    }

    /// Parse input that starts with an explicit `scheme://` prefix
    pub fn parse_strict(input: &str) -> Option<Self> {
        Url::parse(input.trim()).ok().and_then(Self::from_url)
    }

    /// Best-effort parse for bare domains and partial strings
    pub fn parse_heuristic(input: &str) -> Option<Self> {
        let input = input.trim().replace('\\', "/");
        if input.is_empty() {
            return None;
        }

        let candidate = if input.starts_with("//") {
            format!("http:{}", input)
        } else if SCHEME_PREFIX.is_match(&input) || OPAQUE_SCHEME.is_match(&input) {
            input
        } else {
            format!("http://{}", input)
        };

        Url::parse(&candidate).ok().and_then(Self::from_url)
    }

    /// Parse with the strict parser when a scheme prefix is present,
    /// the heuristic one otherwise
    pub fn parse(input: &str) -> Option<Self> {
        if SCHEME_PREFIX.is_match(input.trim_start()) {
            Self::parse_strict(input)
        } else {
            Self::parse_heuristic(input)
        }
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Whether the fetcher can retrieve this URI
    pub fn is_http(&self) -> bool {
        matches!(self.scheme(), "http" | "https")
    }

    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    /// Explicit port, or the scheme's default
    pub fn port(&self) -> Option<u16> {
        self.0.port_or_known_default()
    }

    pub fn path(&self) -> &str {
        self.0.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.0.query()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.0.fragment()
    }

    /// Path plus query, as sent on the request line
    pub fn request_target(&self) -> String {
        match self.query() {
            Some(query) => format!("{}?{}", self.path(), query),
            None => self.path().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uri::parse(s).ok_or_else(|| Error::invalid_uri(s))
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Anything the resolver can turn into a canonical [`Uri`]
pub trait IntoUri {
    fn into_uri(self) -> Option<Uri>;
}

impl IntoUri for Uri {
    fn into_uri(self) -> Option<Uri> {
        Some(self)
    }
}

impl IntoUri for &Uri {
    fn into_uri(self) -> Option<Uri> {
        Some(self.clone())
    }
}

impl IntoUri for &str {
    fn into_uri(self) -> Option<Uri> {
        Uri::parse(self)
    }
}

impl IntoUri for String {
    fn into_uri(self) -> Option<Uri> {
        Uri::parse(&self)
    }
}

impl IntoUri for &String {
    fn into_uri(self) -> Option<Uri> {
        Uri::parse(self)
    }
}

impl IntoUri for Url {
    fn into_uri(self) -> Option<Uri> {
        Uri::from_url(self)
    }
}

impl<T: IntoUri> IntoUri for Option<T> {
    fn into_uri(self) -> Option<Uri> {
        self.and_then(IntoUri::into_uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_parse() {
        let uri = Uri::parse("http://smh.com.au:8080/news?id=1#top").unwrap();
        assert_eq!(uri.scheme(), "http");
        assert_eq!(uri.host(), "smh.com.au");
        assert_eq!(uri.port(), Some(8080));
        assert_eq!(uri.path(), "/news");
        assert_eq!(uri.query(), Some("id=1"));
        assert_eq!(uri.fragment(), Some("top"));
        assert_eq!(uri.request_target(), "/news?id=1");
    }

    #[test]
    fn test_heuristic_parse() {
        assert_eq!(Uri::parse("smh.com.au").unwrap().as_str(), "http://smh.com.au/");
        assert_eq!(
            Uri::parse("www.smh.com.au").unwrap().as_str(),
            "http://www.smh.com.au/"
        );
        assert_eq!(
            Uri::parse("smh.com.au/?poo").unwrap().as_str(),
            "http://smh.com.au/?poo"
        );
        assert_eq!(
            Uri::parse("//cdn.example.com/a.js").unwrap().as_str(),
            "http://cdn.example.com/a.js"
        );
        assert_eq!(
            Uri::parse("localhost:8080/status").unwrap().as_str(),
            "http://localhost:8080/status"
        );
        assert_eq!(
            Uri::parse("  example.com\\docs  ").unwrap().as_str(),
            "http://example.com/docs"
        );
    }

    #[test]
    fn test_unparseable() {
        assert!(Uri::parse("").is_none());
        assert!(Uri::parse("   ").is_none());
        assert!(Uri::parse("http://").is_none());
        assert!(Uri::parse("mailto:someone@example.com").is_none());
        assert!(Uri::parse("not a domain").is_none());
        assert!("http://".parse::<Uri>().is_err());
    }

    #[test]
    fn test_is_http() {
        assert!(Uri::parse("example.com").unwrap().is_http());
        assert!(Uri::parse("HTTPS://example.com/").unwrap().is_http());
        let ftp = Uri::parse("ftp://files.example.com/pub").unwrap();
        assert_eq!(ftp.host(), "files.example.com");
        assert!(!ftp.is_http());
    }

    #[test]
    fn test_empty_path_normalized() {
        let uri = Uri::parse("foo://example.com").unwrap();
        assert_eq!(uri.path(), "/");
    }

    #[test]
    fn test_into_uri() {
        let uri = Uri::parse("example.com").unwrap();
        assert_eq!((&uri).into_uri(), Some(uri.clone()));
        assert_eq!(uri.clone().into_uri(), Some(uri.clone()));
        assert_eq!(String::from("example.com").into_uri(), Some(uri.clone()));
        assert_eq!(None::<&str>.into_uri(), None);
    }
}
