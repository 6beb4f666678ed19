// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cleaning raw input into canonical URIs and resolving references
//!
//! Resolution is the path merge a crawler needs for `Location` headers and
//! links, not full RFC 3986 reference resolution.

use url::{ParseError, Url};

use super::canonical::{IntoUri, Uri};

/// Turn raw input into a canonical [`Uri`]
///
/// Already-parsed URIs are returned unchanged. Anything that cannot be
/// parsed yields `None`.
pub fn clean(input: impl IntoUri) -> Option<Uri> {
    input.into_uri()
}

/// Resolve `reference` against `parent`
///
/// Returns `None` for unparseable references and for targets that cannot
/// be fetched (`mailto:`, hostless schemes).
pub fn absolute(reference: &str, parent: &Uri) -> Option<Uri> {
    let reference = reference.trim();
    if reference.chars().any(char::is_control) {
        return None;
    }

    match Url::parse(reference) {
        Ok(url) if url.scheme() == "mailto" => None,
        Ok(url) => Uri::from_url(url),
        Err(ParseError::RelativeUrlWithoutBase) if reference.starts_with("//") => {
            Url::parse(&format!("{}:{}", parent.scheme(), reference))
                .ok()
                .and_then(Uri::from_url)
        }
        Err(ParseError::RelativeUrlWithoutBase) => Some(merge(reference, parent)),
        Err(_) => None,
    }
}

/// Relative reference split into its components
#[derive(Debug, PartialEq, Eq)]
struct Reference<'a> {
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl<'a> Reference<'a> {
    fn split(input: &'a str) -> Self {
        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (input, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };
        Self {
            path,
            query,
            fragment,
        }
    }
}

fn merge(reference: &str, parent: &Uri) -> Uri {
    let reference = Reference::split(reference);
    let path = merge_paths(reference.path, parent.path());

    let mut url = parent.as_url().clone();
    url.set_path(&path);
    url.set_query(reference.query);
    url.set_fragment(reference.fragment);

    // The parent had a host and we only touched path, query and fragment
    Uri::from_url(url).unwrap_or_else(|| parent.clone())
}

/// Merge a relative path with the parent's path
fn merge_paths(reference: &str, parent: &str) -> String {
    if reference.starts_with('/') {
        return reference.to_string();
    }

    let directory = if parent.ends_with('/') {
        parent
    } else {
        dirname(parent)
    };

    let mut path = normalize(&format!("{}/{}", directory, reference));
    if !basename(&path).contains('.') && !path.ends_with('/') {
        path.push('/');
    }
    path
}

/// Everything before the last segment, `/` at the top
fn dirname(path: &str) -> &str {
    match path.trim_end_matches('/').rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// Collapse `.`, `..` and empty segments; never climbs above the root
fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent(s: &str) -> Uri {
        clean(s).unwrap()
    }

    #[test]
    fn test_clean_default_path() {
        assert_eq!(clean("example.com").unwrap().path(), "/");
        assert_eq!(clean("http://example.com").unwrap().path(), "/");
    }

    #[test]
    fn test_clean_idempotent() {
        for input in [
            "example.com",
            "http://smh.com.au",
            "smh.com.au/?poo",
            "https://Example.COM:443/a/../b?x=1#y",
            "localhost:3000",
        ] {
            let once = clean(input).unwrap();
            assert_eq!(clean(&once), Some(once.clone()));
            assert_eq!(clean(once.to_string()), Some(once.clone()));
        }
    }

    #[test]
    fn test_clean_failure() {
        assert_eq!(clean(""), None);
        assert_eq!(clean(None::<String>), None);
        assert_eq!(clean("http://"), None);
    }

    #[test]
    fn test_absolute_relative_file() {
        let uri = absolute("bob", &parent("http://example.com/a/b")).unwrap();
        assert_eq!(uri.as_str(), "http://example.com/a/bob/");

        let uri = absolute("bob.html", &parent("http://example.com/a/b")).unwrap();
        assert_eq!(uri.as_str(), "http://example.com/a/bob.html");

        let uri = absolute("bob", &parent("http://smh.com.au")).unwrap();
        assert_eq!(uri.as_str(), "http://smh.com.au/bob/");
    }

    #[test]
    fn test_absolute_relative_directory() {
        let uri = absolute("one/two/", &parent("http://www.foxsports.com.au/rss")).unwrap();
        assert_eq!(uri.as_str(), "http://www.foxsports.com.au/one/two/");

        let uri = absolute("three", &parent("http://example.com/one/two/")).unwrap();
        assert_eq!(uri.as_str(), "http://example.com/one/two/three/");
    }

    #[test]
    fn test_absolute_dot_segments() {
        let base = parent("http://example.com/a/b/c.html");
        assert_eq!(
            absolute("../d.html", &base).unwrap().as_str(),
            "http://example.com/a/d.html"
        );
        assert_eq!(
            absolute("./e/f.txt", &base).unwrap().as_str(),
            "http://example.com/a/b/e/f.txt"
        );
        assert_eq!(
            absolute("../../../../top", &base).unwrap().as_str(),
            "http://example.com/top/"
        );
        assert_eq!(absolute("..", &base).unwrap().as_str(), "http://example.com/a/");
    }

    #[test]
    fn test_absolute_path_reference() {
        let base = parent("http://example.com:8080/a/b?old=1#old");
        let uri = absolute("/x/y?new=2", &base).unwrap();
        assert_eq!(uri.as_str(), "http://example.com:8080/x/y?new=2");
    }

    #[test]
    fn test_absolute_takes_reference_query_and_fragment() {
        let base = parent("http://example.com/dir/page.html?q=parent#p");
        let uri = absolute("other.html?q=child#c", &base).unwrap();
        assert_eq!(uri.query(), Some("q=child"));
        assert_eq!(uri.fragment(), Some("c"));

        let uri = absolute("other.html", &base).unwrap();
        assert_eq!(uri.query(), None);
        assert_eq!(uri.fragment(), None);
    }

    #[test]
    fn test_absolute_already_absolute() {
        let base = parent("http://example.com/a/b");
        let uri = absolute("https://other.org/feed.xml", &base).unwrap();
        assert_eq!(uri.as_str(), "https://other.org/feed.xml");
    }

    #[test]
    fn test_absolute_scheme_relative() {
        let base = parent("https://example.com/a/b");
        let uri = absolute("//cdn.example.net/lib.js", &base).unwrap();
        assert_eq!(uri.as_str(), "https://cdn.example.net/lib.js");
    }

    #[test]
    fn test_absolute_unfetchable() {
        let base = parent("http://example.com/a/b");
        assert_eq!(absolute("mailto:x@y.com", &base), None);
        assert_eq!(absolute("javascript:void(0)", &base), None);
        assert_eq!(absolute("http://[::1", &base), None);
        assert_eq!(absolute("bad\u{0}path", &base), None);
    }

    #[test]
    fn test_reference_split() {
        assert_eq!(
            Reference::split("a/b?c=d#e"),
            Reference {
                path: "a/b",
                query: Some("c=d"),
                fragment: Some("e"),
            }
        );
        assert_eq!(
            Reference::split("#frag?notquery"),
            Reference {
                path: "",
                query: None,
                fragment: Some("frag?notquery"),
            }
        );
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("/rss"), "/");
        assert_eq!(dirname("/a/b"), "/a");
        assert_eq!(dirname("/a/b/c.html"), "/a/b");
        assert_eq!(dirname("/"), "/");
    }
}
