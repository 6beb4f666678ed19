// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Bookmarker - fetch and index bookmarked pages
//!
//! Turns whatever a user typed into a canonical URI, fetches it over HTTP
//! following redirects, decodes compressed bodies and hands the result to a
//! full-text index.
//!
//! ## Features
//!
//! - Forgiving URI cleaning: `example.com`, `//host/x`, `host:8080/x`
//! - Relative resolution for `Location` headers and links
//! - Media classification by extension (image / video)
//! - Bounded redirect following with per-hop timeouts
//! - Conditional requests from stored `Last-Modified` / `ETag`
//! - gzip / deflate decoding that tolerates lying servers
//! - JSON-lines index with field filters and ranked queries
//!
//! ## Example
//!
//! ```rust,no_run
//! use bookmarker::{HttpClient, HttpClientConfig, RequestHeaders};
//!
//! fn main() -> bookmarker::Result<()> {
//!     let client = HttpClient::with_config(HttpClientConfig::for_crawling())?;
//!     let headers = RequestHeaders::from([("ETag", "d78447-31f40-14582640")]);
//!
//!     if let Some(response) = client.get("smh.com.au", headers)? {
//!         println!("{} from {}", response.status, response.effective_location());
//!         println!("{} bytes", response.content().len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod index;
pub mod uri;

// Errors
pub use error::{Error, ErrorContext, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, Request, RequestHeaders, Response, StatusKind};

// URI
pub use uri::{absolute, classify, clean, IntoUri, MediaKind, Uri};

// Index
pub use index::{Document, FileIndex, Hit, Index};

/// Bookmarker version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
