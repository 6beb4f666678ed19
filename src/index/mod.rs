// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Full-text index for fetched pages
//!
//! The fetcher never looks inside an index; it only produces
//! [`Document`]s. [`FileIndex`] is the bundled backend.

mod document;
mod query;
mod store;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use document::{extract_title, Document};
pub use query::{tokenize, Query};
pub use store::FileIndex;

/// A ranked query result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub document: Document,
    pub score: u32,
    /// Score relative to the best hit
    pub percent: u8,
}

/// Store that documents are added to and queried from
pub trait Index {
    /// Prepare for [`add`](Index::add), creating the index if needed
    fn open_for_writing(&mut self) -> Result<()>;

    /// Prepare for [`query`](Index::query)
    fn open_for_reading(&mut self) -> Result<()>;

    fn add(&mut self, document: &Document) -> Result<()>;

    /// Best `limit` matches for `text`, highest score first
    fn query(&self, text: &str, limit: usize) -> Result<Vec<Hit>>;
}
