// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URI layer for bookmarker
//!
//! Cleans raw user input into canonical URIs, resolves `Location` headers
//! and links against the page they came from, and classifies targets by
//! media type.

mod canonical;
mod classify;
mod resolver;

pub use canonical::{IntoUri, Uri};
pub use classify::{classify, classify_path, MediaKind};
pub use resolver::{absolute, clean};
