// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Media classification by file extension

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::canonical::Uri;

lazy_static! {
    static ref IMAGE_EXTENSIONS: Regex =
        Regex::new(r"(?i)\b(?:jpeg|jpg|gif|png|apng|mng|tiff|svg)\b").unwrap();
    static ref VIDEO_EXTENSIONS: Regex = Regex::new(
        r"(?i)\b(?:avi|mpg|mpeg|m1v|mp2|mp3|mpa|mpe|mpv2|asf|wma|wmv|ivf|rm|ra|ram|mov|qt)\b"
    )
    .unwrap();
}

/// What a URI points at, judged by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Video,
    Neither,
}

impl MediaKind {
    pub fn is_image(&self) -> bool {
        matches!(self, MediaKind::Image)
    }

    pub fn is_video(&self) -> bool {
        matches!(self, MediaKind::Video)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Neither => "neither",
        }
    }
}

/// Classify a URI by the extension of its last path segment
pub fn classify(uri: &Uri) -> MediaKind {
    classify_path(uri.path())
}

/// Classify a bare path
pub fn classify_path(path: &str) -> MediaKind {
    let Some(extension) = extension(path) else {
        return MediaKind::Neither;
    };

    if IMAGE_EXTENSIONS.is_match(&extension) {
        MediaKind::Image
    } else if VIDEO_EXTENSIONS.is_match(&extension) {
        MediaKind::Video
    } else {
        MediaKind::Neither
    }
}

/// Lowercased text after the last `.` of the final segment
///
/// Dotfiles (`.profile`) and trailing dots have no extension.
fn extension(path: &str) -> Option<String> {
    let segment = path.rsplit('/').next()?;
    match segment.rfind('.') {
        Some(0) | None => None,
        Some(idx) if idx + 1 == segment.len() => None,
        Some(idx) => Some(segment[idx + 1..].to_lowercase()),
    }
}
