// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! File-backed index: one JSON document per line

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::document::Document;
use super::query::{Query, Terms, FIELD_WEIGHT, TITLE_PREFIX, URL_PREFIX};
use super::{Hit, Index};
use crate::error::{Error, ErrorContext, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Closed,
    Writing,
    Reading,
}

#[derive(Debug)]
struct Entry {
    document: Document,
    terms: Terms,
}

impl Entry {
    fn new(document: Document) -> Self {
        let mut terms = Terms::new();
        terms.index_text(&document.url, FIELD_WEIGHT, URL_PREFIX);
        terms.index_text(&document.body, 1, "");
        terms.index_text(&document.title, FIELD_WEIGHT, TITLE_PREFIX);
        Self { document, terms }
    }
}

/// Index stored as a JSON-lines file
///
/// Terms are rebuilt in memory when the file is opened.
#[derive(Debug)]
pub struct FileIndex {
    path: PathBuf,
    mode: Mode,
    entries: Vec<Entry>,
    writer: Option<BufWriter<File>>,
}

impl FileIndex {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: Mode::Closed,
            entries: Vec::new(),
            writer: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of documents loaded or added
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn load(&mut self) -> Result<()> {
        self.entries.clear();
        if !self.path.exists() {
            return Ok(());
        }

        let contents = fs::read_to_string(&self.path).context("reading index")?;
        for (n, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let document: Document = serde_json::from_str(line).map_err(|e| {
                Error::index(format!("{}:{}: {}", self.path.display(), n + 1, e))
            })?;
            self.entries.push(Entry::new(document));
        }
        Ok(())
    }
}

impl Index for FileIndex {
    fn open_for_writing(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("creating index directory")?;
        }
        self.load()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .context("opening index for writing")?;
        self.writer = Some(BufWriter::new(file));
        self.mode = Mode::Writing;

        tracing::debug!(path = %self.path.display(), documents = self.entries.len(), "Index open for writing");
        Ok(())
    }

    fn open_for_reading(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Err(Error::index(format!("No index at {}", self.path.display())));
        }
        self.writer = None;
        self.load()?;
        self.mode = Mode::Reading;

        tracing::debug!(path = %self.path.display(), documents = self.entries.len(), "Index open for reading");
        Ok(())
    }

    fn add(&mut self, document: &Document) -> Result<()> {
        let writer = match (self.mode, self.writer.as_mut()) {
            (Mode::Writing, Some(writer)) => writer,
            _ => return Err(Error::index("Index is not open for writing")),
        };

        let line = serde_json::to_string(document)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        self.entries.push(Entry::new(document.clone()));
        Ok(())
    }

    fn query(&self, text: &str, limit: usize) -> Result<Vec<Hit>> {
        if self.mode != Mode::Reading {
            return Err(Error::index("Index is not open for reading"));
        }

        let query = Query::parse(text);
        let mut scored: Vec<(u32, &Entry)> = self
            .entries
            .iter()
            .filter_map(|entry| query.score(&entry.terms).map(|score| (score, entry)))
            .collect();
        // Stable: equal scores keep insertion order
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let best = scored.first().map(|(score, _)| *score).unwrap_or(0);
        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(score, entry)| Hit {
                document: entry.document.clone(),
                score,
                percent: percent(score, best),
            })
            .collect())
    }
}

fn percent(score: u32, best: u32) -> u8 {
    if best == 0 {
        return 100;
    }
    ((score as f64 / best as f64) * 100.0).round() as u8
}
