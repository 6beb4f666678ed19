// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Term generation and the query language
//!
//! Free terms are OR-ed and scored against body terms. `AND` and `NOT`
//! bind their neighbours into one clause (`a NOT b` is `a` without `b`);
//! `OR` is the default and may be written out. `"quoted words"` and
//! hyphenated words match as phrases. `title:` and `url:` are boolean
//! filters that never add to the score. `+term` is required, `-term`
//! excluded, `term*` matches any body term with that prefix.

use std::collections::HashMap;

/// Prefix for title terms
pub const TITLE_PREFIX: &str = "S";
/// Prefix for URL terms
pub const URL_PREFIX: &str = "T";

/// Weight of one occurrence of a title or URL term
pub const FIELD_WEIGHT: u32 = 10;

/// Positions skipped between indexed fields so phrases never span two
const FIELD_GAP: u32 = 100;

/// Lowercased alphanumeric runs
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Weighted, positioned terms of one document
#[derive(Debug, Clone, Default)]
pub struct Terms {
    weights: HashMap<String, u32>,
    positions: HashMap<String, Vec<u32>>,
    next_position: u32,
}

impl Terms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every token of `text` under `prefix`
    pub fn index_text(&mut self, text: &str, weight: u32, prefix: &str) {
        for token in tokenize(text) {
            let term = format!("{}{}", prefix, token);
            *self.weights.entry(term.clone()).or_default() += weight;
            self.positions
                .entry(term)
                .or_default()
                .push(self.next_position);
            self.next_position += 1;
        }
        self.next_position += FIELD_GAP;
    }

    /// Accumulated weight of `term`, 0 when absent
    pub fn weight(&self, term: &str) -> u32 {
        self.weights.get(term).copied().unwrap_or(0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.weights.contains_key(term)
    }

    fn positions(&self, term: &str) -> &[u32] {
        self.positions.get(term).map(Vec::as_slice).unwrap_or_default()
    }

    fn prefix_weight(&self, prefix: &str) -> u32 {
        self.weights
            .iter()
            .filter(|(term, _)| term.starts_with(prefix))
            .map(|(_, weight)| *weight)
            .sum()
    }

    /// Whether `words` occur at consecutive positions
    fn has_phrase(&self, words: &[String]) -> bool {
        let Some((first, rest)) = words.split_first() else {
            return false;
        };
        self.positions(first).iter().any(|&start| {
            rest.iter()
                .zip(start + 1..)
                .all(|(word, position)| self.positions(word).contains(&position))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Exact(String),
    Prefix(String),
    Phrase(Vec<String>),
}

impl Pattern {
    fn from_tokens(mut tokens: Vec<String>, wildcard: bool) -> Option<Self> {
        match tokens.len() {
            0 => None,
            1 => {
                let token = tokens.remove(0);
                Some(if wildcard {
                    Pattern::Prefix(token)
                } else {
                    Pattern::Exact(token)
                })
            }
            _ => Some(Pattern::Phrase(tokens)),
        }
    }

    fn weight(&self, terms: &Terms) -> u32 {
        match self {
            Pattern::Exact(term) => terms.weight(term),
            Pattern::Prefix(prefix) => terms.prefix_weight(prefix),
            Pattern::Phrase(words) if terms.has_phrase(words) => {
                words.iter().map(|w| terms.weight(w)).sum()
            }
            Pattern::Phrase(_) => 0,
        }
    }
}

/// Operands joined by `AND` / `NOT`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Clause {
    all: Vec<Pattern>,
    none: Vec<Pattern>,
}

impl Clause {
    fn new(pattern: Pattern) -> Self {
        Self {
            all: vec![pattern],
            none: Vec::new(),
        }
    }

    fn score(&self, terms: &Terms) -> Option<u32> {
        if self.none.iter().any(|p| p.weight(terms) > 0) {
            return None;
        }
        self.all.iter().try_fold(0, |score, pattern| {
            match pattern.weight(terms) {
                0 => None,
                weight => Some(score + weight),
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    And,
    Not,
}

/// One whitespace-separated query word, quotes kept together
#[derive(Debug, PartialEq, Eq)]
struct Word<'a> {
    sign: Option<char>,
    field: Option<&'a str>,
    value: &'a str,
}

impl<'a> Word<'a> {
    fn parse(raw: &'a str) -> Self {
        let (sign, rest) = match raw.chars().next() {
            Some(c @ ('+' | '-')) if raw.len() > 1 => (Some(c), &raw[1..]),
            _ => (None, raw),
        };

        let quote = rest.find('"').unwrap_or(rest.len());
        match rest.find(':') {
            Some(colon) if colon < quote => Word {
                sign,
                field: Some(&rest[..colon]),
                value: &rest[colon + 1..],
            },
            _ => Word {
                sign,
                field: None,
                value: rest,
            },
        }
    }

    fn is_quoted(&self) -> bool {
        self.value.contains('"')
    }

    fn pattern(&self) -> Option<Pattern> {
        let wildcard = !self.is_quoted() && self.value.ends_with('*');
        Pattern::from_tokens(tokenize(self.value).collect(), wildcard)
    }
}

fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = None;
    let mut quoted = false;

    for (i, c) in text.char_indices() {
        if c == '"' {
            quoted = !quoted;
        }
        if c.is_whitespace() && !quoted {
            if let Some(s) = start.take() {
                words.push(&text[s..i]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push(&text[s..]);
    }
    words
}

/// A parsed query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    clauses: Vec<Clause>,
    required: Vec<Pattern>,
    excluded: Vec<Pattern>,
    filters: Vec<String>,
}

impl Query {
    pub fn parse(text: &str) -> Self {
        let mut query = Query::default();
        let mut current: Option<Clause> = None;
        let mut link: Option<Link> = None;

        for raw in split_words(text) {
            match raw {
                "AND" => {
                    if current.is_some() {
                        link = Some(Link::And);
                    }
                    continue;
                }
                "NOT" => {
                    link = Some(Link::Not);
                    continue;
                }
                "OR" => {
                    link = None;
                    continue;
                }
                _ => {}
            }

            let word = Word::parse(raw);

            if let Some(field) = word.field {
                let prefix = match field.to_ascii_lowercase().as_str() {
                    "title" => Some(TITLE_PREFIX),
                    "url" => Some(URL_PREFIX),
                    _ => None,
                };
                if let Some(prefix) = prefix {
                    let negated = word.sign == Some('-') || link == Some(Link::Not);
                    for token in tokenize(word.value) {
                        let term = format!("{}{}", prefix, token);
                        if negated {
                            query.excluded.push(Pattern::Exact(term));
                        } else {
                            query.filters.push(term);
                        }
                    }
                    link = None;
                    continue;
                }
            }

            let Some(pattern) = word.pattern() else {
                continue;
            };
            match (word.sign, link.take()) {
                (Some('+'), _) => query.required.push(pattern),
                (Some('-'), _) => query.excluded.push(pattern),
                (_, Some(link)) => match (link, current.as_mut()) {
                    (Link::And, Some(clause)) => clause.all.push(pattern),
                    (Link::Not, Some(clause)) => clause.none.push(pattern),
                    // Leading NOT has nothing to subtract from
                    (Link::Not, None) => query.excluded.push(pattern),
                    (Link::And, None) => current = Some(Clause::new(pattern)),
                },
                _ => {
                    query.clauses.extend(current.take());
                    current = Some(Clause::new(pattern));
                }
            }
        }

        query.clauses.extend(current);
        query
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.required.is_empty() && self.filters.is_empty()
    }

    /// Score a document's terms, `None` when it does not match
    pub fn score(&self, terms: &Terms) -> Option<u32> {
        if self.is_empty() {
            return None;
        }
        if !self.filters.iter().all(|f| terms.contains(f)) {
            return None;
        }
        if self.excluded.iter().any(|p| p.weight(terms) > 0) {
            return None;
        }

        let mut score = 0;
        for pattern in &self.required {
            match pattern.weight(terms) {
                0 => return None,
                weight => score += weight,
            }
        }

        let matched: Vec<u32> = self
            .clauses
            .iter()
            .filter_map(|clause| clause.score(terms))
            .collect();
        if matched.is_empty() && self.required.is_empty() && !self.clauses.is_empty() {
            return None;
        }

        Some(score + matched.iter().sum::<u32>())
    }
}
