//! Field relevance scoring.
//!
//! A field is scored against the query with a fixed ladder where the first
//! matching rule wins:
//!
//! | rule                                   | score |
//! |----------------------------------------|-------|
//! | whole field equals the query           | 100   |
//! | field starts with the query            | 90    |
//! | query appears as a whole word          | 70    |
//! | query appears anywhere                 | 50    |
//! | +20 per query word found, at most 40   | 0-40  |
//!
//! The partial multi-word tier is capped below the plain substring tier on
//! purpose; ranking stays compatible with existing result orderings.

use log::debug;
use regex::Regex;

pub const EXACT: u32 = 100;
pub const PREFIX: u32 = 90;
pub const WHOLE_WORD: u32 = 70;
pub const SUBSTRING: u32 = 50;
pub const PER_WORD: u32 = 20;
pub const PARTIAL_CAP: u32 = 40;

/// A query prepared once and scored against many fields.
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    lower: String,
    word_boundary: Option<Regex>,
    words: Vec<String>,
}

impl QueryMatcher {
    pub fn new(query: &str) -> Self {
        let lower = query.to_lowercase();
        let word_boundary = if lower.is_empty() {
            None
        } else {
            // The query is user input: escape it so it is matched literally.
            // `\b` is Unicode-aware, so letters such as `é` and `ï` are word
            // characters, not boundaries.
            match Regex::new(&format!(r"\b{}\b", regex::escape(&lower))) {
                Ok(re) => Some(re),
                Err(e) => {
                    debug!("whole-word regex unavailable, scanning instead: {e}");
                    None
                }
            }
        };
        let words = lower.split_whitespace().map(str::to_string).collect();
        Self {
            lower,
            word_boundary,
            words,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Score `text` in `[0, 100]`. Empty text or an empty query scores 0.
    pub fn score(&self, text: &str) -> u32 {
        if text.is_empty() || self.lower.is_empty() {
            return 0;
        }
        let text = text.to_lowercase();

        if text == self.lower {
            return EXACT;
        }
        if text.starts_with(&self.lower) {
            return PREFIX;
        }
        let whole_word = match &self.word_boundary {
            Some(re) => re.is_match(&text),
            None => contains_whole_word(&text, &self.lower),
        };
        if whole_word {
            return WHOLE_WORD;
        }
        if text.contains(&self.lower) {
            return SUBSTRING;
        }

        let partial: u32 = self
            .words
            .iter()
            .filter(|w| text.contains(w.as_str()))
            .map(|_| PER_WORD)
            .sum();
        partial.min(PARTIAL_CAP)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Same test as `\b{needle}\b` without a compiled regex: some occurrence of
/// `needle` must sit on a word/non-word transition at both of its ends.
fn contains_whole_word(text: &str, needle: &str) -> bool {
    let (Some(first), Some(last)) = (needle.chars().next(), needle.chars().next_back()) else {
        return false;
    };
    let mut from = 0;
    while let Some(pos) = text[from..].find(needle) {
        let i = from + pos;
        let before = text[..i].chars().next_back();
        let after = text[i + needle.len()..].chars().next();
        let starts = before.map_or(false, is_word_char) != is_word_char(first);
        let ends = after.map_or(false, is_word_char) != is_word_char(last);
        if starts && ends {
            return true;
        }
        // Occurrences may overlap, so resume one character in.
        from = i + first.len_utf8();
    }
    false
}

/// Score a single field. Prefer [`QueryMatcher`] when scoring many fields
/// against the same query.
pub fn score(text: &str, query: &str) -> u32 {
    QueryMatcher::new(query).score(text)
}
