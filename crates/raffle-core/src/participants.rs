//! Participant parsing
//!
//! Raw input is free text with one participant identifier per line. Lines
//! are trimmed and blank lines dropped; duplicates are kept and stay
//! distinct by their position in the list.

use std::ops::Index;
use std::sync::Arc;

/// Ordered, immutable list of participant identifiers
///
/// Cloning is cheap: the entries are shared, so a reveal task can hold the
/// list it was started with while the input layer parses a new one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParticipantList {
    entries: Arc<[String]>,
}

impl ParticipantList {
    /// Parse raw input text. Never fails; empty input yields an empty list.
    pub fn parse(raw: &str) -> Self {
        let entries: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();

        Self {
            entries: entries.into(),
        }
    }

    /// Number of entries (duplicates counted)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.entries.get(position).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    /// Render back to the one-per-line text form
    pub fn to_text(&self) -> String {
        self.entries.join("\n")
    }
}

impl Index<usize> for ParticipantList {
    type Output = str;

    fn index(&self, position: usize) -> &str {
        &self.entries[position]
    }
}

impl From<Vec<String>> for ParticipantList {
    fn from(entries: Vec<String>) -> Self {
        Self {
            entries: entries.into(),
        }
    }
}

/// Parse raw participant input (see [`ParticipantList::parse`])
pub fn parse(raw: &str) -> ParticipantList {
    ParticipantList::parse(raw)
}
