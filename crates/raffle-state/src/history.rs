//! History Ledger
//!
//! Append-only record of completed draws for the session:
//! - Newest entry first
//! - Entries are frozen once recorded
//! - Reads hand out copies or shared references, never mutable access
//! - JSON export so a host can keep the log elsewhere

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use raffle_core::DrawResult;

/// Label used when a draw has no name
pub const DEFAULT_LOTTERY_NAME: &str = "Untitled Raffle";

// ============ History Entry ============

/// Unique, strictly increasing entry identifier (creation time in ns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HistoryId(pub u64);

impl HistoryId {
    /// Id from the current clock
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0).max(0) as u64)
    }

    /// Id from the current clock, bumped past `previous` if the clock has
    /// not moved (or moved backwards) since it was issued
    pub fn after(previous: Option<HistoryId>) -> Self {
        let now = Self::now();
        match previous {
            Some(prev) if now <= prev => Self(prev.0.saturating_add(1)),
            _ => now,
        }
    }
}

/// One completed draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub created_at: DateTime<Utc>,
    /// Display label, never blank
    pub lottery_name: String,
    pub winners: Vec<String>,
    pub reserves: Vec<String>,
    /// Participant count at draw time
    pub total_participants: usize,
}

impl HistoryEntry {
    pub fn new(
        id: HistoryId,
        lottery_name: &str,
        result: &DrawResult,
        total_participants: usize,
    ) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            lottery_name: display_name(lottery_name, DEFAULT_LOTTERY_NAME),
            winners: result.winners.clone(),
            reserves: result.reserves.clone(),
            total_participants,
        }
    }

    /// The recorded result
    pub fn result(&self) -> DrawResult {
        DrawResult {
            winners: self.winners.clone(),
            reserves: self.reserves.clone(),
        }
    }

    pub fn formatted_time(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Trimmed name, or `fallback` when blank
pub fn display_name(name: &str, fallback: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

// ============ History Ledger ============

/// Draw history, newest first
#[derive(Debug, Default)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for the next entry; strictly greater than every id issued so far
    pub fn next_id(&self) -> HistoryId {
        HistoryId::after(self.entries.front().map(|e| e.id))
    }

    /// Prepend an entry
    pub fn append(&mut self, entry: HistoryEntry) {
        log::debug!(
            "[Ledger] recorded '{}' ({} winners, {} reserves)",
            entry.lottery_name,
            entry.winners.len(),
            entry.reserves.len()
        );
        self.entries.push_front(entry);
    }

    /// Build and prepend an entry for a settled draw
    pub fn record(
        &mut self,
        lottery_name: &str,
        result: &DrawResult,
        total_participants: usize,
    ) -> HistoryEntry {
        let entry = HistoryEntry::new(self.next_id(), lottery_name, result, total_participants);
        self.append(entry.clone());
        entry
    }

    /// Copies of all entries, newest first
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: HistoryId) -> Option<HistoryEntry> {
        self.entries.iter().find(|e| e.id == id).cloned()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize all entries, newest first
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

// ============ Tests ============
