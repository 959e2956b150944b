//! Error notices
//!
//! At most one notice is visible at a time. A new report replaces the
//! current one; notices stay until dismissed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-visible message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

/// Single-slot notification channel
#[derive(Debug, Default)]
pub struct ErrorReporter {
    active: Option<Notice>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`, replacing any active notice
    pub fn report(&mut self, message: impl Into<String>) {
        let message = message.into();
        if let Some(previous) = &self.active {
            log::debug!("[Notice] replacing '{}'", previous.message);
        }
        log::info!("[Notice] {}", message);

        self.active = Some(Notice {
            message,
            raised_at: Utc::now(),
        });
    }

    /// Clear the active notice, returning it
    pub fn dismiss(&mut self) -> Option<Notice> {
        self.active.take()
    }

    pub fn current(&self) -> Option<&Notice> {
        self.active.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.active.as_ref().map(|n| n.message.as_str())
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
