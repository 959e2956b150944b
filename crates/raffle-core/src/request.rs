//! Draw requests and validation

use serde::{Deserialize, Serialize};

use crate::error::DrawError;
use crate::participants::ParticipantList;

/// How many winners and reserves to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawRequest {
    /// Primary picks (at least 1)
    pub winners: usize,
    /// Backup picks, disjoint from winners
    pub reserves: usize,
}

impl DrawRequest {
    pub fn new(winners: usize, reserves: usize) -> Self {
        Self { winners, reserves }
    }

    /// One winner, no reserves
    pub fn single() -> Self {
        Self::new(1, 0)
    }

    /// Total picks requested
    pub fn total(&self) -> usize {
        self.winners.saturating_add(self.reserves)
    }

    /// Clamp both counts the way the input form does
    ///
    /// Winners are clamped into `[1, available]` first, then reserves into
    /// `[0, available - winners]`. With no participants, winners stays at 1
    /// and reserves drops to 0; validation still rejects that request.
    pub fn clamped(self, available: usize) -> Self {
        let winners = self.winners.clamp(1, available.max(1));
        let reserves = self.reserves.min(available.saturating_sub(winners));
        Self { winners, reserves }
    }
}

impl Default for DrawRequest {
    fn default() -> Self {
        Self::single()
    }
}

/// Check a request against the current participant list
///
/// Only two checks, in this order: the list must not be empty, and the
/// request must not ask for more picks than there are entries.
pub fn validate(list: &ParticipantList, request: &DrawRequest) -> Result<(), DrawError> {
    if list.is_empty() {
        return Err(DrawError::EmptyParticipants);
    }

    if request.total() > list.len() {
        return Err(DrawError::OversubscribedDraw {
            requested: request.total(),
            available: list.len(),
        });
    }

    Ok(())
}
