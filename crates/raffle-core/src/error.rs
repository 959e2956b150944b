//! Error types for draw requests

use thiserror::Error;

/// Reasons a draw request is rejected before anything starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("no participants: enter at least one participant")]
    EmptyParticipants,

    #[error("oversubscribed draw: {requested} picks requested from {available} participants")]
    OversubscribedDraw { requested: usize, available: usize },
}

impl DrawError {
    /// Text shown to the user in the error notice
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyParticipants => "Please enter at least one participant.".to_string(),
            Self::OversubscribedDraw {
                requested,
                available,
            } => format!(
                "Winners plus reserves ({}) cannot exceed the number of participants ({}).",
                requested, available
            ),
        }
    }
}
