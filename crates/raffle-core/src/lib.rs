//! # raffle-core — Draw engine for Raffle
//!
//! Turns free-text participant input into a draw result:
//!
//! ```text
//! raw text ──parse──> ParticipantList ──validate(DrawRequest)──> select ──> DrawResult
//! ```
//!
//! Everything in this crate is pure and synchronous. Randomness is injected
//! by the caller so draws can be reproduced from a seed.

mod error;
mod participants;
mod request;
mod selection;

pub use error::*;
pub use participants::*;
pub use request::*;
pub use selection::*;
