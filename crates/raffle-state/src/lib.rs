//! raffle-state: History ledger and error notices
//!
//! Session-scoped state that outlives a single draw.

mod history;
mod notice;

pub use history::*;
pub use notice::*;
