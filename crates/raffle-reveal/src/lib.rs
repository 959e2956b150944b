//! # raffle-reveal — Timed reveal and session control
//!
//! Runs a draw the way the audience sees it: a spinning phase that flashes
//! random participant names, then the committed result.
//!
//! ## Architecture
//!
//! ```text
//! RaffleSession
//!     │
//!     ├── ParticipantList (live input)
//!     ├── RevealScheduler ──spawn──> reveal task (tokio interval)
//!     │                                   │
//!     │                                   ├── RevealEvent broadcast
//!     │                                   └── select() at settle
//!     ├── HistoryLedger (newest first)
//!     └── ErrorReporter (single notice)
//! ```

pub mod config;
pub mod scheduler;
pub mod session;
pub mod timing;

pub use config::*;
pub use scheduler::*;
pub use session::*;
pub use timing::*;

pub use raffle_core::{DrawError, DrawRequest, DrawResult, ParticipantList};
pub use raffle_state::{HistoryEntry, HistoryId};
