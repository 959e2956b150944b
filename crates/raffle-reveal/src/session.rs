//! Raffle session — the controller a presentation shell talks to
//!
//! Owns the live participant list, the reveal scheduler, the history ledger
//! and the error notice for one running instance. Draw requests go through
//! parse → validate → reveal; rejected requests only raise a notice.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use raffle_core::{DrawError, DrawRequest, DrawResult, ParticipantList, parse, validate};
use raffle_state::{ErrorReporter, HistoryEntry, HistoryLedger, display_name};

use crate::config::{ConfigError, RaffleConfig};
use crate::scheduler::{DrawJob, DrawStart, RevealEvent, RevealScheduler, RevealState, SettleHook};
use crate::timing::RevealTiming;

/// Session counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub draws_started: u64,
    pub draws_completed: u64,
    pub winners_drawn: u64,
    pub reserves_drawn: u64,
    /// Requests refused by validation
    pub rejected_requests: u64,
    /// Requests dropped because a reveal was spinning
    pub ignored_requests: u64,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub participant_count: usize,
    pub reveal: RevealState,
    /// Result of the last settled draw, until the next draw starts
    pub latest_result: Option<DrawResult>,
    /// Newest first
    pub history: Vec<HistoryEntry>,
    pub error: Option<String>,
    pub history_open: bool,
    pub stats: SessionStats,
}

struct SessionCore {
    participants: ParticipantList,
    history: HistoryLedger,
    errors: ErrorReporter,
    history_open: bool,
    stats: SessionStats,
}

/// One running raffle instance
pub struct RaffleSession {
    config: RaffleConfig,
    scheduler: RevealScheduler,
    core: Arc<Mutex<SessionCore>>,
}

impl RaffleSession {
    /// Create a session; fails only on an invalid timing configuration
    pub fn new(config: RaffleConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let core = Arc::new(Mutex::new(SessionCore {
            participants: ParticipantList::default(),
            history: HistoryLedger::new(),
            errors: ErrorReporter::new(),
            history_open: false,
            stats: SessionStats::default(),
        }));

        let sink = Arc::clone(&core);
        let on_settle: SettleHook = Arc::new(move |job: &DrawJob, result: &DrawResult| {
            let mut state = sink.lock();
            state
                .history
                .record(&job.lottery_name, result, job.participants.len());
            state.stats.draws_completed += 1;
            state.stats.winners_drawn += result.winners.len() as u64;
            state.stats.reserves_drawn += result.reserves.len() as u64;
        });

        let scheduler = RevealScheduler::new(
            config.timing,
            Arc::new(Mutex::new(rng)),
            config.event_capacity,
            on_settle,
        );

        log::info!(
            "[Session] created ({} profile, {} ms reveal)",
            config.timing.profile.display_name(),
            config.timing.duration_ms
        );

        Ok(Self {
            config,
            scheduler,
            core,
        })
    }

    pub fn config(&self) -> &RaffleConfig {
        &self.config
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Re-parse the participant text after an edit; returns the new count
    pub fn set_participants(&self, raw: &str) -> usize {
        let participants = parse(raw);
        let count = participants.len();
        self.core.lock().participants = participants;
        count
    }

    pub fn participant_count(&self) -> usize {
        self.core.lock().participants.len()
    }

    /// Apply new timing to subsequent draws
    pub fn set_timing(&mut self, timing: RevealTiming) -> Result<(), ConfigError> {
        timing.validate()?;
        self.config.timing = timing;
        self.scheduler.set_timing(timing);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // DRAW
    // ═══════════════════════════════════════════════════════════════════════════

    /// Handle the draw button
    ///
    /// While a reveal is spinning the request is ignored entirely. Otherwise
    /// the participant text is parsed and validated; a rejected request
    /// raises a notice and leaves the reveal state untouched.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    pub fn request_draw(
        &mut self,
        lottery_name: &str,
        raw_participants: &str,
        winners: usize,
        reserves: usize,
    ) -> Result<DrawStart, DrawError> {
        if self.scheduler.is_spinning() {
            self.core.lock().stats.ignored_requests += 1;
            log::debug!("[Session] draw requested while spinning, ignored");
            return Ok(DrawStart::Ignored);
        }

        let participants = parse(raw_participants);
        let request = DrawRequest::new(winners, reserves);

        if let Err(err) = validate(&participants, &request) {
            log::warn!("[Session] draw rejected: {}", err);
            let mut core = self.core.lock();
            core.errors.report(err.user_message());
            core.stats.rejected_requests += 1;
            return Err(err);
        }
        self.core.lock().participants = participants.clone();

        let name = display_name(lottery_name, &self.config.default_lottery_name);
        let outcome = self.scheduler.start(name, participants, request);
        if let DrawStart::Started { .. } = outcome {
            self.core.lock().stats.draws_started += 1;
        }
        Ok(outcome)
    }

    /// Wait until the in-flight reveal (if any) settles
    pub async fn wait_settled(&mut self) {
        self.scheduler.wait_settled().await;
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RevealEvent> {
        self.scheduler.subscribe()
    }

    pub fn reveal_state(&self) -> RevealState {
        self.scheduler.state()
    }

    pub fn is_spinning(&self) -> bool {
        self.scheduler.is_spinning()
    }

    pub fn latest_result(&self) -> Option<DrawResult> {
        self.scheduler.state().result().cloned()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // HISTORY & NOTICES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Completed draws, newest first
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.core.lock().history.list()
    }

    /// Ledger as JSON, for hosts that keep it elsewhere
    pub fn export_history(&self) -> serde_json::Result<String> {
        self.core.lock().history.to_json()
    }

    pub fn error_message(&self) -> Option<String> {
        self.core.lock().errors.message().map(str::to_owned)
    }

    pub fn dismiss_error(&self) {
        self.core.lock().errors.dismiss();
    }

    pub fn open_history(&self) {
        self.core.lock().history_open = true;
    }

    pub fn close_history(&self) {
        self.core.lock().history_open = false;
    }

    pub fn stats(&self) -> SessionStats {
        self.core.lock().stats.clone()
    }

    /// Observable state for rendering
    ///
    /// The reveal state stays locked while the ledger is read, so a settled
    /// draw and its history entry always appear in the same frame.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.scheduler.with_state(|reveal| {
            let core = self.core.lock();

            SessionSnapshot {
                participant_count: core.participants.len(),
                reveal: reveal.clone(),
                latest_result: reveal.result().cloned(),
                history: core.history.list(),
                error: core.errors.message().map(str::to_owned),
                history_open: core.history_open,
                stats: core.stats.clone(),
            }
        })
    }

    /// Stop any in-flight reveal before the session goes away
    pub fn shutdown(&mut self) {
        self.scheduler.shutdown();
        log::info!("[Session] shut down");
    }
}
