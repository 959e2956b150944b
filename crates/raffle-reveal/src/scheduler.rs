//! Reveal Scheduler — timed "spinning" phase before a draw is committed
//!
//! ```text
//! Idle ──start──> Spinning(candidate) ──tick (every T, while elapsed < D)──> Spinning(candidate')
//!                        │
//!                        └── elapsed >= D ──> select once ──> Settled(result)
//! Settled ──start──> Spinning
//! ```
//!
//! One reveal runs at a time: `start` is ignored while spinning. Each reveal
//! is a single tokio task driven by an interval timer, so ticks never
//! overlap and the settle step runs exactly once, after the last tick.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use raffle_core::{DrawRequest, DrawResult, ParticipantList, pick_candidate, select};

use crate::timing::RevealTiming;

/// Reveal phase, as shown to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RevealState {
    /// No draw has run yet (or the session was shut down mid-draw)
    #[default]
    Idle,
    /// Draw in progress; `candidate` is display-only
    Spinning { candidate: String },
    /// Draw finished
    Settled(DrawResult),
}

impl RevealState {
    pub fn is_spinning(&self) -> bool {
        matches!(self, Self::Spinning { .. })
    }

    pub fn candidate(&self) -> Option<&str> {
        match self {
            Self::Spinning { candidate } => Some(candidate),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&DrawResult> {
        match self {
            Self::Settled(result) => Some(result),
            _ => None,
        }
    }
}

/// Push notifications for renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    Started { draw: u64, candidate: String },
    Candidate { draw: u64, candidate: String },
    Settled { draw: u64, result: DrawResult },
}

/// Everything a reveal needs, captured when it starts
#[derive(Debug, Clone)]
pub struct DrawJob {
    pub draw: u64,
    pub lottery_name: String,
    pub participants: ParticipantList,
    pub request: DrawRequest,
}

/// Outcome of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStart {
    Started { draw: u64 },
    /// A reveal was already running; nothing changed
    Ignored,
}

/// Called once per draw with the final result
///
/// Runs while the reveal state is write-locked, right before it flips to
/// `Settled`, so readers never see the record without the result. The hook
/// must not call back into the scheduler.
pub type SettleHook = Arc<dyn Fn(&DrawJob, &DrawResult) + Send + Sync>;

/// Reveal state plus the draw that owns it
#[derive(Debug, Default)]
struct Phase {
    reveal: RevealState,
    /// Draw allowed to tick and settle; cleared on settle and shutdown
    active: Option<u64>,
}

struct Shared {
    phase: RwLock<Phase>,
    rng: Arc<Mutex<StdRng>>,
    events: broadcast::Sender<RevealEvent>,
    on_settle: SettleHook,
}

/// Drives reveals for one session
pub struct RevealScheduler {
    timing: RevealTiming,
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
    draw_count: u64,
}

impl RevealScheduler {
    pub fn new(
        timing: RevealTiming,
        rng: Arc<Mutex<StdRng>>,
        event_capacity: usize,
        on_settle: SettleHook,
    ) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));

        Self {
            timing,
            shared: Arc::new(Shared {
                phase: RwLock::new(Phase::default()),
                rng,
                events,
                on_settle,
            }),
            task: None,
            draw_count: 0,
        }
    }

    /// Current state (copy)
    pub fn state(&self) -> RevealState {
        self.shared.phase.read().reveal.clone()
    }

    /// Run `f` with the state read-locked
    ///
    /// The settle hook cannot run until `f` returns, so anything the hook
    /// writes is observed consistently with the state passed to `f`.
    pub fn with_state<T>(&self, f: impl FnOnce(&RevealState) -> T) -> T {
        let phase = self.shared.phase.read();
        f(&phase.reveal)
    }

    pub fn is_spinning(&self) -> bool {
        self.shared.phase.read().reveal.is_spinning()
    }

    pub fn timing(&self) -> &RevealTiming {
        &self.timing
    }

    /// Change timing for subsequent draws; an in-flight reveal keeps its own
    pub fn set_timing(&mut self, timing: RevealTiming) {
        self.timing = timing;
    }

    /// Number of reveals started
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RevealEvent> {
        self.shared.events.subscribe()
    }

    /// Begin a reveal for a validated request
    ///
    /// Ignored while a reveal is spinning. Otherwise the previous result is
    /// replaced by `Spinning` with a first candidate and the timer task is
    /// spawned.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        &mut self,
        lottery_name: String,
        participants: ParticipantList,
        request: DrawRequest,
    ) -> DrawStart {
        let draw = self.draw_count + 1;
        let candidate = {
            let mut phase = self.shared.phase.write();
            if phase.reveal.is_spinning() {
                log::debug!("[Reveal] draw already spinning, request ignored");
                return DrawStart::Ignored;
            }

            let candidate =
                pick_candidate(&participants, &mut *self.shared.rng.lock()).unwrap_or_default();
            phase.reveal = RevealState::Spinning {
                candidate: candidate.clone(),
            };
            phase.active = Some(draw);
            candidate
        };
        self.draw_count = draw;

        let _ = self.shared.events.send(RevealEvent::Started {
            draw,
            candidate,
        });

        log::info!(
            "[Reveal] draw #{} '{}' started: {} winners, {} reserves from {} participants ({} ms)",
            draw,
            lottery_name,
            request.winners,
            request.reserves,
            participants.len(),
            self.timing.duration_ms
        );

        let job = DrawJob {
            draw,
            lottery_name,
            participants,
            request,
        };
        self.task = Some(tokio::spawn(run_reveal(
            job,
            self.timing,
            Arc::clone(&self.shared),
        )));

        DrawStart::Started { draw }
    }

    /// Wait for the current reveal (if any) to settle
    ///
    /// Cancel-safe: if this future is dropped early the task handle stays
    /// with the scheduler, so `shutdown` can still abort the reveal.
    pub async fn wait_settled(&mut self) {
        let Some(handle) = self.task.as_mut() else {
            return;
        };
        let outcome = handle.await;
        self.task = None;

        match outcome {
            Ok(()) => {}
            Err(e) if e.is_panic() => log::error!("[Reveal] reveal task panicked: {}", e),
            Err(_) => log::debug!("[Reveal] reveal task cancelled"),
        }
    }

    /// Abort an in-flight reveal; nothing is recorded for it
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.task.take() {
            handle.abort();
        }

        let mut phase = self.shared.phase.write();
        phase.active = None;
        if phase.reveal.is_spinning() {
            log::info!("[Reveal] draw #{} aborted by shutdown", self.draw_count);
            phase.reveal = RevealState::Idle;
        }
    }
}

impl Drop for RevealScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.task.take() {
            handle.abort();
        }
    }
}

async fn run_reveal(job: DrawJob, timing: RevealTiming, shared: Arc<Shared>) {
    let started = Instant::now();
    let mut ticker = time::interval(timing.tick_interval().max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // First tick completes immediately; the first candidate is already shown
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if started.elapsed() >= timing.duration() {
            break;
        }

        let candidate = {
            let mut rng = shared.rng.lock();
            pick_candidate(&job.participants, &mut *rng)
        };
        let Some(candidate) = candidate else {
            continue;
        };
        {
            let mut phase = shared.phase.write();
            if phase.active != Some(job.draw) {
                log::debug!("[Reveal] draw #{} no longer active, stopping", job.draw);
                return;
            }
            phase.reveal = RevealState::Spinning {
                candidate: candidate.clone(),
            };
        }
        let _ = shared.events.send(RevealEvent::Candidate {
            draw: job.draw,
            candidate,
        });
    }

    let result = {
        let mut rng = shared.rng.lock();
        select(&job.participants, job.request, &mut *rng)
    };

    {
        let mut phase = shared.phase.write();
        if phase.active != Some(job.draw) {
            log::debug!("[Reveal] draw #{} no longer active, not settling", job.draw);
            return;
        }
        (shared.on_settle)(&job, &result);
        phase.reveal = RevealState::Settled(result.clone());
        phase.active = None;
    }

    log::info!(
        "[Reveal] draw #{} settled after {} ms: winners {:?}, reserves {:?}",
        job.draw,
        started.elapsed().as_millis(),
        result.winners,
        result.reserves
    );
    let _ = shared.events.send(RevealEvent::Settled {
        draw: job.draw,
        result,
    });
}
