//! Solving lifecycle and polling loop.
//!
//! [`SchedulePoller`] owns the only timer in the crate. It drives the
//! Idle → Solving → Idle state machine against the external engine,
//! refreshes the timetable snapshot at a fixed interval while a solve is
//! running, and rebuilds the grid view on every refresh. All shared state
//! lives behind one lock and is swapped wholesale, never patched.

use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api::Timetable;
use crate::client::{EngineError, SolverEngine};
use crate::services::analysis::{rank_constraints, RankedConstraint};
use crate::services::grid::{build_schedule_view, ScheduleView};

/// Default refresh cadence while solving.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Externally visible solve state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveState {
    Idle,
    Solving,
}

#[derive(Default)]
struct PollerState {
    job_id: Option<String>,
    solving: bool,
    snapshot: Option<Timetable>,
    view: Option<ScheduleView>,
    last_error: Option<String>,
    timer: Option<JoinHandle<()>>,
}

/// Polling client for the solving lifecycle.
///
/// Cheap to clone; clones share the same state and timer.
#[derive(Clone)]
pub struct SchedulePoller {
    engine: Arc<dyn SolverEngine>,
    poll_interval: Duration,
    state: Arc<Mutex<PollerState>>,
    refresh_pending: Arc<AtomicBool>,
}

impl SchedulePoller {
    pub fn new(engine: Arc<dyn SolverEngine>, poll_interval: Duration) -> Self {
        Self {
            engine,
            poll_interval,
            state: Arc::new(Mutex::new(PollerState::default())),
            refresh_pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Fetch the prepared demo problem and make it the current snapshot.
    ///
    /// A failure here is the degraded-empty state: no snapshot is stored
    /// and the caller decides how to present the absence of data.
    pub async fn load_problem(&self) -> Result<(), EngineError> {
        match self.engine.fetch_demo_problem().await {
            Ok(timetable) => {
                self.store_snapshot(timetable);
                Ok(())
            }
            Err(e) => {
                self.state.lock().last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Submit the current snapshot to the engine and begin polling.
    ///
    /// Starting while already solving is a no-op that returns the running
    /// job id; a second timer is never spawned.
    pub async fn start(&self) -> Result<String, EngineError> {
        let problem = {
            let state = self.state.lock();
            if state.solving {
                if let Some(job_id) = &state.job_id {
                    return Ok(job_id.clone());
                }
            }
            state
                .snapshot
                .clone()
                .ok_or_else(|| EngineError::state("no timetable loaded to solve"))?
        };

        match self.engine.start_solving(&problem).await {
            Ok(job_id) => {
                info!(%job_id, "solving started");
                let mut state = self.state.lock();
                state.job_id = Some(job_id.clone());
                state.solving = true;
                state.last_error = None;
                if state.timer.is_none() {
                    state.timer = Some(self.spawn_timer());
                }
                Ok(job_id)
            }
            Err(e) => {
                let mut state = self.state.lock();
                state.solving = false;
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch the current schedule once and rebuild the view.
    ///
    /// At most one refresh is outstanding at a time: a call that overlaps
    /// an in-flight one returns immediately without issuing a request. A
    /// transport failure forces the state machine back to Idle so a dead
    /// endpoint is not retried forever.
    pub async fn refresh(&self) -> Result<(), EngineError> {
        if self.refresh_pending.swap(true, AtomicOrdering::SeqCst) {
            debug!("refresh already pending, skipping");
            return Ok(());
        }
        let result = self.refresh_inner().await;
        self.refresh_pending.store(false, AtomicOrdering::SeqCst);
        result
    }

    async fn refresh_inner(&self) -> Result<(), EngineError> {
        let job_id = self.state.lock().job_id.clone();
        let fetched = match &job_id {
            Some(job_id) => self.engine.fetch_schedule(job_id).await,
            None => self.engine.fetch_demo_problem().await,
        };

        match fetched {
            Ok(timetable) => {
                self.store_snapshot(timetable);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "refresh failed, forcing state to not solving");
                let mut state = self.state.lock();
                state.solving = false;
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Request cancellation of the running job, then refresh once to show
    /// the final schedule.
    ///
    /// Stopping while idle is a tolerated no-op. On failure the solving
    /// state is left untouched so the user can retry.
    pub async fn stop(&self) -> Result<(), EngineError> {
        let job_id = self.state.lock().job_id.clone();
        let Some(job_id) = job_id else {
            debug!("stop requested while idle, ignoring");
            return Ok(());
        };

        self.engine.stop_solving(&job_id).await?;
        info!(%job_id, "solving stopped");
        self.state.lock().solving = false;
        // Final refresh; its own error handling records any failure.
        let _ = self.refresh().await;
        Ok(())
    }

    /// Run a score analysis of the current snapshot and rank the result.
    pub async fn analyze(&self) -> Result<Vec<RankedConstraint>, EngineError> {
        let snapshot = {
            let state = self.state.lock();
            let snapshot = state
                .snapshot
                .clone()
                .ok_or_else(|| EngineError::state("no timetable loaded"))?;
            if snapshot.score.is_none() {
                return Err(EngineError::state(
                    "no score to analyze yet, solve the timetable first",
                ));
            }
            snapshot
        };
        let analysis = self.engine.analyze(&snapshot).await?;
        Ok(rank_constraints(analysis.constraints))
    }

    pub fn solve_state(&self) -> SolveState {
        if self.state.lock().solving {
            SolveState::Solving
        } else {
            SolveState::Idle
        }
    }

    pub fn is_solving(&self) -> bool {
        self.state.lock().solving
    }

    pub fn snapshot(&self) -> Option<Timetable> {
        self.state.lock().snapshot.clone()
    }

    /// Grid view rebuilt on the latest refresh.
    pub fn view(&self) -> Option<ScheduleView> {
        self.state.lock().view.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.lock().last_error.clone()
    }

    /// Whole-object swap of the snapshot and its derived view.
    fn store_snapshot(&self, timetable: Timetable) {
        let view = build_schedule_view(&timetable);
        let solving = timetable.is_solving();
        let mut state = self.state.lock();
        state.snapshot = Some(timetable);
        state.view = Some(view);
        state.solving = solving;
    }

    fn spawn_timer(&self) -> JoinHandle<()> {
        let poller = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(poller.poll_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a tokio interval resolves immediately;
            // consume it so the first refresh happens one interval in.
            interval.tick().await;
            loop {
                interval.tick().await;
                if !poller.is_solving() {
                    break;
                }
                if poller.refresh().await.is_err() {
                    break;
                }
                if !poller.is_solving() {
                    break;
                }
            }
            debug!("poll timer stopped");
            poller.state.lock().timer = None;
        })
    }
}
