use super::clock::{Clock, SystemClock};
use super::config::TimerConfig;
use super::error::TimerError;
use super::stats::{CostInputs, MeetingSession, TimerStats};
use crate::cost::{calculate_cost_between, format_currency, CostResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Shortest accepted tick interval
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Everything a tick reads or writes, guarded by one lock
#[derive(Debug)]
struct TimerState {
    session: MeetingSession,
    inputs: CostInputs,
    /// Bumped on every start; ticks from an older run never publish
    epoch: u64,
    recomputations: usize,
}

impl TimerState {
    fn recompute(&mut self, now: DateTime<Utc>) -> Option<CostResult> {
        let start = self.session.start_time?;
        self.recomputations += 1;

        Some(calculate_cost_between(
            start,
            now,
            self.inputs.participants,
            self.inputs.annual_salary,
        ))
    }
}

/// A live meeting cost timer
///
/// While running, cost is recomputed from the original start time on every
/// tick and published to subscribers. Stopping keeps the last result.
pub struct MeetingTimer {
    /// Meeting identifier
    meeting_id: String,

    /// Time between recomputations
    tick_interval: Duration,

    /// Source of "now"
    clock: Arc<dyn Clock>,

    /// Session, inputs and counters
    state: Arc<Mutex<TimerState>>,

    /// Latest published cost
    result_tx: Arc<watch::Sender<CostResult>>,

    /// Handle for the tick task of the current run
    tick_task: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl MeetingTimer {
    /// Create an idle timer driven by the wall clock
    pub fn new(config: TimerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an idle timer driven by `clock`
    pub fn with_clock(config: TimerConfig, clock: Arc<dyn Clock>) -> Self {
        let (result_tx, _) = watch::channel(CostResult::ZERO);

        Self {
            meeting_id: config.meeting_id,
            tick_interval: config.tick_interval.max(MIN_TICK_INTERVAL),
            clock,
            state: Arc::new(Mutex::new(TimerState {
                session: MeetingSession::default(),
                inputs: CostInputs {
                    participants: config.participants,
                    annual_salary: config.annual_salary,
                },
                epoch: 0,
                recomputations: 0,
            })),
            result_tx: Arc::new(result_tx),
            tick_task: std::sync::Mutex::new(None),
        }
    }

    pub fn meeting_id(&self) -> &str {
        &self.meeting_id
    }

    /// Start the timer
    ///
    /// Records "now" as the session start, recomputes once right away and
    /// then once per tick interval.
    pub async fn start(&self) -> Result<(), TimerError> {
        let mut state = self.state.lock().await;

        if state.session.is_running {
            warn!("Meeting {} already running", self.meeting_id);
            return Err(TimerError::AlreadyRunning(self.meeting_id.clone()));
        }

        let now = self.clock.now();
        state.session = MeetingSession::running(now);
        state.epoch += 1;

        if let Some(result) = state.recompute(now) {
            self.result_tx.send_replace(result);
        }

        // Spawned under the lock so a concurrent stop() sees the new handle
        let task = tokio::spawn(run_ticks(
            Arc::clone(&self.state),
            Arc::clone(&self.clock),
            Arc::clone(&self.result_tx),
            self.tick_interval,
            state.epoch,
            self.meeting_id.clone(),
        ));
        self.replace_tick_task(Some(task));

        info!(
            "Meeting started: {} ({} participants, {}/hour each)",
            self.meeting_id,
            state.inputs.participants,
            format_currency(state.inputs.hourly_rate())
        );

        Ok(())
    }

    /// Stop the timer, keeping the last computed cost
    pub async fn stop(&self) -> Result<TimerStats, TimerError> {
        let mut state = self.state.lock().await;

        if !state.session.is_running {
            warn!("Meeting {} not running", self.meeting_id);
            return Err(TimerError::NotRunning(self.meeting_id.clone()));
        }

        state.session = MeetingSession::default();
        self.replace_tick_task(None);

        let stats = self.snapshot(&state);

        info!(
            "Meeting stopped: {} (total {})",
            self.meeting_id,
            format_currency(stats.result.total_cost)
        );

        Ok(stats)
    }

    /// Clear the retained cost of a stopped timer
    pub async fn reset(&self) -> Result<(), TimerError> {
        let state = self.state.lock().await;

        if state.session.is_running {
            return Err(TimerError::AlreadyRunning(self.meeting_id.clone()));
        }

        self.result_tx.send_replace(CostResult::ZERO);
        Ok(())
    }

    /// Replace both inputs; a running timer uses them from the next tick on
    pub async fn set_inputs(&self, inputs: CostInputs) {
        let mut state = self.state.lock().await;
        debug!("Meeting {} inputs changed: {:?}", self.meeting_id, inputs);
        state.inputs = inputs;
    }

    /// Change only the given inputs, atomically with respect to other updates
    pub async fn update_inputs(
        &self,
        participants: Option<u32>,
        annual_salary: Option<f64>,
    ) -> CostInputs {
        let mut state = self.state.lock().await;
        if let Some(participants) = participants {
            state.inputs.participants = participants;
        }
        if let Some(annual_salary) = annual_salary {
            state.inputs.annual_salary = annual_salary;
        }
        debug!("Meeting {} inputs changed: {:?}", self.meeting_id, state.inputs);
        state.inputs
    }

    pub async fn set_participants(&self, participants: u32) {
        let mut state = self.state.lock().await;
        state.inputs.participants = participants;
    }

    pub async fn set_annual_salary(&self, annual_salary: f64) {
        let mut state = self.state.lock().await;
        state.inputs.annual_salary = annual_salary;
    }

    pub async fn inputs(&self) -> CostInputs {
        self.state.lock().await.inputs
    }

    pub async fn is_running(&self) -> bool {
        self.state.lock().await.session.is_running
    }

    /// Get current timer statistics
    pub async fn stats(&self) -> TimerStats {
        let state = self.state.lock().await;
        self.snapshot(&state)
    }

    /// Most recently published cost
    pub fn result(&self) -> CostResult {
        *self.result_tx.borrow()
    }

    /// Observe every newly published cost
    pub fn subscribe(&self) -> watch::Receiver<CostResult> {
        self.result_tx.subscribe()
    }

    fn snapshot(&self, state: &TimerState) -> TimerStats {
        TimerStats {
            meeting_id: self.meeting_id.clone(),
            is_running: state.session.is_running,
            started_at: state.session.start_time,
            participants: state.inputs.participants,
            annual_salary: state.inputs.annual_salary,
            hourly_rate: state.inputs.hourly_rate(),
            recomputations: state.recomputations,
            result: self.result(),
        }
    }

    /// Swap the stored tick task, aborting the previous one
    fn replace_tick_task(&self, task: Option<JoinHandle<()>>) {
        let mut handle = self.tick_task.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(old) = std::mem::replace(&mut *handle, task) {
            old.abort();
        }
    }
}

impl Drop for MeetingTimer {
    fn drop(&mut self) {
        self.replace_tick_task(None);
    }
}

/// Recompute once per interval until the run identified by `epoch` ends
async fn run_ticks(
    state: Arc<Mutex<TimerState>>,
    clock: Arc<dyn Clock>,
    result_tx: Arc<watch::Sender<CostResult>>,
    tick_interval: Duration,
    epoch: u64,
    meeting_id: String,
) {
    // The immediate recomputation already happened in start()
    let mut ticker = time::interval_at(Instant::now() + tick_interval, tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let mut state = state.lock().await;
        if state.epoch != epoch || !state.session.is_running {
            break;
        }

        if let Some(result) = state.recompute(clock.now()) {
            debug!(
                "Meeting {} tick: {} after {:.4}h",
                meeting_id,
                format_currency(result.total_cost),
                result.duration_hours
            );
            result_tx.send_replace(result);
        }
    }

    debug!("Tick task for meeting {} finished", meeting_id);
}
