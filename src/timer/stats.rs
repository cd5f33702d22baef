use crate::cost::{convert_annual_to_hourly, CostResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inputs read on every recomputation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostInputs {
    /// Number of people in the meeting
    pub participants: u32,

    /// Average annual salary of the participants
    pub annual_salary: f64,
}

impl CostInputs {
    pub fn hourly_rate(&self) -> f64 {
        convert_annual_to_hourly(self.annual_salary)
    }
}

/// Live-tracking state of a timer
///
/// Idle sessions have no start time; running sessions always have one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingSession {
    pub start_time: Option<DateTime<Utc>>,
    pub is_running: bool,
}

impl MeetingSession {
    pub fn running(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time: Some(start_time),
            is_running: true,
        }
    }
}

/// Snapshot of a meeting timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerStats {
    /// Meeting this timer belongs to
    pub meeting_id: String,

    /// Whether the timer is currently running
    pub is_running: bool,

    /// When the current run started (absent while idle)
    pub started_at: Option<DateTime<Utc>>,

    /// Participant count used for the next recomputation
    pub participants: u32,

    /// Annual salary used for the next recomputation
    pub annual_salary: f64,

    /// Hourly rate derived from the annual salary
    pub hourly_rate: f64,

    /// Number of recomputations performed over the timer's lifetime
    pub recomputations: usize,

    /// Most recently published cost
    pub result: CostResult,
}
