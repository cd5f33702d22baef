use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default participant count for a new meeting
pub const DEFAULT_PARTICIPANTS: u32 = 8;

/// Default average annual salary (USD) for a new meeting
pub const DEFAULT_ANNUAL_SALARY: f64 = 85_000.0;

/// Configuration for a live meeting timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Unique meeting identifier (e.g., "meeting-2025-10-28-standup")
    pub meeting_id: String,

    /// Time between recomputations
    /// Default: 1 second
    pub tick_interval: Duration,

    /// Number of people in the meeting
    pub participants: u32,

    /// Average annual salary of the participants
    pub annual_salary: f64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            meeting_id: format!("meeting-{}", uuid::Uuid::new_v4()),
            tick_interval: Duration::from_secs(1),
            participants: DEFAULT_PARTICIPANTS,
            annual_salary: DEFAULT_ANNUAL_SALARY,
        }
    }
}
