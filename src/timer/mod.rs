//! Live meeting cost tracking
//!
//! This module provides the `MeetingTimer` controller that manages:
//! - The idle/running session state
//! - An immediate recomputation on start and one per tick afterwards
//! - Publishing the latest cost to subscribers
//! - Cancelling pending ticks on stop and on drop

mod clock;
mod config;
mod error;
mod stats;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{TimerConfig, DEFAULT_ANNUAL_SALARY, DEFAULT_PARTICIPANTS};
pub use error::TimerError;
pub use stats::{CostInputs, MeetingSession, TimerStats};
pub use timer::MeetingTimer;
