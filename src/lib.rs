pub mod cli;
pub mod config;
pub mod cost;
pub mod http;
pub mod report;
pub mod timer;

pub use config::Config;
pub use cost::{
    calculate_meeting_cost, calculate_real_time_cost, convert_annual_to_hourly, format_currency,
    format_duration, CostResult,
};
pub use http::{create_router, AppState};
pub use report::CostReport;
pub use timer::{Clock, CostInputs, MeetingSession, MeetingTimer, TimerConfig, TimerError, TimerStats};
