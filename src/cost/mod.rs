//! Meeting cost calculation
//!
//! Pure functions turning a time span, a participant count and a salary into
//! cost metrics, plus the helpers used to display them. Degenerate inputs
//! produce [`CostResult::ZERO`]; nothing in here can fail.

mod engine;
mod format;
mod result;

pub use engine::{
    calculate_cost_between, calculate_meeting_cost, calculate_real_time_cost,
    convert_annual_to_hourly, WORK_HOURS_PER_YEAR,
};
pub use format::{format_currency, format_duration};
pub use result::CostResult;
