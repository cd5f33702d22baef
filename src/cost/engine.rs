use super::result::CostResult;
use chrono::{DateTime, Utc};

/// Weeks in the assumed work year
pub const WORK_WEEKS_PER_YEAR: f64 = 52.0;

/// Hours in the assumed work week
pub const WORK_HOURS_PER_WEEK: f64 = 40.0;

/// Hours in the assumed work year (2080)
pub const WORK_HOURS_PER_YEAR: f64 = WORK_WEEKS_PER_YEAR * WORK_HOURS_PER_WEEK;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Cost of a meeting between `start` and `end`.
///
/// A non-positive span, zero participants or a non-positive rate yields
/// [`CostResult::ZERO`] instead of an error. A NaN rate counts as non-positive.
pub fn calculate_meeting_cost(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    participants: u32,
    hourly_rate: f64,
) -> CostResult {
    let duration_hours = end.signed_duration_since(start).num_milliseconds() as f64 / MILLIS_PER_HOUR;

    if duration_hours <= 0.0 || participants == 0 || !(hourly_rate > 0.0) {
        return CostResult::ZERO;
    }

    let participants = f64::from(participants);

    CostResult {
        total_cost: duration_hours * participants * hourly_rate,
        duration_hours,
        cost_per_minute: (participants * hourly_rate) / 60.0,
        // Each attendee's own time, not a share of the total
        cost_per_person: duration_hours * hourly_rate,
    }
}

/// Hourly rate for an annual salary over a 2080-hour work year
pub fn convert_annual_to_hourly(annual_salary: f64) -> f64 {
    annual_salary / WORK_HOURS_PER_YEAR
}

/// Cost of a meeting that started at `start_time` and is still going on
pub fn calculate_real_time_cost(
    start_time: DateTime<Utc>,
    participants: u32,
    annual_salary: f64,
) -> CostResult {
    calculate_cost_between(start_time, Utc::now(), participants, annual_salary)
}

/// Same as [`calculate_real_time_cost`] with "now" supplied by the caller
pub fn calculate_cost_between(
    start_time: DateTime<Utc>,
    now: DateTime<Utc>,
    participants: u32,
    annual_salary: f64,
) -> CostResult {
    let hourly_rate = convert_annual_to_hourly(annual_salary);
    calculate_meeting_cost(start_time, now, participants, hourly_rate)
}
