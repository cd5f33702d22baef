use serde::{Deserialize, Serialize};

/// Cost metrics for a meeting span
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostResult {
    /// Total cost of everyone's time for the whole span
    pub total_cost: f64,

    /// Length of the span in fractional hours
    pub duration_hours: f64,

    /// Cost of one minute of the meeting with all participants
    pub cost_per_minute: f64,

    /// Cost of a single participant's time for the whole span
    pub cost_per_person: f64,
}

impl CostResult {
    /// Result for a degenerate span or degenerate inputs
    pub const ZERO: Self = Self {
        total_cost: 0.0,
        duration_hours: 0.0,
        cost_per_minute: 0.0,
        cost_per_person: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}
