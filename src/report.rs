//! Plain-text cost report

use crate::cost::{format_currency, format_duration, CostResult};
use serde::Serialize;
use std::fmt;

/// A cost result together with the context needed to describe it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CostReport {
    pub result: CostResult,
    pub participants: u32,
}

impl CostReport {
    pub fn new(result: CostResult, participants: u32) -> Self {
        Self {
            result,
            participants,
        }
    }

    /// Render the report, or nothing if there is no cost to show yet
    pub fn render(&self, is_running: bool) -> Option<String> {
        if self.result.total_cost == 0.0 && !is_running {
            return None;
        }
        Some(self.to_string())
    }

    /// One-line summary, absent without participants
    pub fn summary(&self) -> Option<String> {
        if self.participants == 0 {
            return None;
        }

        Some(format!(
            "This meeting with {} participant{} costs your organization approximately {} per minute",
            self.participants,
            if self.participants == 1 { "" } else { "s" },
            format_currency(self.result.cost_per_minute)
        ))
    }

    /// Formatted fields for machine consumers
    pub fn formatted(&self) -> FormattedCost {
        FormattedCost {
            total_cost: format_currency(self.result.total_cost),
            duration: format_duration(self.result.duration_hours),
            cost_per_minute: format!("{}/min", format_currency(self.result.cost_per_minute)),
            cost_per_person: format_currency(self.result.cost_per_person),
        }
    }
}

impl fmt::Display for CostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.formatted();

        writeln!(f, "Meeting Cost")?;
        writeln!(f, "Total Cost: {}", formatted.total_cost)?;
        writeln!(f, "Duration: {}", formatted.duration)?;
        writeln!(f, "Cost Per Minute: {}", formatted.cost_per_minute)?;
        write!(f, "Cost Per Person: {}", formatted.cost_per_person)?;

        if let Some(summary) = self.summary() {
            write!(f, "\n{}", summary)?;
        }

        Ok(())
    }
}

/// Display strings for each cost field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedCost {
    pub total_cost: String,
    pub duration: String,
    pub cost_per_minute: String,
    pub cost_per_person: String,
}
