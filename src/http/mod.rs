//! HTTP API for meeting cost calculation and live timers
//!
//! This module provides a REST API over a registry of meeting timers:
//! - POST /cost - Cost of a finished meeting
//! - GET /rate/:annual_salary - Hourly rate for a salary
//! - POST /meetings - Create an idle timer
//! - POST /meetings/:id/start - Start a timer
//! - POST /meetings/:id/stop - Stop a timer
//! - PUT /meetings/:id/inputs - Change participants or salary
//! - GET /meetings/:id/status - Query timer status
//! - DELETE /meetings/:id - Tear a timer down
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
