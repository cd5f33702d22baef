use crate::timer::{TimerConfig, DEFAULT_ANNUAL_SALARY, DEFAULT_PARTICIPANTS};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Default location of the config file (extension is resolved by `config`)
pub const DEFAULT_CONFIG_PATH: &str = "config/meeting-cost";

/// Prefix for environment overrides, e.g. `MEETING_COST__MEETING__PARTICIPANTS=12`
pub const ENV_PREFIX: &str = "MEETING_COST";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub meeting: MeetingConfig,
    pub timer: TimerSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Defaults for new meetings
#[derive(Debug, Clone, Deserialize)]
pub struct MeetingConfig {
    pub participants: u32,
    pub annual_salary: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimerSettings {
    pub tick_interval_ms: u64,
}

impl Config {
    /// Load config from `path` if it exists, layered over built-in defaults
    /// and under environment overrides
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "meeting-cost")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 3030)?
            .set_default("meeting.participants", i64::from(DEFAULT_PARTICIPANTS))?
            .set_default("meeting.annual_salary", DEFAULT_ANNUAL_SALARY)?
            .set_default("timer.tick_interval_ms", 1000)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("Failed to load config from {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Timer configuration for a new meeting, using the configured defaults
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig {
            tick_interval: Duration::from_millis(self.timer.tick_interval_ms),
            participants: self.meeting.participants,
            annual_salary: self.meeting.annual_salary,
            ..TimerConfig::default()
        }
    }

    /// Socket address string the HTTP API binds to
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.service.http.bind, self.service.http.port)
    }
}
