use crate::timer::{MeetingTimer, TimerConfig};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Meeting timers (meeting_id → timer)
    pub timers: Arc<RwLock<HashMap<String, Arc<MeetingTimer>>>>,

    /// Template for new timers (tick interval and default inputs)
    pub defaults: Arc<TimerConfig>,
}

impl AppState {
    pub fn new(defaults: TimerConfig) -> Self {
        Self {
            timers: Arc::new(RwLock::new(HashMap::new())),
            defaults: Arc::new(defaults),
        }
    }

    /// Look up a timer without holding the registry lock afterwards
    pub async fn timer(&self, meeting_id: &str) -> Option<Arc<MeetingTimer>> {
        let timers = self.timers.read().await;
        timers.get(meeting_id).cloned()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}
