use thiserror::Error;

/// Rejected timer state transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("meeting {0} is already running")]
    AlreadyRunning(String),

    #[error("meeting {0} is not running")]
    NotRunning(String),
}
