use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// `month0` is 0-based.
    #[error("invalid calendar date {year}-{month0}(0-based)-{day}")]
    InvalidDate { year: i32, month0: u32, day: u32 },
    #[error("invalid event window: {0}")]
    InvalidWindow(String),
    #[error("countdown tick must be longer than zero")]
    InvalidTick,
}
