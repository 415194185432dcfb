use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid date key: {0:?} (expected YYYY-MM-DD)")]
    InvalidDateKey(String),

    #[error("Invalid history at entry {index}: {reason}")]
    InvalidHistory { index: usize, reason: String },

    #[error("Heatmap needs at least one week, got {0}")]
    InvalidWeeks(u32),

    #[error("Invalid score buckets: {0}")]
    InvalidBuckets(String),
}

impl EngineError {
    pub(crate) fn history(index: usize, reason: impl Into<String>) -> Self {
        EngineError::InvalidHistory {
            index,
            reason: reason.into(),
        }
    }
}
