use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateKeyError {
    #[error("date key `{0}` is not in YYYY-MM-DD form")]
    Malformed(String),
    #[error("date key `{0}` does not name a calendar day")]
    OutOfRange(String),
}

/// Reasons a habit creation payload is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("habit title must not be empty")]
    EmptyTitle,
    #[error("habit category must be chosen")]
    MissingCategory,
    #[error("habit recurrence must be chosen")]
    MissingRecurrence,
    #[error("unknown recurrence `{0}`")]
    UnknownRecurrence(String),
    #[error("weekday index {0} is outside 0..=6")]
    InvalidWeekday(u8),
    #[error("invalid date: {0}")]
    InvalidDate(#[from] DateKeyError),
}
