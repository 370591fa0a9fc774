use dotdisc_common::Real;
use thiserror::Error;

pub type DotDiscResult<T> = Result<T, DotDiscError>;

/// Invalid input conditions. All of these are raised before any scanning occurs.
#[derive(Debug, Error, PartialEq)]
pub enum DotDiscError {
    #[error("Invalid Input: signal is empty")]
    EmptySignal,
    #[error(
        "Invalid Input: criteria buffer of length {len} is not a whole number of (threshold, direction, offset) rows"
    )]
    MalformedCriteria { len: usize },
    #[error("Invalid Input: criterion {index} has non-finite offset {value}")]
    InvalidOffset { index: usize, value: Real },
    #[error("Invalid Input: {0}")]
    InvalidCriterion(String),
}
