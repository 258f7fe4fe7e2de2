use thiserror::Error;

/// Errors raised while building an [`Interval`](crate::Interval).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    #[error("malformed interval: low bound is greater than high bound")]
    Malformed,
}

pub type Result<T> = std::result::Result<T, IntervalError>;
