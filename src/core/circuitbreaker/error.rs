use std::error;
use std::fmt;

/// `BreakerError` indicates the call was rejected by the breaker before the guarded operation ran.
/// It reaches the caller wrapped in `crate::Error`, use `downcast_ref::<BreakerError>()` to tell
/// a rejection apart from a failure of the operation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakerError {
    /// The breaker is open and its retry timeout has not elapsed.
    Open,
    /// The breaker is half-open and every probe slot is taken.
    TooManyRequests,
}

impl fmt::Display for BreakerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakerError::Open => write!(f, "state is open"),
            BreakerError::TooManyRequests => write!(f, "too many requests"),
        }
    }
}

impl error::Error for BreakerError {}
