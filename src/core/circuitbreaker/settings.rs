use super::Counts;
use crate::config::{self, BreakerConfig};
use crate::utils::{SystemTimeProvider, TimeProvider};
use crate::{Error, Result};
use std::convert::TryFrom;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// `ReadyToTrip` decides, after each failure while closed, whether the breaker opens.
pub type ReadyToTrip = Arc<dyn Fn(&Counts) -> bool + Send + Sync>;

/// `consecutive_failures_exceed` trips once the failure streak is longer than `threshold`.
pub fn consecutive_failures_exceed(threshold: u32) -> ReadyToTrip {
    Arc::new(move |counts: &Counts| counts.consecutive_failures > threshold)
}

/// `Settings` configures a `CircuitBreaker`. It is fixed once the breaker is built.
///
/// | field           | default                          |
/// |-----------------|----------------------------------|
/// | `name`          | `"default"`                      |
/// | `max_requests`  | 5                                |
/// | `timeout`       | 10s                              |
/// | `ready_to_trip` | `consecutive_failures > 5`       |
/// | `time_provider` | `SystemTimeProvider`             |
///
/// Override single fields with struct update syntax:
/// `Settings { max_requests: 3, ..Default::default() }`.
#[derive(Clone)]
pub struct Settings {
    /// name of the guarded resource, used in logs
    pub name: String,
    /// `max_requests` is the maximum number of calls let through while half-open,
    /// and the number of consecutive successes required to close again.
    pub max_requests: u32,
    /// `timeout` is how long the breaker stays open before it lets a probe through.
    pub timeout: Duration,
    /// Evaluated with the counts after every failure while closed.
    /// It runs under the breaker lock and must not call back into the breaker.
    pub ready_to_trip: ReadyToTrip,
    pub time_provider: Arc<dyn TimeProvider>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            name: config::DEFAULT_BREAKER_NAME.into(),
            max_requests: config::DEFAULT_MAX_REQUESTS,
            timeout: Duration::from_millis(config::DEFAULT_RETRY_TIMEOUT_MS),
            ready_to_trip: consecutive_failures_exceed(
                config::DEFAULT_CONSECUTIVE_FAILURES_THRESHOLD,
            ),
            time_provider: Arc::new(SystemTimeProvider),
        }
    }
}

impl Settings {
    pub fn from_config<S: Into<String>>(name: S, cfg: &BreakerConfig) -> Self {
        Settings {
            name: name.into(),
            max_requests: cfg.max_requests,
            timeout: Duration::from_millis(cfg.retry_timeout_ms),
            ready_to_trip: consecutive_failures_exceed(cfg.consecutive_failures_threshold),
            ..Default::default()
        }
    }

    pub fn is_valid(&self) -> Result<()> {
        if self.max_requests == 0 {
            return Err(Error::msg(format!(
                "invalid max_requests for breaker {}: must be positive",
                self.name
            )));
        }
        if self.timeout.as_millis() == 0 {
            return Err(Error::msg(format!(
                "invalid timeout for breaker {}: must be at least 1ms",
                self.name
            )));
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("name", &self.name)
            .field("max_requests", &self.max_requests)
            .field("timeout", &self.timeout)
            .finish()
    }
}
