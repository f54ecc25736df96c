use super::{BreakerError, Counts, Settings};
use crate::{config, logging, utils, Error, Result};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// States of Circuit Breaker State Machine
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum State {
    Closed,
    HalfOpen,
    Open,
}

impl Default for State {
    fn default() -> State {
        State::Closed
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Closed => write!(f, "closed"),
            State::HalfOpen => write!(f, "half-open"),
            State::Open => write!(f, "open"),
        }
    }
}

#[derive(Debug, Default)]
struct BreakerInner {
    state: State,
    counts: Counts,
    /// next_retry_timestamp_ms is the time the breaker could probe, 0 unless open
    next_retry_timestamp_ms: u64,
    /// bumped on every transition, outcomes of calls admitted in an older generation are dropped
    generation: u64,
}

/// `CircuitBreaker` guards a fallible operation, see the module docs for the state machine.
///
/// The breaker is `Send + Sync`; share it behind an `Arc` to guard calls made from several threads.
/// Its lock is released while the guarded operation runs.
#[derive(Debug)]
pub struct CircuitBreaker {
    settings: Settings,
    inner: Mutex<BreakerInner>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl CircuitBreaker {
    /// `new` builds a closed breaker, `settings` are trusted as they are.
    /// With `max_requests == 0` a half-open breaker rejects every call and never closes
    /// again; use `try_new` for settings that are not known to be valid.
    pub fn new(settings: Settings) -> Self {
        CircuitBreaker {
            settings,
            inner: Mutex::new(BreakerInner::default()),
        }
    }

    /// `try_new` validates `settings` before building the breaker.
    pub fn try_new(settings: Settings) -> Result<Self> {
        settings.is_valid()?;
        Ok(Self::new(settings))
    }

    /// `from_global_config` builds a breaker from the `breaker` section of the global config,
    /// see `init_default` and `init_with_config_file`.
    pub fn from_global_config<S: Into<String>>(name: S) -> Result<Self> {
        Self::try_new(Settings::from_config(name, &config::breaker_config()))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.settings.name
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// `state` returns the current state. An expired open state is reported as open
    /// until the next call performs the switch to half-open.
    pub fn state(&self) -> State {
        self.lock().state
    }

    /// `counts` returns a snapshot of the counts of the current state.
    pub fn counts(&self) -> Counts {
        self.lock().counts
    }

    /// `expiry_ms` returns the timestamp (in ms) after which an open breaker probes again,
    /// `None` unless the breaker is open.
    pub fn expiry_ms(&self) -> Option<u64> {
        let inner = self.lock();
        match inner.state {
            State::Open => Some(inner.next_retry_timestamp_ms),
            _ => None,
        }
    }

    /// `execute` runs `req` if the breaker admits it and returns its result unchanged.
    ///
    /// A rejected call returns a `BreakerError` without running `req`.
    /// Any `Err` returned by `req` counts as a failure, whatever its kind.
    /// A panic in `req` is recorded as a failure before it propagates to the caller.
    pub fn execute<T, F>(&self, req: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let admission = Admission {
            breaker: self,
            generation: self.before_request()?,
            settled: false,
        };
        let result = req();
        admission.settle(result.is_ok());
        result
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, BreakerInner> {
        // the counters stay consistent even if a trip predicate panicked
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn before_request(&self) -> Result<u64> {
        let now = self.settings.time_provider.now_ms();
        let mut inner = self.lock();
        if inner.state == State::Open && inner.next_retry_timestamp_ms < now {
            self.set_state(&mut inner, State::HalfOpen, now);
        }

        match inner.state {
            State::Open => {
                logging::debug!(
                    "[CircuitBreaker] Call rejected, breaker {} is open until {}",
                    self.settings.name,
                    utils::format_time_millis(inner.next_retry_timestamp_ms).unwrap_or_default()
                );
                return Err(Error::new(BreakerError::Open));
            }
            State::HalfOpen if inner.counts.requests >= self.settings.max_requests => {
                logging::debug!(
                    "[CircuitBreaker] Call rejected, breaker {} has no probe left",
                    self.settings.name
                );
                return Err(Error::new(BreakerError::TooManyRequests));
            }
            _ => {}
        }

        inner.counts.on_request();
        Ok(inner.generation)
    }

    fn after_request(&self, generation: u64, success: bool) {
        let mut inner = self.lock();
        if inner.generation != generation {
            return;
        }
        if success {
            self.on_success(&mut inner);
        } else {
            self.on_failure(&mut inner);
        }
    }

    fn on_success(&self, inner: &mut BreakerInner) {
        match inner.state {
            State::Closed => inner.counts.on_success(),
            State::HalfOpen => {
                inner.counts.on_success();
                if inner.counts.consecutive_successes >= self.settings.max_requests {
                    let now = self.settings.time_provider.now_ms();
                    self.set_state(inner, State::Closed, now);
                }
            }
            State::Open => {}
        }
    }

    fn on_failure(&self, inner: &mut BreakerInner) {
        match inner.state {
            State::Closed => {
                inner.counts.on_failure();
                if (self.settings.ready_to_trip)(&inner.counts) {
                    let now = self.settings.time_provider.now_ms();
                    self.set_state(inner, State::Open, now);
                }
            }
            // a single failed probe re-opens the breaker
            State::HalfOpen => {
                let now = self.settings.time_provider.now_ms();
                self.set_state(inner, State::Open, now);
            }
            State::Open => {}
        }
    }

    fn set_state(&self, inner: &mut BreakerInner, state: State, now: u64) {
        let prev = inner.state;
        if prev == state {
            return;
        }
        inner.state = state;
        inner.generation = inner.generation.wrapping_add(1);
        inner.counts.clear();
        inner.next_retry_timestamp_ms = match state {
            State::Open => now.saturating_add(self.settings.timeout_ms()),
            State::Closed | State::HalfOpen => 0,
        };
        logging::info!(
            "[CircuitBreaker] State changed, breaker {}, {} -> {}",
            self.settings.name,
            prev,
            state
        );
    }
}

/// `Admission` is an admitted call whose outcome is not recorded yet.
/// Dropping it unsettled, e.g. while unwinding, records a failure.
struct Admission<'a> {
    breaker: &'a CircuitBreaker,
    generation: u64,
    settled: bool,
}

impl Admission<'_> {
    fn settle(mut self, success: bool) {
        self.settled = true;
        self.breaker.after_request(self.generation, success);
    }
}

impl Drop for Admission<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.breaker.after_request(self.generation, false);
        }
    }
}
