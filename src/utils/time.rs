use crate::Result;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use time::{macros::format_description, OffsetDateTime};

const NANOS_PER_MILLI: i128 = 1_000_000;

#[inline]
pub fn curr_time_millis() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / NANOS_PER_MILLI) as u64
}

#[inline]
pub fn milli2nano<T: Into<i128>>(t: T) -> i128 {
    NANOS_PER_MILLI * t.into()
}

/// `format_time_millis` renders a millisecond timestamp as `hour:minute:second` (UTC).
pub fn format_time_millis(ts_millis: u64) -> Result<String> {
    let datetime = OffsetDateTime::from_unix_timestamp_nanos(milli2nano(ts_millis))?;
    Ok(datetime.format(format_description!("[hour]:[minute]:[second]"))?)
}

/// `TimeProvider` is the clock a circuit breaker reads.
/// Timestamps are unix milliseconds and only need to be monotonic enough for deadline comparison.
pub trait TimeProvider: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    #[inline]
    fn now_ms(&self) -> u64 {
        curr_time_millis()
    }
}

pub type TimeModifier = Box<dyn Fn(u64) -> u64 + Send + Sync>;

/// `ModifiedTimeProvider` reads the wall clock and passes the reading
/// through every registered modifier, in registration order.
/// Tests use it to travel forward in time without sleeping.
#[derive(Default)]
pub struct ModifiedTimeProvider {
    modifiers: RwLock<Vec<TimeModifier>>,
}

impl ModifiedTimeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// `modify` appends a modifier to the chain. It affects every later reading.
    pub fn modify<F>(&self, modifier: F)
    where
        F: Fn(u64) -> u64 + Send + Sync + 'static,
    {
        self.modifiers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(modifier));
    }

    /// `advance` shifts every later reading forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.modify(move |now| now.saturating_add(ms));
    }
}

impl TimeProvider for ModifiedTimeProvider {
    fn now_ms(&self) -> u64 {
        let modifiers = self
            .modifiers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        modifiers
            .iter()
            .fold(curr_time_millis(), |now, modifier| modifier(now))
    }
}

impl fmt::Debug for ModifiedTimeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self
            .modifiers
            .read()
            .map(|modifiers| modifiers.len())
            .unwrap_or_default();
        f.debug_struct("ModifiedTimeProvider")
            .field("modifiers", &count)
            .finish()
    }
}
