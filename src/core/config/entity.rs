use super::constant::*;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json;
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    // app_name represents the name of current running service.
    pub app_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            app_name: DEFAULT_APP_NAME.into(),
        }
    }
}

// LogConfig represent the configuration of logging.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    // config_file is only read by the log4rs backend
    pub config_file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            config_file: LOG_CONFIG_FILE.into(),
        }
    }
}

/// `BreakerConfig` holds the serializable part of breaker settings,
/// used by `CircuitBreaker::from_global_config`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct BreakerConfig {
    /// `max_requests` is the number of probes let through while half-open,
    /// and the number of consecutive successful probes that closes the breaker.
    pub max_requests: u32,
    /// `retry_timeout_ms` is how long (in milliseconds) the breaker stays open before probing.
    pub retry_timeout_ms: u64,
    /// The breaker trips once consecutive failures exceed this value.
    pub consecutive_failures_threshold: u32,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        BreakerConfig {
            max_requests: DEFAULT_MAX_REQUESTS,
            retry_timeout_ms: DEFAULT_RETRY_TIMEOUT_MS,
            consecutive_failures_threshold: DEFAULT_CONSECUTIVE_FAILURES_THRESHOLD,
        }
    }
}

impl BreakerConfig {
    pub fn check(&self) -> Result<()> {
        if self.max_requests == 0 {
            return Err(Error::msg(
                "illegal breaker configuration: max_requests must be positive",
            ));
        }
        if self.retry_timeout_ms == 0 {
            return Err(Error::msg(
                "illegal breaker configuration: retry_timeout_ms must be positive",
            ));
        }
        Ok(())
    }
}

// SentinelConfig represent the general configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SentinelConfig {
    pub app: AppConfig,
    pub log: LogConfig,
    pub breaker: BreakerConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConfigEntity {
    pub version: String,
    pub config: SentinelConfig,
}

impl Default for ConfigEntity {
    fn default() -> Self {
        ConfigEntity {
            version: SENTINEL_BREAKER_VERSION.into(),
            config: SentinelConfig::default(),
        }
    }
}

impl ConfigEntity {
    pub fn new() -> Self {
        ConfigEntity::default()
    }

    pub fn check(&self) -> Result<()> {
        if self.version.is_empty() {
            return Err(Error::msg("empty version"));
        }
        if self.config.app.app_name.is_empty() {
            return Err(Error::msg("empty app name"));
        }
        self.config.breaker.check()
    }
}

impl fmt::Display for ConfigEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmtted = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", fmtted)
    }
}
