// default app settings
pub const SENTINEL_BREAKER_VERSION: &str = "v1";
pub const DEFAULT_APP_NAME: &str = "unknown_service";
pub const APP_NAME_ENV_KEY: &str = "SENTINEL_BREAKER_APP_NAME";
pub const CONF_FILE_PATH_ENV_KEY: &str = "SENTINEL_BREAKER_CONFIG_FILE_PATH";
pub const CONFIG_FILENAME: &str = "USE_DEFAULT_CONFIGURATION";

// default breaker settings
pub const DEFAULT_BREAKER_NAME: &str = "default";
pub const DEFAULT_MAX_REQUESTS: u32 = 5;
pub const DEFAULT_RETRY_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CONSECUTIVE_FAILURES_THRESHOLD: u32 = 5;
pub const MAX_REQUESTS_ENV_KEY: &str = "SENTINEL_BREAKER_MAX_REQUESTS";
pub const RETRY_TIMEOUT_MS_ENV_KEY: &str = "SENTINEL_BREAKER_RETRY_TIMEOUT_MS";

// default log settings
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const LOG_CONFIG_FILE: &str = "testdata/config/log4rs.yaml";
