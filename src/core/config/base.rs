use super::{constant::*, BreakerConfig, ConfigEntity};
use crate::{logging, utils, Error, Result};
use lazy_static::lazy_static;
use serde_yaml;
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

lazy_static! {
    static ref GLOBAL_CONFIG: RwLock<ConfigEntity> = RwLock::new(ConfigEntity::new());
}

#[inline]
fn read_config() -> RwLockReadGuard<'static, ConfigEntity> {
    GLOBAL_CONFIG.read().unwrap_or_else(PoisonError::into_inner)
}

#[inline]
fn write_config() -> RwLockWriteGuard<'static, ConfigEntity> {
    GLOBAL_CONFIG.write().unwrap_or_else(PoisonError::into_inner)
}

pub fn reset_global_config(entity: ConfigEntity) {
    *write_config() = entity;
}

// init_config_with_yaml loads general configuration from the YAML file under provided path.
pub fn init_config_with_yaml(config_path: &mut String) -> Result<()> {
    // Initialize general config and logging module.
    apply_yaml_config_file(config_path)?;
    override_items_from_system_env()?;
    init_log()?;
    Ok(())
}

// apply_yaml_config_file loads general configuration from the given YAML file.
fn apply_yaml_config_file(config_path: &mut String) -> Result<()> {
    // Priority: system environment > YAML file > default config
    if utils::is_blank(config_path) {
        // If the config file path is absent, try to resolve it from the system env.
        *config_path = env::var(CONF_FILE_PATH_ENV_KEY).unwrap_or_else(|_| CONFIG_FILENAME.into());
    }
    load_global_config_from_yaml_file(config_path)?;
    Ok(())
}

fn load_global_config_from_yaml_file(path_str: &str) -> Result<()> {
    if path_str == CONFIG_FILENAME {
        // use default global config.
        return Ok(());
    }
    let path = Path::new(path_str);
    if !path.exists() {
        return Err(Error::msg(format!(
            "Sentinel Breaker YAML configuration file does not exist: {}",
            path_str
        )));
    }
    let content = fs::read_to_string(path)?;
    let entity: ConfigEntity = serde_yaml::from_str(&content)?;
    entity.check()?;
    logging::info!(
        "[Config] Resolving Sentinel Breaker config from file, file {}",
        path_str
    );
    reset_global_config(entity);
    Ok(())
}

fn env_item<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            logging::warn!(
                "[Config] Ignoring unparsable environment item, key {}, value {}",
                key,
                raw
            );
            None
        }
    }
}

/// `override_items_from_system_env` applies the environment overrides on top of the
/// current global config. The result is validated before it replaces the global config.
pub fn override_items_from_system_env() -> Result<()> {
    let mut cfg = read_config().clone();
    if let Ok(app_name) = env::var(APP_NAME_ENV_KEY) {
        if !utils::is_blank(&app_name) {
            cfg.config.app.app_name = app_name;
        }
    }
    if let Some(max_requests) = env_item::<u32>(MAX_REQUESTS_ENV_KEY) {
        cfg.config.breaker.max_requests = max_requests;
    }
    if let Some(retry_timeout_ms) = env_item::<u64>(RETRY_TIMEOUT_MS_ENV_KEY) {
        cfg.config.breaker.retry_timeout_ms = retry_timeout_ms;
    }
    cfg.check()?;
    reset_global_config(cfg);
    Ok(())
}

pub fn init_log() -> Result<()> {
    logging::logger_init(log_config_file())?;

    logging::info!("[Config] App name resolved, appName {}", app_name());
    logging::info!(
        "[Config] Print effective global config, globalConfig {:?}",
        *read_config()
    );
    Ok(())
}

#[inline]
pub fn global_config() -> ConfigEntity {
    read_config().clone()
}

#[inline]
pub fn log_config_file() -> Option<String> {
    let file = read_config().config.log.config_file.clone();
    if utils::is_blank(&file) {
        None
    } else {
        Some(file)
    }
}

#[inline]
pub fn app_name() -> String {
    read_config().config.app.app_name.clone()
}

#[inline]
pub fn breaker_config() -> BreakerConfig {
    read_config().config.breaker
}
