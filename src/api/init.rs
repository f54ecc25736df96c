//! Initialization func initialize the runtime environment, including:
//! 1. override global config, from manually config or yaml file or env variable
//! 2. initialize global logger

use crate::{config, config::ConfigEntity, Result};

/// `init_default` initializes using the configuration from system
/// environment and the default value.
#[inline]
pub fn init_default() -> Result<()> {
    init_sentinel(&mut String::new())
}

/// `init_with_config` initializes using given config.
/// Environment items still override the given entity.
#[inline]
pub fn init_with_config(config_entity: ConfigEntity) -> Result<()> {
    config_entity.check()?;
    config::reset_global_config(config_entity);
    config::override_items_from_system_env()?;
    config::init_log()
}

/// `init_with_config_file` loads general configuration from the given YAML file
/// and initializes.
#[inline]
pub fn init_with_config_file(config_path: &mut String) -> Result<()> {
    init_sentinel(config_path)
}

#[inline]
fn init_sentinel(config_path: &mut String) -> Result<()> {
    // Initialize general config and logging module.
    config::init_config_with_yaml(config_path)
}
