//! mod `api` provides the topmost fundamental APIs for users using sentinel-breaker.
//! Initialization is only needed by breakers built with `CircuitBreaker::from_global_config`.
//! There are three ways to perform initialization:
//!
//!  1. `init_default()`, using default config to initialize.
//!  2. `init_with_config(config_entity: config::ConfigEntity)`, using customized config entity to initialize.
//!  3. `init_with_config_file(config_path: &mut String)`, using yaml file to initialize.

mod init;

pub use init::*;
