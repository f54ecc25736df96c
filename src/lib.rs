#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]

//! # Sentinel Breaker
//!
//! A circuit breaker guards a fallible operation, usually a call to a remote dependency.
//! Once the operation fails too often, the breaker stops invoking it for a while and
//! fails fast instead, giving the dependency time to recover before load resumes.
//!
//! ## Add Dependency
//!
//! ```toml
//! [dependencies]
//! sentinel-breaker = { version = "0.1.0", features = ["logger_env"] }
//! ```
//!
//! Optional features lists:
//! - logger_env: Use `env_logger` to initialize logging.
//! - logger_log4rs: Use `log4rs` to initialize logging.
//!
//! ## General Configurations and Initialization
//!
//! The `api` module provides following interfaces:
//!
//! - `init_default()`: Load configurations from environment variable. For undefined configurations, use default values.
//! - `init_with_config_file(config_path: &mut String)`: Load configurations from a YAML file.
//! - `init_with_config(config_entity: ConfigEntity)`: Use hand-crafted `ConfigEntity` to initialize.
//!
//! Initialization is optional, a breaker built from `Settings::default()` never reads the global config.
//!
//! ## Guard a Call
//!
//! ```rust
//! use sentinel_breaker::circuitbreaker::{BreakerError, CircuitBreaker, Settings};
//! use std::time::Duration;
//!
//! let breaker = CircuitBreaker::new(Settings {
//!     name: "inventory".into(),
//!     timeout: Duration::from_secs(5),
//!     ..Default::default()
//! });
//! match breaker.execute(|| fetch_inventory()) {
//!     Ok(items) => println!("{:?}", items),
//!     Err(err) => match err.downcast_ref::<BreakerError>() {
//!         // The breaker refused the call, `fetch_inventory` did not run.
//!         Some(rejection) => println!("fail fast: {}", rejection),
//!         // The call ran and failed.
//!         None => println!("call failed: {:?}", err),
//!     },
//! }
//! ```

/// Initialization APIs.
pub mod api;
/// Core implementations, the circuit breaker state machine and the configuration it reads.
pub mod core;
/// Adapters for different logging crates.
pub mod logging;
// Utility functions, including the clocks consumed by breakers.
pub mod utils;

// re-export precludes
pub use crate::core::*;
pub use api::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
